//! Configuration errors

use std::path::Path;

use super::GyoshuError;

/// Creates a home directory not found error
pub fn home_not_found() -> GyoshuError {
    GyoshuError::HomeDirNotFound
}

/// Creates a target root creation error
pub fn root_create_failed(path: &Path, err: &std::io::Error) -> GyoshuError {
    GyoshuError::TargetRootCreateFailed {
        path: path.display().to_string(),
        reason: err.to_string(),
    }
}
