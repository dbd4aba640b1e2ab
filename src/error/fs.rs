//! File system errors

use std::path::Path;

use super::GyoshuError;

/// Creates a file read failed error
pub fn read_failed(path: &Path, err: &std::io::Error) -> GyoshuError {
    GyoshuError::FileReadFailed {
        path: path.display().to_string(),
        reason: err.to_string(),
    }
}

/// Creates a file write failed error
pub fn write_failed(path: &Path, err: &std::io::Error) -> GyoshuError {
    GyoshuError::FileWriteFailed {
        path: path.display().to_string(),
        reason: err.to_string(),
    }
}

/// Creates a copy failed error
pub fn copy_failed(from: &Path, to: &Path, reason: impl ToString) -> GyoshuError {
    GyoshuError::CopyFailed {
        from: from.display().to_string(),
        to: to.display().to_string(),
        reason: reason.to_string(),
    }
}

/// Creates an IO error
pub fn io_error(message: impl Into<String>) -> GyoshuError {
    GyoshuError::IoError {
        message: message.into(),
    }
}
