//! Install-state errors

use std::path::Path;

use super::GyoshuError;

pub fn read_failed(path: &Path, reason: impl ToString) -> GyoshuError {
    GyoshuError::StateReadFailed {
        path: path.display().to_string(),
        reason: reason.to_string(),
    }
}

pub fn parse_failed(path: &Path, reason: impl ToString) -> GyoshuError {
    GyoshuError::StateParseFailed {
        path: path.display().to_string(),
        reason: reason.to_string(),
    }
}

pub fn write_failed(path: &Path, reason: impl ToString) -> GyoshuError {
    GyoshuError::StateWriteFailed {
        path: path.display().to_string(),
        reason: reason.to_string(),
    }
}
