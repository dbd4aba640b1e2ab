//! Manifest errors

use super::GyoshuError;

pub fn read_failed(path: impl Into<String>, reason: impl Into<String>) -> GyoshuError {
    GyoshuError::ManifestReadFailed {
        path: path.into(),
        reason: reason.into(),
    }
}

pub fn parse_failed(path: impl Into<String>, reason: impl Into<String>) -> GyoshuError {
    GyoshuError::ManifestParseFailed {
        path: path.into(),
        reason: reason.into(),
    }
}

pub fn invalid(message: impl Into<String>) -> GyoshuError {
    GyoshuError::ManifestInvalid {
        message: message.into(),
    }
}
