//! Path validation errors

use std::path::Path;

use super::GyoshuError;

pub fn invalid_category(category: impl Into<String>) -> GyoshuError {
    GyoshuError::InvalidCategory {
        category: category.into(),
    }
}

pub fn traversal(path: impl Into<String>) -> GyoshuError {
    GyoshuError::PathTraversal { path: path.into() }
}

pub fn absolute(path: impl Into<String>) -> GyoshuError {
    GyoshuError::AbsolutePath { path: path.into() }
}

pub fn null_byte(path: impl Into<String>) -> GyoshuError {
    GyoshuError::NullByte { path: path.into() }
}

pub fn empty(category: impl Into<String>) -> GyoshuError {
    GyoshuError::EmptyEntry {
        category: category.into(),
    }
}

/// Creates an error for a destination that resolved outside the target root
pub fn outside_root(path: &Path, root: &Path) -> GyoshuError {
    GyoshuError::OutsideRoot {
        path: path.display().to_string(),
        root: root.display().to_string(),
    }
}
