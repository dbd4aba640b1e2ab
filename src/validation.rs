//! Path validation for manifest entries
//!
//! Two independent checks guard every file system mutation:
//! - [`validate`] looks at the `(category, entry)` strings only: the category
//!   must be on the allow-list and the entry must be a plain relative path.
//! - [`within_root`] resolves the destination against the real file system
//!   (following symlinks of existing ancestors) and requires it to be a strict
//!   descendant of the resolved target root.

use normpath::PathExt;
use std::path::{Component, Path, PathBuf};

use crate::error::{Result, path};
use crate::manifest::Category;

/// Validate a manifest entry before it is turned into a path
pub fn validate(category: &str, entry: &str) -> Result<Category> {
    let category: Category = category.parse()?;
    validate_entry(category, entry)?;
    Ok(category)
}

fn validate_entry(category: Category, entry: &str) -> Result<()> {
    if entry.contains('\0') {
        return Err(path::null_byte(entry));
    }

    if is_absolute_syntax(entry) {
        return Err(path::absolute(entry));
    }

    // Backslashes count as separators so `..\x` is caught on every platform
    if entry.split(['/', '\\']).any(|segment| segment == "..") {
        return Err(path::traversal(entry));
    }

    let has_name = Path::new(entry)
        .components()
        .any(|c| matches!(c, Component::Normal(_)));
    if !has_name {
        return Err(path::empty(category.as_str()));
    }

    Ok(())
}

fn is_absolute_syntax(entry: &str) -> bool {
    let bytes = entry.as_bytes();
    let drive_letter = bytes.len() >= 2 && bytes[0].is_ascii_alphabetic() && bytes[1] == b':';

    entry.starts_with(['/', '\\'])
        || drive_letter
        || Path::new(entry)
            .components()
            .any(|c| matches!(c, Component::RootDir | Component::Prefix(_)))
}

/// Confirm `destination` resolves strictly inside `root`
pub fn within_root(destination: &Path, root: &Path) -> Result<()> {
    let resolved_root = resolve(root);
    let resolved = resolve(destination);

    if resolved != resolved_root && resolved.starts_with(&resolved_root) {
        Ok(())
    } else {
        Err(path::outside_root(&resolved, &resolved_root))
    }
}

/// Resolve a path to its canonical form.
///
/// For paths that do not exist yet, the longest existing ancestor is
/// canonicalized and the remaining components are appended, so symlinked
/// ancestors are still followed.
pub fn resolve(path: &Path) -> PathBuf {
    if let Ok(canonical) = dunce::canonicalize(path) {
        return canonical;
    }

    let mut current = path;
    let mut missing = Vec::new();

    let base = loop {
        let (Some(name), Some(parent)) = (current.file_name(), current.parent()) else {
            break current
                .normalize()
                .map(|np| np.into_path_buf())
                .unwrap_or_else(|_| current.to_path_buf());
        };
        missing.push(name);
        current = parent;
        if let Ok(canonical) = dunce::canonicalize(current) {
            break canonical;
        }
    };

    missing
        .iter()
        .rev()
        .fold(base, |acc, component| acc.join(component))
}
