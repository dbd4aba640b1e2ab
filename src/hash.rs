//! BLAKE3 hashing of installed entries, used by `check` to tell whether an
//! owned entry still matches the bundled source

use std::fs::File;
use std::io::{BufReader, Read};
use std::path::Path;

use blake3::Hasher;
use walkdir::WalkDir;

use crate::error::{Result, fs as fs_error};
use crate::installer::file_ops::CopyFilter;

/// Hash prefix for BLAKE3 hashes
pub const HASH_PREFIX: &str = "blake3:";

fn update_from_file(hasher: &mut Hasher, path: &Path) -> Result<()> {
    let file = File::open(path).map_err(|e| fs_error::read_failed(path, &e))?;

    let mut reader = BufReader::new(file);
    let mut buffer = [0u8; 8192];

    loop {
        let bytes_read = reader
            .read(&mut buffer)
            .map_err(|e| fs_error::read_failed(path, &e))?;

        if bytes_read == 0 {
            break;
        }

        hasher.update(&buffer[..bytes_read]);
    }

    Ok(())
}

/// Calculate BLAKE3 hash of a file
pub fn hash_file(path: &Path) -> Result<String> {
    let mut hasher = Hasher::new();
    update_from_file(&mut hasher, path)?;
    Ok(format!("{}{}", HASH_PREFIX, hasher.finalize().to_hex()))
}

/// Calculate BLAKE3 hash of a directory's contents
///
/// Files are visited sorted by relative path and names excluded by `filter`
/// are skipped, so a source tree and its installed copy hash the same.
pub fn hash_directory(path: &Path, filter: &CopyFilter) -> Result<String> {
    if !path.is_dir() {
        return Err(fs_error::read_failed(
            path,
            &std::io::Error::new(std::io::ErrorKind::NotFound, "not a directory"),
        ));
    }

    let mut hasher = Hasher::new();
    let walker = WalkDir::new(path)
        .min_depth(1)
        .follow_links(true)
        .sort_by_file_name()
        .into_iter()
        .filter_entry(|e| !filter.excludes(&e.file_name().to_string_lossy()));

    for entry in walker {
        let entry = entry.map_err(|e| fs_error::io_error(e.to_string()))?;
        if !entry.file_type().is_file() {
            continue;
        }

        let file_path = entry.path();
        let relative_path = file_path
            .strip_prefix(path)
            .unwrap_or(file_path)
            .to_string_lossy()
            .replace('\\', "/");
        hasher.update(relative_path.as_bytes());
        hasher.update(b"\0");

        update_from_file(&mut hasher, file_path)?;
        hasher.update(b"\0");
    }

    Ok(format!("{}{}", HASH_PREFIX, hasher.finalize().to_hex()))
}

/// Hash a file or a directory, whichever is at `path`
pub fn hash_entry(path: &Path, filter: &CopyFilter) -> Result<String> {
    if path.is_dir() {
        hash_directory(path, filter)
    } else {
        hash_file(path)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_hash_file() {
        let temp = TempDir::new().unwrap();
        let file_path = temp.path().join("test.txt");
        std::fs::write(&file_path, "test content").unwrap();

        let hash = hash_file(&file_path).unwrap();
        assert!(hash.starts_with(HASH_PREFIX));
    }

    #[test]
    fn test_hash_file_not_found() {
        assert!(hash_file(Path::new("/nonexistent/file.txt")).is_err());
    }

    #[test]
    fn test_hash_directory_deterministic() {
        let temp = TempDir::new().unwrap();
        std::fs::write(temp.path().join("a.txt"), "aaa").unwrap();
        std::fs::create_dir(temp.path().join("sub")).unwrap();
        std::fs::write(temp.path().join("sub/b.txt"), "bbb").unwrap();

        let filter = CopyFilter::standard();
        assert_eq!(
            hash_directory(temp.path(), &filter).unwrap(),
            hash_directory(temp.path(), &filter).unwrap()
        );
    }

    #[test]
    fn test_hash_directory_sees_renames() {
        let temp = TempDir::new().unwrap();
        let file = temp.path().join("a.txt");
        std::fs::write(&file, "same").unwrap();
        let filter = CopyFilter::none();
        let before = hash_directory(temp.path(), &filter).unwrap();

        std::fs::rename(&file, temp.path().join("b.txt")).unwrap();
        assert_ne!(before, hash_directory(temp.path(), &filter).unwrap());
    }

    #[test]
    fn test_hash_directory_ignores_excluded_names() {
        let temp = TempDir::new().unwrap();
        std::fs::write(temp.path().join("SKILL.md"), "skill").unwrap();
        let filter = CopyFilter::standard();
        let before = hash_directory(temp.path(), &filter).unwrap();

        std::fs::create_dir(temp.path().join("__pycache__")).unwrap();
        std::fs::write(temp.path().join("__pycache__/x.pyc"), "bytecode").unwrap();
        assert_eq!(before, hash_directory(temp.path(), &filter).unwrap());
    }

    #[test]
    fn test_hash_entry_dispatches() {
        let temp = TempDir::new().unwrap();
        let file = temp.path().join("a.md");
        std::fs::write(&file, "x").unwrap();

        let filter = CopyFilter::standard();
        assert_eq!(hash_entry(&file, &filter).unwrap(), hash_file(&file).unwrap());
        assert_eq!(
            hash_entry(temp.path(), &filter).unwrap(),
            hash_directory(temp.path(), &filter).unwrap()
        );
    }
}
