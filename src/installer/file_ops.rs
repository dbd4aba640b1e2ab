//! File system primitives for installing entries
//!
//! - Exclusive creation of files and bundles ([`copy_file_exclusive`],
//!   [`install_bundle_exclusive`]) that report a lost race instead of
//!   overwriting
//! - Overwrites of owned entries ([`overwrite_file`], [`replace_bundle`])
//! - Filtered recursive directory copies ([`copy_dir_filtered`])

use std::fs::{self, File, OpenOptions};
use std::io;
use std::path::{Path, PathBuf};

use walkdir::WalkDir;
use wax::{CandidatePath, Glob, Pattern};

use crate::error::{GyoshuError, Result, fs as fs_error};

/// File-name patterns never copied out of a bundle
const EXCLUDED_NAMES: &[&str] = &["__pycache__", "*.test.ts", "*.test.js"];

const STAGING_PREFIX: &str = ".gyoshu-staging-";

/// Result of an exclusive create
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CreateOutcome {
    Created,
    /// Something appeared at the destination first
    AlreadyExists,
}

/// Name-based exclusion applied while copying bundles
pub struct CopyFilter {
    patterns: Vec<&'static str>,
    excluded: Vec<Glob<'static>>,
}

impl std::fmt::Debug for CopyFilter {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CopyFilter")
            .field("excluded", &self.patterns)
            .finish()
    }
}

impl CopyFilter {
    /// Filter excluding test sources and Python bytecode caches
    pub fn standard() -> Self {
        Self::from_patterns(EXCLUDED_NAMES)
    }

    /// Filter that copies everything
    pub fn none() -> Self {
        Self {
            patterns: Vec::new(),
            excluded: Vec::new(),
        }
    }

    /// Build a filter from file-name glob patterns; invalid patterns are ignored
    pub fn from_patterns(patterns: &[&'static str]) -> Self {
        let mut filter = Self::none();
        for pattern in patterns {
            if let Ok(glob) = Glob::new(pattern) {
                filter.patterns.push(pattern);
                filter.excluded.push(glob);
            }
        }
        filter
    }

    /// Whether a file or directory with this name is skipped
    pub fn excludes(&self, name: &str) -> bool {
        let candidate = CandidatePath::from(name);
        self.excluded
            .iter()
            .any(|glob| glob.matched(&candidate).is_some())
    }
}

impl Clone for CopyFilter {
    fn clone(&self) -> Self {
        Self::from_patterns(&self.patterns)
    }
}

impl Default for CopyFilter {
    fn default() -> Self {
        Self::standard()
    }
}

/// Ensure parent directory exists for a path
pub fn ensure_parent_dir(path: &Path) -> Result<()> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).map_err(|e| fs_error::write_failed(parent, &e))?;
    }
    Ok(())
}

/// Whether anything (file, directory, or symlink, even dangling) is at `path`
pub fn entry_exists(path: &Path) -> bool {
    fs::symlink_metadata(path).is_ok()
}

fn not_a_file(path: &Path) -> GyoshuError {
    fs_error::read_failed(
        path,
        &io::Error::new(io::ErrorKind::InvalidInput, "source is not a regular file"),
    )
}

fn not_a_dir(path: &Path) -> GyoshuError {
    fs_error::read_failed(
        path,
        &io::Error::new(io::ErrorKind::InvalidInput, "source is not a directory"),
    )
}

/// Copy `source` to `dest`, failing distinctly if `dest` already exists.
///
/// The source is opened before the destination is created so a missing
/// source never leaves an empty file behind. A partially written
/// destination is removed again.
pub fn copy_file_exclusive(source: &Path, dest: &Path) -> Result<CreateOutcome> {
    let mut input = File::open(source).map_err(|e| fs_error::read_failed(source, &e))?;
    let metadata = input
        .metadata()
        .map_err(|e| fs_error::read_failed(source, &e))?;
    if !metadata.is_file() {
        return Err(not_a_file(source));
    }

    ensure_parent_dir(dest)?;

    let mut output = match OpenOptions::new().write(true).create_new(true).open(dest) {
        Ok(file) => file,
        Err(e) if e.kind() == io::ErrorKind::AlreadyExists => {
            return Ok(CreateOutcome::AlreadyExists);
        }
        Err(e) => return Err(fs_error::write_failed(dest, &e)),
    };

    let written = io::copy(&mut input, &mut output)
        .and_then(|_| output.set_permissions(metadata.permissions()))
        .and_then(|()| output.sync_all());

    if let Err(e) = written {
        drop(output);
        let _ = fs::remove_file(dest);
        return Err(fs_error::copy_failed(source, dest, e));
    }

    Ok(CreateOutcome::Created)
}

/// Overwrite an existing destination with the source content.
///
/// The content is written to a temporary sibling and renamed over `dest`, so
/// a symlink at `dest` is replaced rather than followed and readers never see
/// a partial file.
pub fn overwrite_file(source: &Path, dest: &Path) -> Result<()> {
    let mut input = File::open(source).map_err(|e| fs_error::read_failed(source, &e))?;
    let metadata = input
        .metadata()
        .map_err(|e| fs_error::read_failed(source, &e))?;
    if !metadata.is_file() {
        return Err(not_a_file(source));
    }

    ensure_parent_dir(dest)?;
    let parent = dest
        .parent()
        .ok_or_else(|| fs_error::io_error(format!("no parent for {}", dest.display())))?;

    let mut staged =
        tempfile::NamedTempFile::new_in(parent).map_err(|e| fs_error::write_failed(parent, &e))?;
    io::copy(&mut input, staged.as_file_mut())
        .and_then(|_| staged.as_file().set_permissions(metadata.permissions()))
        .and_then(|()| staged.as_file().sync_all())
        .map_err(|e| fs_error::copy_failed(source, dest, e))?;

    staged
        .persist(dest)
        .map_err(|e| fs_error::copy_failed(source, dest, e.error))?;
    Ok(())
}

/// Copy a directory tree, skipping names excluded by `filter`
pub fn copy_dir_filtered(src: &Path, dst: &Path, filter: &CopyFilter) -> Result<()> {
    fs::create_dir_all(dst).map_err(|e| fs_error::write_failed(dst, &e))?;

    let walker = WalkDir::new(src)
        .min_depth(1)
        .follow_links(true)
        .sort_by_file_name()
        .into_iter()
        .filter_entry(|e| !filter.excludes(&e.file_name().to_string_lossy()));

    for entry in walker {
        let entry = entry.map_err(|e| fs_error::copy_failed(src, dst, e))?;
        let relative = entry
            .path()
            .strip_prefix(src)
            .map_err(|e| fs_error::copy_failed(entry.path(), dst, e))?;
        let target = dst.join(relative);

        if entry.file_type().is_dir() {
            fs::create_dir_all(&target).map_err(|e| fs_error::write_failed(&target, &e))?;
        } else {
            fs::copy(entry.path(), &target)
                .map_err(|e| fs_error::copy_failed(entry.path(), &target, e))?;
        }
    }

    Ok(())
}

/// Copy `src` into a fresh temporary sibling of `dest`.
///
/// The returned directory is removed on drop unless it has been renamed away.
fn stage_bundle(src: &Path, dest: &Path, filter: &CopyFilter) -> Result<tempfile::TempDir> {
    let source_meta = fs::metadata(src).map_err(|e| fs_error::read_failed(src, &e))?;
    if !source_meta.is_dir() {
        return Err(not_a_dir(src));
    }

    let parent = dest
        .parent()
        .ok_or_else(|| fs_error::io_error(format!("no parent for {}", dest.display())))?;
    fs::create_dir_all(parent).map_err(|e| fs_error::write_failed(parent, &e))?;

    let staging = tempfile::Builder::new()
        .prefix(STAGING_PREFIX)
        .tempdir_in(parent)
        .map_err(|e| fs_error::write_failed(parent, &e))?;

    copy_dir_filtered(src, staging.path(), filter)?;

    // Temp dirs are created private; match the source directory instead
    fs::set_permissions(staging.path(), source_meta.permissions())
        .map_err(|e| fs_error::write_failed(staging.path(), &e))?;

    Ok(staging)
}

/// Install a bundle directory at `dest` unless something else got there first.
///
/// The bundle is assembled in a staging sibling. `dest` is then claimed with
/// an exclusive `create_dir` and the staged tree renamed onto the claimed
/// empty directory, so of two concurrent installers only one can win.
pub fn install_bundle_exclusive(
    src: &Path,
    dest: &Path,
    filter: &CopyFilter,
) -> Result<CreateOutcome> {
    if entry_exists(dest) {
        return Ok(CreateOutcome::AlreadyExists);
    }

    let staging = stage_bundle(src, dest, filter)?;

    match fs::create_dir(dest) {
        Ok(()) => {}
        Err(e) if e.kind() == io::ErrorKind::AlreadyExists => {
            return Ok(CreateOutcome::AlreadyExists);
        }
        Err(e) => return Err(fs_error::write_failed(dest, &e)),
    }

    if let Err(e) = rename_onto_claim(staging.path(), dest) {
        let _ = fs::remove_dir(dest);
        return Err(fs_error::copy_failed(src, dest, e));
    }

    Ok(CreateOutcome::Created)
}

/// Rename `staged` onto the empty directory `claim`.
///
/// Unix renames over an empty directory directly; elsewhere the claim is
/// dropped immediately before the rename.
fn rename_onto_claim(staged: &Path, claim: &Path) -> io::Result<()> {
    match fs::rename(staged, claim) {
        Ok(()) => Ok(()),
        Err(_) if cfg!(not(unix)) => {
            fs::remove_dir(claim)?;
            fs::rename(staged, claim)
        }
        Err(e) => Err(e),
    }
}

fn previous_path(dest: &Path) -> PathBuf {
    let name = dest
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_default();
    dest.with_file_name(format!(".{name}.gyoshu-previous-{}", std::process::id()))
}

/// Replace an existing bundle directory with a fresh copy of `src`.
///
/// The new tree is staged first, then swapped in with [`swap_in`].
pub fn replace_bundle(src: &Path, dest: &Path, filter: &CopyFilter) -> Result<()> {
    let staging = stage_bundle(src, dest, filter)?;
    swap_in(staging.path(), dest, &previous_path(dest))
        .map_err(|e| fs_error::copy_failed(src, dest, e))?;
    Ok(())
}

/// Move `dest` aside to `previous`, rename `staged` into place, then delete
/// `previous`. If the rename fails the previous directory is put back.
fn swap_in(staged: &Path, dest: &Path, previous: &Path) -> io::Result<()> {
    if entry_exists(previous) {
        remove_entry(previous)?;
    }

    fs::rename(dest, previous)?;

    if let Err(e) = fs::rename(staged, dest) {
        if let Err(restore) = fs::rename(previous, dest) {
            tracing::error!(
                path = %dest.display(),
                backup = %previous.display(),
                error = %restore,
                "failed to restore previous bundle"
            );
        }
        return Err(e);
    }

    if let Err(e) = remove_entry(previous) {
        tracing::warn!(path = %previous.display(), error = %e, "failed to remove previous bundle");
    }

    Ok(())
}

fn remove_entry(path: &Path) -> io::Result<()> {
    if fs::symlink_metadata(path)?.is_dir() {
        fs::remove_dir_all(path)
    } else {
        fs::remove_file(path)
    }
}
