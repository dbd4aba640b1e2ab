//! Error types and handling for the Gyoshu installer
//!
//! Uses `thiserror` for error definitions and `miette` for pretty diagnostics.
//!
//! This module is organized into sub-modules by error domain:
//! - [`manifest`]: Manifest loading and schema errors
//! - [`path`]: Path validation errors
//! - [`fs`]: File system errors
//! - [`state`]: Install-state persistence errors
//! - [`config`]: Configuration errors

pub mod config;
pub mod fs;
pub mod manifest;
pub mod path;
pub mod state;

use miette::Diagnostic;
use thiserror::Error;

/// Main error type for installer operations
#[derive(Error, Diagnostic, Debug)]
pub enum GyoshuError {
    // Manifest errors
    #[error("Failed to read manifest: {path}: {reason}")]
    #[diagnostic(
        code(gyoshu::manifest::read_failed),
        help("Check that the manifest file exists and is readable")
    )]
    ManifestReadFailed { path: String, reason: String },

    #[error("Failed to parse manifest: {path}: {reason}")]
    #[diagnostic(
        code(gyoshu::manifest::parse_failed),
        help(
            "The manifest must be a JSON object: {{ \"version\": \"...\", \"files\": {{ \"<category>\": [\"<entry>\", ...] }} }}"
        )
    )]
    ManifestParseFailed { path: String, reason: String },

    #[error("Invalid manifest: {message}")]
    #[diagnostic(code(gyoshu::manifest::invalid))]
    ManifestInvalid { message: String },

    // Path validation errors
    #[error("Invalid category '{category}'")]
    #[diagnostic(
        code(gyoshu::path::invalid_category),
        help("Allowed categories: agent, command, tool, skill, lib, bridge, plugin")
    )]
    InvalidCategory { category: String },

    #[error("Path traversal rejected: {path}")]
    #[diagnostic(code(gyoshu::path::traversal))]
    PathTraversal { path: String },

    #[error("Absolute path rejected: {path}")]
    #[diagnostic(code(gyoshu::path::absolute))]
    AbsolutePath { path: String },

    #[error("Path contains a null byte: {path:?}")]
    #[diagnostic(code(gyoshu::path::null_byte))]
    NullByte { path: String },

    #[error("Empty entry in category '{category}'")]
    #[diagnostic(code(gyoshu::path::empty))]
    EmptyEntry { category: String },

    #[error("Destination escapes target root: {path} is not inside {root}")]
    #[diagnostic(code(gyoshu::path::outside_root))]
    OutsideRoot { path: String, root: String },

    // File system errors
    #[error("Failed to read file: {path}: {reason}")]
    #[diagnostic(code(gyoshu::fs::read_failed))]
    FileReadFailed { path: String, reason: String },

    #[error("Failed to write file: {path}: {reason}")]
    #[diagnostic(code(gyoshu::fs::write_failed))]
    FileWriteFailed { path: String, reason: String },

    #[error("Failed to copy {from} to {to}: {reason}")]
    #[diagnostic(code(gyoshu::fs::copy_failed))]
    CopyFailed {
        from: String,
        to: String,
        reason: String,
    },

    #[error("IO error: {message}")]
    #[diagnostic(code(gyoshu::fs::io_error))]
    IoError { message: String },

    // Install-state errors
    #[error("Failed to read install state: {path}: {reason}")]
    #[diagnostic(code(gyoshu::state::read_failed))]
    StateReadFailed { path: String, reason: String },

    #[error("Failed to parse install state: {path}: {reason}")]
    #[diagnostic(
        code(gyoshu::state::parse_failed),
        help("The next successful install run rewrites this file")
    )]
    StateParseFailed { path: String, reason: String },

    #[error("Failed to save install state: {path}: {reason}")]
    #[diagnostic(code(gyoshu::state::write_failed))]
    StateWriteFailed { path: String, reason: String },

    // Configuration errors
    #[error("Could not determine the home directory")]
    #[diagnostic(
        code(gyoshu::config::no_home),
        help("Pass --root or set OPENCODE_CONFIG_DIR")
    )]
    HomeDirNotFound,

    #[error("Failed to create target root: {path}: {reason}")]
    #[diagnostic(code(gyoshu::config::root_create_failed))]
    TargetRootCreateFailed { path: String, reason: String },

    #[error("Unknown shell: {shell}")]
    #[diagnostic(
        code(gyoshu::cli::unknown_shell),
        help("Supported shells: bash, elvish, fish, powershell, zsh")
    )]
    UnknownShell { shell: String },

    #[error("{problems} manifest entries are missing or invalid")]
    #[diagnostic(
        code(gyoshu::check::failed),
        help("Run 'gyoshu install' to fix")
    )]
    CheckFailed { problems: usize },
}

impl From<std::io::Error> for GyoshuError {
    fn from(err: std::io::Error) -> Self {
        GyoshuError::IoError {
            message: err.to_string(),
        }
    }
}

impl From<serde_json::Error> for GyoshuError {
    fn from(err: serde_json::Error) -> Self {
        GyoshuError::ManifestParseFailed {
            path: "<inline>".to_string(),
            reason: err.to_string(),
        }
    }
}

/// Result type alias using miette for error handling
pub type Result<T> = miette::Result<T, GyoshuError>;

#[cfg(test)]
mod tests;
