//! Error type tests
//!
//! Tests for GyoshuError enum, its constructors and conversions.

#![allow(clippy::expect_used)]

use std::path::Path;

use crate::error::GyoshuError;
use crate::error::{config, fs, manifest, path, state};
use miette::Diagnostic;

macro_rules! test_error_contains {
    ($test_name:ident, $err:expr, $($contains:expr),+ $(,)?) => {
        #[test]
        fn $test_name() {
            let err = $err;
            let error_string = err.to_string();
            $(
                assert!(error_string.contains($contains),
                    "Error message should contain '{}', got: {}",
                    $contains,
                    error_string
                );
            )+
        }
    };
}

#[test]
fn test_error_display() {
    let err = GyoshuError::InvalidCategory {
        category: "themes".to_string(),
    };
    assert_eq!(err.to_string(), "Invalid category 'themes'");
}

#[test]
fn test_error_code() {
    let err = path::traversal("../x");
    assert_eq!(
        err.code()
            .map(|c: Box<dyn std::fmt::Display>| c.to_string()),
        Some("gyoshu::path::traversal".to_string())
    );
}

#[test]
fn test_io_error_conversion() {
    let io_err = std::io::Error::new(std::io::ErrorKind::NotFound, "file not found");
    let err: GyoshuError = io_err.into();
    assert!(matches!(err, GyoshuError::IoError { .. }));
}

#[test]
fn test_json_error_conversion() {
    let parse_result: std::result::Result<serde_json::Value, _> =
        serde_json::from_str("invalid json content");
    let json_err = parse_result.expect_err("JSON parsing should have failed");
    let err: GyoshuError = json_err.into();
    assert!(matches!(err, GyoshuError::ManifestParseFailed { .. }));
}

test_error_contains!(
    test_traversal_names_path,
    path::traversal("../../../etc/cron.d/x"),
    "traversal",
    "../../../etc/cron.d/x"
);

test_error_contains!(
    test_outside_root_names_both_paths,
    path::outside_root(Path::new("/etc/passwd"), Path::new("/home/u/.config/opencode")),
    "/etc/passwd",
    "/home/u/.config/opencode"
);

test_error_contains!(
    test_manifest_invalid,
    manifest::invalid("version must not be empty"),
    "Invalid manifest",
    "version must not be empty"
);

test_error_contains!(
    test_state_write_failed,
    state::write_failed(Path::new("/ro/.gyoshu/install.json"), "permission denied"),
    "Failed to save install state",
    "permission denied"
);

test_error_contains!(
    test_copy_failed,
    fs::copy_failed(Path::new("src/a.md"), Path::new("dst/a.md"), "disk full"),
    "src/a.md",
    "dst/a.md",
    "disk full"
);

#[test]
fn test_root_create_failed_code() {
    let io_err = std::io::Error::new(std::io::ErrorKind::PermissionDenied, "denied");
    let err = config::root_create_failed(Path::new("/root"), &io_err);
    assert_eq!(
        err.code()
            .map(|c: Box<dyn std::fmt::Display>| c.to_string()),
        Some("gyoshu::config::root_create_failed".to_string())
    );
}
