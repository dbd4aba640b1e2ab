//! Command helper utilities

use crate::cli::PathArgs;
use gyoshu_install::config::{self, InstallConfig};
use gyoshu_install::error::Result;
use gyoshu_install::manifest::Manifest;

/// Build the install configuration from CLI arguments
///
/// `--root` falls back to `~/.config/opencode` and `--source` to the assets
/// shipped with the crate.
pub fn resolve_config(paths: &PathArgs) -> Result<InstallConfig> {
    let target_root = match &paths.root {
        Some(root) => root.clone(),
        None => config::default_target_root()?,
    };
    let source_root = paths
        .source
        .clone()
        .unwrap_or_else(config::default_source_root);

    Ok(InstallConfig::new(target_root, source_root))
}

/// Load the manifest named by `--manifest`, or the built-in one
pub fn load_manifest(paths: &PathArgs) -> Result<Manifest> {
    match &paths.manifest {
        Some(path) => Manifest::load(path),
        None => Manifest::embedded(),
    }
}
