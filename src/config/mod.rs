//! Installer configuration
//!
//! All locations the installer touches are carried in an explicit
//! [`InstallConfig`] so a run can be pointed at any directory, including a
//! temporary one in tests.

use std::path::{Path, PathBuf};

use crate::error::{Result, config};

/// Directory under the target root that holds installer bookkeeping
pub const STATE_DIR: &str = ".gyoshu";

/// File name of the persisted install state
pub const STATE_FILE: &str = "install.json";

/// Locations used by one install run
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InstallConfig {
    /// User configuration directory that receives the assets
    pub target_root: PathBuf,

    /// Directory holding the bundled assets, laid out as `<category>/<entry>`
    pub source_root: PathBuf,

    /// Where ownership state is persisted
    pub state_path: PathBuf,
}

impl InstallConfig {
    /// Create a configuration with the state file at
    /// `<target_root>/.gyoshu/install.json`
    pub fn new(target_root: impl Into<PathBuf>, source_root: impl Into<PathBuf>) -> Self {
        let target_root = target_root.into();
        let state_path = default_state_path(&target_root);
        Self {
            target_root,
            source_root: source_root.into(),
            state_path,
        }
    }

    /// Override the state file location
    #[must_use]
    pub fn with_state_path(mut self, state_path: impl Into<PathBuf>) -> Self {
        self.state_path = state_path.into();
        self
    }

    /// Source location of an entry
    pub fn source_path(&self, category: &str, entry: &str) -> PathBuf {
        self.source_root.join(category).join(entry)
    }

    /// Destination of an entry, before any validation
    pub fn destination_path(&self, category: &str, entry: &str) -> PathBuf {
        self.target_root.join(category).join(entry)
    }
}

/// State file location for a target root
pub fn default_state_path(target_root: &Path) -> PathBuf {
    target_root.join(STATE_DIR).join(STATE_FILE)
}

/// `~/.config/opencode`
pub fn default_target_root() -> Result<PathBuf> {
    dirs::home_dir()
        .map(|home| home.join(".config").join("opencode"))
        .ok_or_else(config::home_not_found)
}

/// File that marks a directory as a Gyoshu asset tree
pub const ASSET_MARKER: &str = "gyoshu-manifest.json";

/// Asset directory for the running binary
///
/// Searched relative to the executable first (see [`asset_dir_candidates`]),
/// then the crate checkout the binary was built from.
pub fn default_source_root() -> PathBuf {
    std::env::current_exe()
        .ok()
        .and_then(|exe| find_asset_dir(&exe))
        .unwrap_or_else(|| PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("assets"))
}

/// Places an installed binary keeps its assets: `<bin>/assets`,
/// `<bin>/../assets` and `<bin>/../share/gyoshu/assets`
pub fn asset_dir_candidates(exe: &Path) -> Vec<PathBuf> {
    let exe = dunce::canonicalize(exe).unwrap_or_else(|_| exe.to_path_buf());
    let Some(bin_dir) = exe.parent() else {
        return Vec::new();
    };

    let mut candidates = vec![bin_dir.join("assets")];
    if let Some(prefix) = bin_dir.parent() {
        candidates.push(prefix.join("assets"));
        candidates.push(prefix.join("share").join("gyoshu").join("assets"));
    }
    candidates
}

/// First candidate next to `exe` that holds the asset marker
pub fn find_asset_dir(exe: &Path) -> Option<PathBuf> {
    asset_dir_candidates(exe)
        .into_iter()
        .find(|dir| dir.join(ASSET_MARKER).is_file())
}
