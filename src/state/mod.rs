//! Install-state persistence
//!
//! The state file (`.gyoshu/install.json` under the target root) is the only
//! record of which destination paths this installer created or last wrote.
//! Only those paths may be overwritten on later runs.
//!
//! Reading is forgiving: a missing or unparsable file means "no prior state".
//! Writing replaces the whole file through a temporary sibling and a rename,
//! so a concurrent reader sees either the old or the new file, never a torn
//! one.

use std::collections::BTreeSet;
use std::io::{ErrorKind, Write};
use std::path::{Path, PathBuf};

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::error::{Result, state};

/// Persisted ownership record
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InstallState {
    /// Manifest version of the run that last changed anything
    pub version: String,

    pub installed_at: DateTime<Utc>,

    /// Owned paths relative to the target root, e.g. `command/gyoshu.md`
    #[serde(default)]
    pub files: BTreeSet<String>,
}

impl InstallState {
    pub fn new(version: impl Into<String>, installed_at: DateTime<Utc>) -> Self {
        Self {
            version: version.into(),
            installed_at,
            files: BTreeSet::new(),
        }
    }

    /// Build the state that follows a run: prior ownership plus every path
    /// touched in this run, stamped with the new version and time
    pub fn merged<I>(
        prior: Option<&InstallState>,
        version: impl Into<String>,
        touched: I,
        installed_at: DateTime<Utc>,
    ) -> Self
    where
        I: IntoIterator<Item = String>,
    {
        let mut files = prior.map(|s| s.files.clone()).unwrap_or_default();
        files.extend(touched);
        Self {
            version: version.into(),
            installed_at,
            files,
        }
    }

    pub fn is_owned(&self, relative: &str) -> bool {
        self.files.contains(relative)
    }
}

/// Ownership lookup that treats absent state as "owns nothing"
pub fn is_owned(relative: &str, state: Option<&InstallState>) -> bool {
    state.is_some_and(|s| s.is_owned(relative))
}

/// Reads and writes the state file
#[derive(Debug, Clone)]
pub struct StateStore {
    path: PathBuf,
}

impl StateStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Read the state file, distinguishing "absent" from "unreadable"
    pub fn read(&self) -> Result<Option<InstallState>> {
        let content = match std::fs::read_to_string(&self.path) {
            Ok(content) => content,
            Err(e) if e.kind() == ErrorKind::NotFound => return Ok(None),
            Err(e) => return Err(state::read_failed(&self.path, e)),
        };

        serde_json::from_str(&content)
            .map(Some)
            .map_err(|e| state::parse_failed(&self.path, e))
    }

    /// Load prior state; any failure counts as "no prior state"
    pub fn load(&self) -> Option<InstallState> {
        match self.read() {
            Ok(state) => state,
            Err(e) => {
                tracing::warn!(error = %e, "ignoring unusable install state");
                None
            }
        }
    }

    /// Replace the state file with `install_state`
    pub fn save(&self, install_state: &InstallState) -> Result<()> {
        let parent = self
            .path
            .parent()
            .filter(|p| !p.as_os_str().is_empty())
            .unwrap_or_else(|| Path::new("."));
        std::fs::create_dir_all(parent).map_err(|e| state::write_failed(&self.path, e))?;

        let mut json = serde_json::to_string_pretty(install_state)
            .map_err(|e| state::write_failed(&self.path, e))?;
        json.push('\n');

        let mut temp = tempfile::NamedTempFile::new_in(parent)
            .map_err(|e| state::write_failed(&self.path, e))?;
        temp.write_all(json.as_bytes())
            .and_then(|()| temp.as_file().sync_all())
            .map_err(|e| state::write_failed(&self.path, e))?;
        temp.persist(&self.path)
            .map_err(|e| state::write_failed(&self.path, e.error))?;

        Ok(())
    }
}
