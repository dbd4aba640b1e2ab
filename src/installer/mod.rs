//! Per-entry installation logic
//!
//! For every manifest entry the installer decides one of four actions,
//! keyed on whether the destination exists and whether it is owned:
//!
//! | exists | owned | action                                   |
//! |--------|-------|------------------------------------------|
//! | no     | -     | install with exclusive create            |
//! | yes    | yes   | update (overwrite unconditionally)       |
//! | yes    | no    | skip, the file belongs to the user       |
//!
//! Entries that fail validation are reported as errors without touching the
//! file system. Losing an exclusive create to a concurrent installer is a
//! skip, not an error.

pub mod file_ops;

use std::path::{Component, Path};

use serde::Serialize;

use crate::config::InstallConfig;
use crate::error::GyoshuError;
use crate::state::{self, InstallState};
use crate::validation;

use file_ops::{CopyFilter, CreateOutcome};

/// Why an entry was left untouched
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SkipReason {
    /// Destination exists but this installer never wrote it
    NotOwned,
    /// Another installer created the destination between check and create
    LostRace,
}

/// What happened to one entry
#[derive(Debug)]
pub enum InstallOutcome {
    Installed,
    Updated,
    Skipped(SkipReason),
    Failed(GyoshuError),
}

impl InstallOutcome {
    /// Whether this outcome wrote the destination
    pub fn touched(&self) -> bool {
        matches!(self, InstallOutcome::Installed | InstallOutcome::Updated)
    }
}

/// Flat per-entry result as exposed to callers
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct InstallResult {
    pub installed: bool,
    pub skipped: bool,
    pub updated: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl From<&InstallOutcome> for InstallResult {
    fn from(outcome: &InstallOutcome) -> Self {
        match outcome {
            InstallOutcome::Installed => Self {
                installed: true,
                ..Self::default()
            },
            InstallOutcome::Updated => Self {
                updated: true,
                ..Self::default()
            },
            InstallOutcome::Skipped(_) => Self {
                skipped: true,
                ..Self::default()
            },
            InstallOutcome::Failed(err) => Self {
                error: Some(err.to_string()),
                ..Self::default()
            },
        }
    }
}

/// One processed manifest entry
#[derive(Debug)]
pub struct EntryReport {
    pub category: String,
    pub entry: String,
    /// Ownership key, e.g. `skill/rigor`
    pub relative: String,
    pub outcome: InstallOutcome,
}

impl EntryReport {
    pub fn result(&self) -> InstallResult {
        InstallResult::from(&self.outcome)
    }

    /// `<category>/<entry>: <message>` for failed entries
    pub fn error_message(&self) -> Option<String> {
        match &self.outcome {
            InstallOutcome::Failed(err) => {
                Some(format!("{}/{}: {}", self.category, self.entry, err))
            }
            _ => None,
        }
    }
}

/// Ownership key for an entry: the category and the entry's normal path
/// components, joined with `/`
pub fn relative_key(category: &str, entry: &str) -> String {
    let mut key = String::from(category);
    for component in Path::new(entry).components() {
        if let Component::Normal(name) = component {
            key.push('/');
            key.push_str(&name.to_string_lossy());
        }
    }
    key
}

/// Installs single manifest entries against one target root
pub struct Installer<'a> {
    config: &'a InstallConfig,
    state: Option<&'a InstallState>,
    filter: CopyFilter,
}

impl<'a> Installer<'a> {
    pub fn new(config: &'a InstallConfig, state: Option<&'a InstallState>) -> Self {
        Self {
            config,
            state,
            filter: CopyFilter::standard(),
        }
    }

    /// Replace the copy filter used for bundles
    #[must_use]
    pub fn with_filter(mut self, filter: CopyFilter) -> Self {
        self.filter = filter;
        self
    }

    /// Validate and install one `(category, entry)` pair
    pub fn install_entry(&self, category: &str, entry: &str) -> EntryReport {
        let relative = relative_key(category, entry);
        let outcome = self.process(category, entry, &relative);

        match &outcome {
            InstallOutcome::Failed(err) => {
                tracing::debug!(entry = %relative, error = %err, "entry failed");
            }
            InstallOutcome::Skipped(reason) => {
                tracing::debug!(entry = %relative, ?reason, "entry skipped");
            }
            InstallOutcome::Installed | InstallOutcome::Updated => {
                tracing::debug!(entry = %relative, ?outcome, "entry written");
            }
        }

        EntryReport {
            category: category.to_string(),
            entry: entry.to_string(),
            relative,
            outcome,
        }
    }

    fn process(&self, category: &str, entry: &str, relative: &str) -> InstallOutcome {
        let category = match validation::validate(category, entry) {
            Ok(category) => category,
            Err(err) => return InstallOutcome::Failed(err),
        };

        let source = self.config.source_path(category.as_str(), entry);
        let dest = self.config.destination_path(category.as_str(), entry);

        if let Err(err) = validation::within_root(&dest, &self.config.target_root) {
            return InstallOutcome::Failed(err);
        }

        if category.is_bundle() {
            self.install_bundle(&source, &dest, relative)
        } else {
            self.install_file(&source, &dest, relative)
        }
    }

    /// Install or update a single file entry
    pub fn install_file(&self, source: &Path, dest: &Path, relative: &str) -> InstallOutcome {
        if !file_ops::entry_exists(dest) {
            return match file_ops::copy_file_exclusive(source, dest) {
                Ok(CreateOutcome::Created) => InstallOutcome::Installed,
                Ok(CreateOutcome::AlreadyExists) => InstallOutcome::Skipped(SkipReason::LostRace),
                Err(err) => InstallOutcome::Failed(err),
            };
        }

        if !state::is_owned(relative, self.state) {
            return InstallOutcome::Skipped(SkipReason::NotOwned);
        }

        match file_ops::overwrite_file(source, dest) {
            Ok(()) => InstallOutcome::Updated,
            Err(err) => InstallOutcome::Failed(err),
        }
    }

    /// Install or update a directory bundle entry
    pub fn install_bundle(&self, source: &Path, dest: &Path, relative: &str) -> InstallOutcome {
        if !file_ops::entry_exists(dest) {
            return match file_ops::install_bundle_exclusive(source, dest, &self.filter) {
                Ok(CreateOutcome::Created) => InstallOutcome::Installed,
                Ok(CreateOutcome::AlreadyExists) => InstallOutcome::Skipped(SkipReason::LostRace),
                Err(err) => InstallOutcome::Failed(err),
            };
        }

        if !state::is_owned(relative, self.state) {
            return InstallOutcome::Skipped(SkipReason::NotOwned);
        }

        match file_ops::replace_bundle(source, dest, &self.filter) {
            Ok(()) => InstallOutcome::Updated,
            Err(err) => InstallOutcome::Failed(err),
        }
    }
}
