//! Check operation
//!
//! Read-only comparison of the target root against the manifest and the
//! bundled sources.

use std::fmt;

use serde::Serialize;

use crate::config::InstallConfig;
use crate::hash;
use crate::installer::file_ops::{self, CopyFilter};
use crate::installer::relative_key;
use crate::manifest::Manifest;
use crate::state::{self, InstallState, StateStore};
use crate::validation;

/// State of one manifest entry in the target root
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "kebab-case", tag = "status", content = "detail")]
pub enum EntryStatus {
    /// Nothing at the destination
    Missing,
    /// Present but not written by this installer
    User,
    OwnedInSync,
    /// Owned, but its content differs from the bundled source
    OwnedModified,
    /// The entry fails validation or could not be hashed
    Invalid(String),
}

impl EntryStatus {
    pub fn label(&self) -> &'static str {
        match self {
            EntryStatus::Missing => "missing",
            EntryStatus::User => "user",
            EntryStatus::OwnedInSync => "owned-in-sync",
            EntryStatus::OwnedModified => "owned-modified",
            EntryStatus::Invalid(_) => "invalid",
        }
    }

    /// Whether this status makes `check` fail
    pub fn is_problem(&self) -> bool {
        matches!(self, EntryStatus::Missing | EntryStatus::Invalid(_))
    }
}

impl fmt::Display for EntryStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            EntryStatus::Invalid(reason) => write!(f, "invalid ({reason})"),
            other => f.write_str(other.label()),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct EntryCheck {
    pub relative: String,
    #[serde(flatten)]
    pub status: EntryStatus,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct CheckReport {
    pub entries: Vec<EntryCheck>,
}

impl CheckReport {
    pub fn problems(&self) -> usize {
        self.entries.iter().filter(|e| e.status.is_problem()).count()
    }

    pub fn is_ok(&self) -> bool {
        self.problems() == 0
    }

    pub fn count(&self, label: &str) -> usize {
        self.entries
            .iter()
            .filter(|e| e.status.label() == label)
            .count()
    }
}

/// Check operation over one manifest and one target root
pub struct CheckOperation<'a> {
    config: &'a InstallConfig,
    manifest: &'a Manifest,
    filter: CopyFilter,
}

impl<'a> CheckOperation<'a> {
    pub fn new(config: &'a InstallConfig, manifest: &'a Manifest) -> Self {
        Self {
            config,
            manifest,
            filter: CopyFilter::standard(),
        }
    }

    pub fn execute(&self) -> CheckReport {
        let state = StateStore::new(&self.config.state_path).load();

        let entries = self
            .manifest
            .entries()
            .map(|(category, entry)| EntryCheck {
                relative: relative_key(category, entry),
                status: self.check_entry(category, entry, state.as_ref()),
            })
            .collect();

        CheckReport { entries }
    }

    fn check_entry(&self, category: &str, entry: &str, state: Option<&InstallState>) -> EntryStatus {
        let category = match validation::validate(category, entry) {
            Ok(category) => category,
            Err(e) => return EntryStatus::Invalid(e.to_string()),
        };

        let dest = self.config.destination_path(category.as_str(), entry);
        if let Err(e) = validation::within_root(&dest, &self.config.target_root) {
            return EntryStatus::Invalid(e.to_string());
        }

        if !file_ops::entry_exists(&dest) {
            return EntryStatus::Missing;
        }

        if !state::is_owned(&relative_key(category.as_str(), entry), state) {
            return EntryStatus::User;
        }

        let source = self.config.source_path(category.as_str(), entry);
        let hashes = hash::hash_entry(&source, &self.filter)
            .and_then(|expected| hash::hash_entry(&dest, &self.filter).map(|actual| (expected, actual)));

        match hashes {
            Ok((expected, actual)) if expected == actual => EntryStatus::OwnedInSync,
            Ok(_) => EntryStatus::OwnedModified,
            Err(e) => EntryStatus::Invalid(e.to_string()),
        }
    }
}
