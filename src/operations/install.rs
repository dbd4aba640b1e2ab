//! Install operation
//!
//! Runs the installer over every manifest entry in order, then records
//! ownership of everything it wrote.

use std::collections::BTreeSet;

use chrono::Utc;
use serde::Serialize;

use crate::config::InstallConfig;
use crate::error::{Result, config as config_error};
use crate::installer::file_ops::CopyFilter;
use crate::installer::{EntryReport, InstallOutcome, Installer};
use crate::manifest::Manifest;
use crate::state::{InstallState, StateStore};

/// Aggregate outcome of one install run
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RunSummary {
    pub installed: usize,
    pub skipped: usize,
    pub updated: usize,

    /// One `<category>/<entry>: <message>` line per failed entry
    pub errors: Vec<String>,

    /// Relative paths installed or updated in this run, in manifest order
    pub installed_files: Vec<String>,

    /// Problems that did not affect any entry, such as a failed state save
    pub warnings: Vec<String>,
}

impl RunSummary {
    fn record(&mut self, report: &EntryReport) {
        match &report.outcome {
            InstallOutcome::Installed => self.installed += 1,
            InstallOutcome::Updated => self.updated += 1,
            InstallOutcome::Skipped(_) => self.skipped += 1,
            InstallOutcome::Failed(_) => {}
        }

        if report.outcome.touched() {
            self.installed_files.push(report.relative.clone());
        }
        if let Some(message) = report.error_message() {
            self.errors.push(message);
        }
    }

    /// Number of entries written in this run
    pub fn touched(&self) -> usize {
        self.installed + self.updated
    }

    pub fn has_errors(&self) -> bool {
        !self.errors.is_empty()
    }
}

/// Install operation over one manifest and one target root
pub struct InstallOperation<'a> {
    config: &'a InstallConfig,
    manifest: &'a Manifest,
    filter: CopyFilter,
}

impl<'a> InstallOperation<'a> {
    pub fn new(config: &'a InstallConfig, manifest: &'a Manifest) -> Self {
        Self {
            config,
            manifest,
            filter: CopyFilter::standard(),
        }
    }

    #[must_use]
    pub fn with_filter(mut self, filter: CopyFilter) -> Self {
        self.filter = filter;
        self
    }

    /// Run the install and return the summary
    ///
    /// Only a target root that cannot be created is fatal. Entry failures land
    /// in [`RunSummary::errors`] and a failed state save in
    /// [`RunSummary::warnings`].
    pub fn execute(&self) -> Result<RunSummary> {
        self.execute_with_reports().map(|(summary, _)| summary)
    }

    /// Like [`execute`](Self::execute), also returning every entry report
    pub fn execute_with_reports(&self) -> Result<(RunSummary, Vec<EntryReport>)> {
        let store = StateStore::new(&self.config.state_path);
        let prior = store.load();

        std::fs::create_dir_all(&self.config.target_root)
            .map_err(|e| config_error::root_create_failed(&self.config.target_root, &e))?;

        let installer = Installer::new(self.config, prior.as_ref()).with_filter(self.filter.clone());

        let mut summary = RunSummary::default();
        let mut reports = Vec::with_capacity(self.manifest.len());
        for (category, entry) in self.manifest.entries() {
            let report = installer.install_entry(category, entry);
            summary.record(&report);
            reports.push(report);
        }

        if !summary.installed_files.is_empty() {
            let touched: BTreeSet<String> = summary.installed_files.iter().cloned().collect();
            let next = InstallState::merged(
                prior.as_ref(),
                self.manifest.version.clone(),
                touched,
                Utc::now(),
            );
            if let Err(e) = store.save(&next) {
                tracing::warn!(error = %e, "failed to save install state");
                summary
                    .warnings
                    .push(format!("failed to save install state: {e}"));
            }
        }

        tracing::debug!(
            installed = summary.installed,
            updated = summary.updated,
            skipped = summary.skipped,
            errors = summary.errors.len(),
            "install run finished"
        );

        Ok((summary, reports))
    }
}

#[cfg(test)]
#[path = "install_tests.rs"]
mod tests;
