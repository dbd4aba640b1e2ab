//! Check command implementation
//!
//! Prints one line per manifest entry and fails when any entry is missing
//! or invalid.

use console::Style;

use crate::cli::{CheckArgs, PathArgs};
use crate::commands::helpers;
use gyoshu_install::error::{GyoshuError, Result, fs as fs_error};
use gyoshu_install::operations::{CheckOperation, CheckReport, EntryStatus};

/// Run check command
pub fn run(paths: &PathArgs, args: CheckArgs) -> Result<()> {
    let manifest = helpers::load_manifest(paths)?;
    let config = helpers::resolve_config(paths)?;

    let report = CheckOperation::new(&config, &manifest).execute();

    if args.json {
        let json = serde_json::to_string_pretty(&report).map_err(|e| fs_error::io_error(e.to_string()))?;
        println!("{json}");
    } else {
        print_report(&report);
    }

    match report.problems() {
        0 => Ok(()),
        problems => Err(GyoshuError::CheckFailed { problems }),
    }
}

fn status_style(status: &EntryStatus) -> Style {
    match status {
        EntryStatus::OwnedInSync => Style::new().green(),
        EntryStatus::OwnedModified | EntryStatus::User => Style::new().yellow(),
        EntryStatus::Missing | EntryStatus::Invalid(_) => Style::new().red(),
    }
}

fn print_report(report: &CheckReport) {
    for entry in &report.entries {
        println!(
            "{:<16} {}",
            status_style(&entry.status).apply_to(entry.status.label()),
            entry.relative
        );
        if let EntryStatus::Invalid(reason) = &entry.status {
            println!("{:<16} {}", "", Style::new().dim().apply_to(reason));
        }
    }

    println!();
    println!(
        "{} entries: {} in sync, {} modified, {} user, {} missing, {} invalid",
        report.entries.len(),
        report.count("owned-in-sync"),
        report.count("owned-modified"),
        report.count("user"),
        report.count("missing"),
        report.count("invalid"),
    );
}
