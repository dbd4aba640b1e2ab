//! Install command implementation
//!
//! Runs the install over the chosen target root and prints the summary.
//! Entry failures are reported but do not change the exit code; only a
//! manifest that cannot be loaded or a target root that cannot be created
//! fails the command.

use console::Style;

use crate::cli::{InstallArgs, PathArgs};
use crate::commands::helpers;
use gyoshu_install::error::{Result, fs as fs_error};
use gyoshu_install::operations::{InstallOperation, RunSummary};

/// Run install command
pub fn run(paths: &PathArgs, args: InstallArgs) -> Result<()> {
    let manifest = helpers::load_manifest(paths)?;
    let config = helpers::resolve_config(paths)?;

    let summary = InstallOperation::new(&config, &manifest).execute()?;

    if args.json {
        let json = serde_json::to_string_pretty(&summary).map_err(|e| fs_error::io_error(e.to_string()))?;
        println!("{json}");
    } else {
        print_summary(&summary, &config.target_root.display().to_string());
    }

    Ok(())
}

fn print_summary(summary: &RunSummary, root: &str) {
    let green = Style::new().green();
    let yellow = Style::new().yellow();
    let red = Style::new().red();
    let dim = Style::new().dim();

    println!(
        "{} {} installed, {} updated, {} skipped in {}",
        green.apply_to("Gyoshu:"),
        summary.installed,
        summary.updated,
        summary.skipped,
        root
    );

    for file in &summary.installed_files {
        println!("  {} {}", dim.apply_to("-"), file);
    }

    if summary.skipped > 0 {
        println!(
            "{}",
            dim.apply_to("Skipped entries already exist and were not installed by Gyoshu.")
        );
    }

    if summary.has_errors() {
        eprintln!("{}", red.apply_to("Some files failed to install:"));
        for error in &summary.errors {
            eprintln!("  - {error}");
        }
    }

    for warning in &summary.warnings {
        eprintln!("{} {}", yellow.apply_to("Warning:"), warning);
    }
}
