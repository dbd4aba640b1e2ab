//! Status command implementation

use console::Style;

use crate::cli::PathArgs;
use crate::commands::helpers;
use gyoshu_install::error::Result;
use gyoshu_install::state::StateStore;

/// Run status command
pub fn run(paths: &PathArgs) -> Result<()> {
    let config = helpers::resolve_config(paths)?;
    let store = StateStore::new(&config.state_path);

    let Some(state) = store.read()? else {
        println!("No install state at {}", store.path().display());
        return Ok(());
    };

    let bold = Style::new().bold();
    println!("{} {}", bold.apply_to("Version:"), state.version);
    println!(
        "{} {}",
        bold.apply_to("Installed:"),
        state.installed_at.to_rfc3339()
    );
    println!("{} ({})", bold.apply_to("Owned files"), state.files.len());
    for file in &state.files {
        println!("  - {file}");
    }

    Ok(())
}
