//! Shell completions command

use clap::CommandFactory;
use std::io::Write;

use crate::cli::CompletionsArgs;
use gyoshu_install::error::{GyoshuError, Result};

fn parse_shell(name: &str) -> Result<clap_complete::Shell> {
    match name.to_lowercase().as_str() {
        "bash" => Ok(clap_complete::Shell::Bash),
        "elvish" => Ok(clap_complete::Shell::Elvish),
        "fish" => Ok(clap_complete::Shell::Fish),
        "powershell" | "pwsh" => Ok(clap_complete::Shell::PowerShell),
        "zsh" => Ok(clap_complete::Shell::Zsh),
        _ => Err(GyoshuError::UnknownShell {
            shell: name.to_string(),
        }),
    }
}

fn generate(args: &CompletionsArgs, out: &mut dyn Write) -> Result<()> {
    let shell = parse_shell(&args.shell)?;
    let mut cmd = <crate::cli::Cli as CommandFactory>::command();
    clap_complete::generate(shell, &mut cmd, "gyoshu", out);
    Ok(())
}

/// Generate shell completions
pub fn run(args: CompletionsArgs) -> Result<()> {
    generate(&args, &mut std::io::stdout().lock())
}
