//! CLI definitions using clap derive API

use clap::builder::{Styles, styling::AnsiColor};
use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

/// Gyoshu - research automation for OpenCode
///
/// Installs the Gyoshu agents, commands and skills into the OpenCode
/// configuration directory without touching files you have customized.
#[derive(Parser, Debug)]
#[command(
    name = "gyoshu",
    author,
    version,
    color = clap::ColorChoice::Auto,
    styles = Styles::styled()
        .header(AnsiColor::Green.on_default().bold())
        .usage(AnsiColor::Green.on_default().bold())
        .literal(AnsiColor::Cyan.on_default().bold())
        .placeholder(AnsiColor::Cyan.on_default()),
    about = "Install Gyoshu into your OpenCode configuration",
    long_about = "Gyoshu installs its agents, commands and skills into the OpenCode \
                  configuration directory. Files it installed are tracked and kept up to \
                  date; files you created or customized are never overwritten.",
    after_help = "\x1b[1m\x1b[32mExamples:\x1b[0m\n    \
                  gyoshu install\n    \
                  gyoshu install --json\n    \
                  gyoshu check\n    \
                  gyoshu status\n    \
                  gyoshu --root ./opencode install"
)]
pub struct Cli {
    #[command(flatten)]
    pub paths: PathArgs,

    /// Enable verbose output
    #[arg(long, short = 'v', global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Commands,
}

/// Locations shared by all commands
#[derive(Args, Debug, Clone, Default)]
pub struct PathArgs {
    /// OpenCode configuration directory (defaults to ~/.config/opencode)
    #[arg(long, short = 'r', global = true, env = "OPENCODE_CONFIG_DIR")]
    pub root: Option<PathBuf>,

    /// Directory holding the bundled assets
    #[arg(long, short = 's', global = true, env = "GYOSHU_SOURCE_DIR")]
    pub source: Option<PathBuf>,

    /// Manifest file to use instead of the built-in one
    #[arg(long, short = 'm', global = true)]
    pub manifest: Option<PathBuf>,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Install or update Gyoshu files
    Install(InstallArgs),

    /// Verify installation status
    Check(CheckArgs),

    /// Show the recorded install state
    Status,

    /// Show version information
    Version,

    /// Generate shell completions
    Completions(CompletionsArgs),
}

/// Arguments for the install command
#[derive(Parser, Debug)]
#[command(after_help = "EXAMPLES:\n  \
                  Install into ~/.config/opencode:\n    gyoshu install\n\n\
                  Install into another directory:\n    gyoshu install --root ./opencode\n\n\
                  Print the run summary as JSON:\n    gyoshu install --json")]
pub struct InstallArgs {
    /// Print the run summary as JSON
    #[arg(long)]
    pub json: bool,
}

/// Arguments for the check command
#[derive(Parser, Debug)]
#[command(after_help = "EXAMPLES:\n  \
                  Check the installation:\n    gyoshu check\n\n\
                  Machine-readable report:\n    gyoshu check --json")]
pub struct CheckArgs {
    /// Print the report as JSON
    #[arg(long)]
    pub json: bool,
}

/// Arguments for completions command
#[derive(Parser, Debug)]
#[command(after_help = "EXAMPLES:\n  \
                  Generate bash completions:\n    gyoshu completions bash > ~/.bash_completion.d/gyoshu\n\n\
                  Generate zsh completions:\n    gyoshu completions zsh > ~/.zfunc/_gyoshu\n\n\
                  Generate fish completions:\n    gyoshu completions fish > ~/.config/fish/completions/gyoshu.fish\n\n\
                  Generate PowerShell completions:\n    gyoshu completions powershell")]
pub struct CompletionsArgs {
    /// Shell type (bash, elvish, fish, powershell, zsh)
    pub shell: String,
}
