//! Gyoshu - research automation for OpenCode
//!
//! Command line installer that copies the Gyoshu agents, commands and skills
//! into the OpenCode configuration directory.

use clap::Parser;
use tracing_subscriber::{EnvFilter, fmt, prelude::*};

mod cli;
mod commands;

use cli::{Cli, Commands};

/// Environment variable holding a `tracing` filter directive
const LOG_ENV: &str = "GYOSHU_LOG";

fn init_tracing(verbose: bool) {
    let filter = if verbose {
        "warn,gyoshu_install=debug"
    } else {
        "warn"
    };

    let env_filter = EnvFilter::try_from_env(LOG_ENV).unwrap_or_else(|_| EnvFilter::new(filter));

    tracing_subscriber::registry()
        .with(env_filter)
        .with(fmt::layer().with_writer(std::io::stderr))
        .init();
}

fn main() {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    let result = match cli.command {
        Commands::Install(args) => commands::install::run(&cli.paths, args),
        Commands::Check(args) => commands::check::run(&cli.paths, args),
        Commands::Status => commands::status::run(&cli.paths),
        Commands::Version => commands::version::run(),
        Commands::Completions(args) => commands::completions::run(args),
    };

    if let Err(e) = result {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}
