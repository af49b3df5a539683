//! osgirun - OSGi framework launcher
//!
//! Resolves bundle specifications, writes the bootstrap configuration of
//! Equinox, Felix or Knopflerfish and launches the framework.

use clap::Parser;
use tracing_subscriber::EnvFilter;

mod bundle;
mod cli;
mod commands;
mod common;
mod config;
mod container;
mod error;
mod launcher;
mod platform;
mod progress;
mod provision;
#[cfg(test)]
mod temp;

use cli::{Cli, Commands};

/// Log to stderr; `RUST_LOG` wins over `--verbose`
fn init_logging(verbose: bool) {
    let default = if verbose { "osgirun=debug" } else { "osgirun=warn" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .try_init();
}

fn main() {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    let config = cli.config.as_deref();
    let result = match cli.command {
        Commands::Run(args) => commands::run::run(config, args),
        Commands::Prepare(args) => commands::prepare::run(config, args).map(|()| 0),
        Commands::Scan(args) => commands::scan::run(args).map(|()| 0),
        Commands::Deploy(args) => commands::deploy::run(config, args).map(|()| 0),
        Commands::Platforms => commands::platforms::run().map(|()| 0),
        Commands::Version => commands::version::run().map(|()| 0),
        Commands::Completions(args) => commands::completions::run(args).map(|()| 0),
    };

    match result {
        Ok(code) => std::process::exit(code),
        Err(e) => {
            eprintln!("Error: {e}");
            std::process::exit(1);
        }
    }
}
