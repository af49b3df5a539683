//! CLI definitions using clap derive API
//!
//! Argument types live in submodules:
//! - launch: run and prepare arguments plus the shared launch options
//! - scan: scan command arguments
//! - deploy: deploy command arguments
//! - completions: completions command arguments

use clap::builder::{Styles, styling::AnsiColor};
use clap::{Parser, Subcommand};
use std::path::PathBuf;

pub mod completions;
pub mod deploy;
pub mod launch;
pub mod scan;

pub use completions::CompletionsArgs;
pub use deploy::DeployArgs;
pub use launch::{OptionArgs, PrepareArgs, RunArgs};
pub use scan::ScanArgs;

/// osgirun - OSGi framework launcher
///
/// Provision bundles and launch Equinox, Felix or Knopflerfish.
#[derive(Parser, Debug)]
#[command(
    name = "osgirun",
    author,
    version,
    color = clap::ColorChoice::Auto,
    styles = Styles::styled()
        .header(AnsiColor::Green.on_default().bold())
        .usage(AnsiColor::Green.on_default().bold())
        .literal(AnsiColor::Cyan.on_default().bold())
        .placeholder(AnsiColor::Cyan.on_default()),
    about = "Provision bundles and launch an OSGi framework",
    long_about = "osgirun resolves bundle specifications (jars, directories, list files, \
                  Maven POMs), writes the framework's bootstrap configuration and launches \
                  an OSGi framework (Equinox, Felix or Knopflerfish) with those bundles installed.",
    after_help = "\x1b[1m\x1b[32mExamples:\x1b[0m\n   \
                  osgirun run ./bundles/                     \x1b[90m# Launch Felix with every jar in ./bundles\x1b[0m\n   \
                  osgirun run -p equinox app.jar@start       \x1b[90m# Launch Equinox and start app.jar\x1b[0m\n   \
                  osgirun prepare scan-pom:pom.xml           \x1b[90m# Write configuration only\x1b[0m\n   \
                  osgirun scan scan-dir:lib!/*.jar --json    \x1b[90m# Show what a specification provides\x1b[0m\n   \
                  osgirun deploy --to load/ bundles.txt      \x1b[90m# Copy bundles into a watched directory\x1b[0m\n\n\
                  "
)]
pub struct Cli {
    /// Launch file (defaults to ./osgirun.yaml when present)
    #[arg(long, short = 'c', global = true, env = "OSGIRUN_CONFIG")]
    pub config: Option<PathBuf>,

    /// Enable verbose output
    #[arg(long, short = 'v', global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Provision bundles and launch the framework
    Run(RunArgs),

    /// Provision bundles and write the framework configuration
    Prepare(PrepareArgs),

    /// Show the bundles a specification provides
    Scan(ScanArgs),

    /// Install bundles into a hot-deploy directory
    Deploy(DeployArgs),

    /// List supported frameworks
    Platforms,

    /// Show version information
    #[command(hide = true)]
    Version,

    /// Generate shell completions
    Completions(CompletionsArgs),
}
