use clap::Parser;
use std::path::PathBuf;

/// Arguments for the deploy command
#[derive(Parser, Debug)]
#[command(after_help = "EXAMPLES:\n  \
                  Deploy a bundle list into Felix FileInstall's directory:\n    osgirun deploy --to load bundles.txt\n\n\
                  Refresh stale copies:\n    osgirun deploy --to load lib/@update")]
pub struct DeployArgs {
    /// Hot-deploy directory watched by the framework
    #[arg(long)]
    pub to: PathBuf,

    /// Provisioning specifications
    pub specs: Vec<String>,

    /// Start bundles that do not say otherwise
    #[arg(long)]
    pub start: bool,

    /// Maven repository used to resolve mvn: locations
    #[arg(long)]
    pub local_repository: Option<PathBuf>,
}
