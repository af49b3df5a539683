use clap::Parser;

/// Arguments for the scan command
#[derive(Parser, Debug)]
#[command(after_help = "EXAMPLES:\n  \
                  List the jars under a directory:\n    osgirun scan scan-dir:lib\n\n\
                  Dependencies of a POM as JSON:\n    osgirun scan pom.xml --json")]
pub struct ScanArgs {
    /// Provisioning specification (`scheme:payload`, a path or an `mvn:` URL)
    pub spec: String,

    /// Print bundles as JSON
    #[arg(long)]
    pub json: bool,
}
