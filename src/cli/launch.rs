use clap::{Args, Parser};
use std::path::PathBuf;

use crate::config::LaunchOptions;

/// Arguments for the run command
#[derive(Parser, Debug)]
#[command(after_help = "EXAMPLES:\n  \
                  Launch Felix with a directory of bundles:\n    osgirun run ./bundles/\n\n\
                  Launch Equinox without the console:\n    osgirun run -p equinox --console false app.jar@start\n\n\
                  Print the command line instead of launching:\n    osgirun run --dry-run app.jar")]
pub struct RunArgs {
    #[command(flatten)]
    pub launch: LaunchArgs,

    /// Print the launch command instead of running it
    #[arg(long)]
    pub dry_run: bool,
}

/// Arguments for the prepare command
#[derive(Parser, Debug)]
#[command(after_help = "EXAMPLES:\n  \
                  Write Felix configuration for a POM's dependencies:\n    osgirun prepare scan-pom:pom.xml\n\n\
                  Write Knopflerfish configuration into ./kf:\n    osgirun prepare -p knopflerfish -d kf bundles.txt")]
pub struct PrepareArgs {
    #[command(flatten)]
    pub launch: LaunchArgs,
}

/// Specifications plus launch options
#[derive(Args, Debug)]
pub struct LaunchArgs {
    /// Provisioning specifications (`scheme:payload`, a path or an `mvn:` URL)
    pub specs: Vec<String>,

    #[command(flatten)]
    pub options: OptionArgs,
}

/// Command-line launch options; unset flags fall back to the launch file
#[derive(Args, Debug, Default)]
pub struct OptionArgs {
    /// Framework to launch (equinox, felix, knopflerfish)
    #[arg(long, short = 'p')]
    pub platform: Option<String>,

    /// Framework version
    #[arg(long)]
    pub platform_version: Option<String>,

    /// Directory for framework configuration and state
    #[arg(long, short = 'd')]
    pub working_directory: Option<PathBuf>,

    /// Framework start level
    #[arg(long)]
    pub start_level: Option<u32>,

    /// Default start level of provisioned bundles
    #[arg(long)]
    pub bundle_start_level: Option<u32>,

    /// Extra profiles to provision (comma separated)
    #[arg(long, value_delimiter = ',')]
    pub profile: Vec<String>,

    /// Reuse (true) or wipe (false) the framework's persisted state
    #[arg(long, value_name = "BOOL")]
    pub use_persisted_state: Option<bool>,

    /// Packages delegated to the boot class loader (comma separated)
    #[arg(long, value_delimiter = ',')]
    pub boot_delegation: Vec<String>,

    /// Provision the framework's console profile
    #[arg(long, value_name = "BOOL")]
    pub console: Option<bool>,

    /// Suspend the JVM until a debugger attaches
    #[arg(long)]
    pub debug: bool,

    /// Debugger port
    #[arg(long)]
    pub debug_port: Option<u16>,

    /// Java installation to launch with
    #[arg(long)]
    pub java_home: Option<PathBuf>,

    /// Extra JVM option (repeatable)
    #[arg(long = "vm-option", allow_hyphen_values = true)]
    pub vm_options: Vec<String>,

    /// Value of org.osgi.framework.system.packages
    #[arg(long)]
    pub system_packages: Option<String>,

    /// Value of org.osgi.framework.executionenvironment
    #[arg(long)]
    pub execution_environment: Option<String>,

    /// Maven repository used to resolve mvn: locations
    #[arg(long)]
    pub local_repository: Option<PathBuf>,

    /// Framework jar (defaults to the local repository copy)
    #[arg(long)]
    pub framework_jar: Option<PathBuf>,
}

impl OptionArgs {
    /// Only the options given on the command line
    pub fn to_launch_options(&self) -> LaunchOptions {
        let list = |values: &Vec<String>| (!values.is_empty()).then(|| values.clone());
        LaunchOptions {
            platform: self.platform.clone(),
            platform_version: self.platform_version.clone(),
            working_directory: self.working_directory.clone(),
            start_level: self.start_level,
            bundle_start_level: self.bundle_start_level,
            profile: list(&self.profile),
            use_persisted_state: self.use_persisted_state,
            boot_delegation: list(&self.boot_delegation),
            console: self.console,
            debug: self.debug.then_some(true),
            debug_port: self.debug_port,
            java_home: self.java_home.clone(),
            vm_options: list(&self.vm_options),
            system_packages: self.system_packages.clone(),
            execution_environment: self.execution_environment.clone(),
            local_repository: self.local_repository.clone(),
            framework_jar: self.framework_jar.clone(),
        }
    }
}
