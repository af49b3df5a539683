//! Launch options and their resolution
//!
//! [`LaunchOptions`] is a partial set of options from one source (command
//! line, `osgirun.yaml`, environment). Sources are layered with
//! [`LaunchOptions::or`] and finally [`LaunchOptions::resolve`]d into a
//! [`Configuration`], filling the gaps with compiled-in defaults.

use std::path::PathBuf;

use serde::{Deserialize, Serialize};

use crate::error::{Result, config};

/// Prefix of every environment variable read by [`LaunchOptions::from_env`]
pub const ENV_PREFIX: &str = "OSGIRUN_";

pub const DEFAULT_PLATFORM: &str = "felix";
pub const DEFAULT_WORKING_DIRECTORY: &str = "runner";
pub const DEFAULT_START_LEVEL: u32 = 6;
pub const DEFAULT_BUNDLE_START_LEVEL: u32 = 5;
pub const DEFAULT_DEBUG_PORT: u16 = 5005;

/// Options from a single source; `None` means "not set here"
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct LaunchOptions {
    pub platform: Option<String>,
    pub platform_version: Option<String>,
    pub working_directory: Option<PathBuf>,
    pub start_level: Option<u32>,
    pub bundle_start_level: Option<u32>,
    pub profile: Option<Vec<String>>,
    pub use_persisted_state: Option<bool>,
    pub boot_delegation: Option<Vec<String>>,
    pub console: Option<bool>,
    pub debug: Option<bool>,
    pub debug_port: Option<u16>,
    pub java_home: Option<PathBuf>,
    pub vm_options: Option<Vec<String>>,
    pub system_packages: Option<String>,
    pub execution_environment: Option<String>,
    pub local_repository: Option<PathBuf>,
    pub framework_jar: Option<PathBuf>,
}

/// Fully resolved options for one run
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Configuration {
    pub platform: String,
    pub platform_version: Option<String>,
    pub working_directory: PathBuf,
    pub start_level: Option<u32>,
    pub bundle_start_level: Option<u32>,
    pub profiles: Vec<String>,
    pub use_persisted_state: Option<bool>,
    pub boot_delegation: Vec<String>,
    pub console: bool,
    pub debug: bool,
    pub debug_port: u16,
    pub java_home: Option<PathBuf>,
    pub vm_options: Vec<String>,
    pub system_packages: Option<String>,
    pub execution_environment: Option<String>,
    pub local_repository: Option<PathBuf>,
    pub framework_jar: Option<PathBuf>,
}

impl Default for Configuration {
    fn default() -> Self {
        LaunchOptions::default().resolve()
    }
}

impl LaunchOptions {
    /// Options of `self`, falling back to `other` field by field
    #[must_use]
    pub fn or(self, other: Self) -> Self {
        Self {
            platform: self.platform.or(other.platform),
            platform_version: self.platform_version.or(other.platform_version),
            working_directory: self.working_directory.or(other.working_directory),
            start_level: self.start_level.or(other.start_level),
            bundle_start_level: self.bundle_start_level.or(other.bundle_start_level),
            profile: self.profile.or(other.profile),
            use_persisted_state: self.use_persisted_state.or(other.use_persisted_state),
            boot_delegation: self.boot_delegation.or(other.boot_delegation),
            console: self.console.or(other.console),
            debug: self.debug.or(other.debug),
            debug_port: self.debug_port.or(other.debug_port),
            java_home: self.java_home.or(other.java_home),
            vm_options: self.vm_options.or(other.vm_options),
            system_packages: self.system_packages.or(other.system_packages),
            execution_environment: self.execution_environment.or(other.execution_environment),
            local_repository: self.local_repository.or(other.local_repository),
            framework_jar: self.framework_jar.or(other.framework_jar),
        }
    }

    /// Options from the process environment
    pub fn from_env() -> Result<Self> {
        Self::from_env_with(|name| std::env::var(name).ok())
    }

    /// Options from an arbitrary variable lookup
    ///
    /// Variables are `OSGIRUN_<OPTION>`; blank values count as unset.
    /// `JAVA_HOME` is consulted after `OSGIRUN_JAVA_HOME`.
    pub fn from_env_with(lookup: impl Fn(&str) -> Option<String>) -> Result<Self> {
        let var = |option: &str| {
            lookup(&format!("{ENV_PREFIX}{}", option.to_ascii_uppercase()))
                .map(|v| v.trim().to_string())
                .filter(|v| !v.is_empty())
        };

        Ok(Self {
            platform: var("platform"),
            platform_version: var("platform_version"),
            working_directory: var("working_directory").map(PathBuf::from),
            start_level: parse_number("start_level", var("start_level"))?,
            bundle_start_level: parse_number("bundle_start_level", var("bundle_start_level"))?,
            profile: var("profile").map(|v| split_list(&v, ',')),
            use_persisted_state: parse_bool("use_persisted_state", var("use_persisted_state"))?,
            boot_delegation: var("boot_delegation").map(|v| split_list(&v, ',')),
            console: parse_bool("console", var("console"))?,
            debug: parse_bool("debug", var("debug"))?,
            debug_port: parse_number("debug_port", var("debug_port"))?,
            java_home: var("java_home")
                .or_else(|| lookup("JAVA_HOME").filter(|v| !v.trim().is_empty()))
                .map(PathBuf::from),
            vm_options: var("vm_options").map(|v| split_list(&v, ' ')),
            system_packages: var("system_packages"),
            execution_environment: var("execution_environment"),
            local_repository: var("local_repository").map(PathBuf::from),
            framework_jar: var("framework_jar").map(PathBuf::from),
        })
    }

    /// Apply compiled-in defaults
    pub fn resolve(self) -> Configuration {
        Configuration {
            platform: self
                .platform
                .map(|p| p.to_ascii_lowercase())
                .unwrap_or_else(|| DEFAULT_PLATFORM.to_string()),
            platform_version: self.platform_version,
            working_directory: self
                .working_directory
                .unwrap_or_else(|| PathBuf::from(DEFAULT_WORKING_DIRECTORY)),
            start_level: Some(self.start_level.unwrap_or(DEFAULT_START_LEVEL)),
            bundle_start_level: Some(
                self.bundle_start_level
                    .unwrap_or(DEFAULT_BUNDLE_START_LEVEL),
            ),
            profiles: self.profile.unwrap_or_default(),
            use_persisted_state: self.use_persisted_state,
            boot_delegation: self.boot_delegation.unwrap_or_default(),
            console: self.console.unwrap_or(true),
            debug: self.debug.unwrap_or(false),
            debug_port: self.debug_port.unwrap_or(DEFAULT_DEBUG_PORT),
            java_home: self.java_home,
            vm_options: self.vm_options.unwrap_or_default(),
            system_packages: self.system_packages,
            execution_environment: self.execution_environment,
            local_repository: self
                .local_repository
                .or_else(crate::provision::LocalRepository::default_root),
            framework_jar: self.framework_jar,
        }
    }
}

fn split_list(value: &str, separator: char) -> Vec<String> {
    value
        .split(separator)
        .map(str::trim)
        .filter(|item| !item.is_empty())
        .map(str::to_string)
        .collect()
}

fn parse_bool(option: &str, value: Option<String>) -> Result<Option<bool>> {
    let Some(value) = value else {
        return Ok(None);
    };
    match value.to_ascii_lowercase().as_str() {
        "true" | "yes" | "on" | "1" => Ok(Some(true)),
        "false" | "no" | "off" | "0" => Ok(Some(false)),
        _ => Err(config::invalid(format!(
            "{ENV_PREFIX}{}: expected a boolean, got '{value}'",
            option.to_ascii_uppercase()
        ))),
    }
}

fn parse_number<T: std::str::FromStr>(option: &str, value: Option<String>) -> Result<Option<T>> {
    let Some(value) = value else {
        return Ok(None);
    };
    value.parse().map(Some).map_err(|_| {
        config::invalid(format!(
            "{ENV_PREFIX}{}: expected a number, got '{value}'",
            option.to_ascii_uppercase()
        ))
    })
}
