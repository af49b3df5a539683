//! Named bundle sets added on top of the user's bundles

use std::collections::BTreeMap;

use crate::error::{Result, platform};

const GOGO: &[&str] = &[
    "scan-bundle:mvn:org.apache.felix/org.apache.felix.gogo.runtime/1.1.6@start",
    "scan-bundle:mvn:org.apache.felix/org.apache.felix.gogo.command/1.1.2@start",
    "scan-bundle:mvn:org.apache.felix/org.apache.felix.gogo.shell/1.1.4@start",
];

const EQUINOX_CONSOLE: &[&str] = &[
    "scan-bundle:mvn:org.apache.felix/org.apache.felix.gogo.runtime/1.1.6@start",
    "scan-bundle:mvn:org.apache.felix/org.apache.felix.gogo.command/1.1.2@start",
    "scan-bundle:mvn:org.apache.felix/org.apache.felix.gogo.shell/1.1.4@start",
    "scan-bundle:mvn:org.eclipse.platform/org.eclipse.equinox.console/1.4.500@start",
];

/// Profile name → provisioning specifications
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Profiles {
    profiles: BTreeMap<String, Vec<String>>,
}

impl Default for Profiles {
    fn default() -> Self {
        Self::builtin()
    }
}

impl Profiles {
    /// `gogo` and `equinox-console`
    pub fn builtin() -> Self {
        let to_specs = |specs: &[&str]| specs.iter().map(|s| (*s).to_string()).collect();
        let mut profiles = BTreeMap::new();
        profiles.insert("gogo".to_string(), to_specs(GOGO));
        profiles.insert("equinox-console".to_string(), to_specs(EQUINOX_CONSOLE));
        Self { profiles }
    }

    /// Add or replace profiles
    #[must_use]
    pub fn with_overrides(mut self, overrides: &BTreeMap<String, Vec<String>>) -> Self {
        for (name, specs) in overrides {
            self.profiles.insert(name.clone(), specs.clone());
        }
        self
    }

    /// Specifications of `name`
    pub fn specs(&self, name: &str) -> Result<&[String]> {
        self.profiles
            .get(name)
            .map(Vec::as_slice)
            .ok_or_else(|| {
                platform::failed(format!(
                    "unknown profile '{name}' (known: {})",
                    self.names().join(", ")
                ))
            })
    }

    pub fn names(&self) -> Vec<&str> {
        self.profiles.keys().map(String::as_str).collect()
    }
}
