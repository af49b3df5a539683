//! Platform name → builder lookup

use super::builder::PlatformBuilder;
use super::equinox::{self, EquinoxBuilder};
use super::felix::{self, FelixBuilder};
use super::knopflerfish::{self, KnopflerfishBuilder};
use super::naming::{self, VersionTable};
use crate::error::{Result, platform};

type Factory = fn(&str) -> Result<Box<dyn PlatformBuilder>>;

/// One supported framework
#[derive(Clone, Copy)]
pub struct PlatformDescriptor {
    pub name: &'static str,
    pub display_name: &'static str,
    pub default_version: &'static str,
    pub versions: VersionTable,
    factory: Factory,
}

impl std::fmt::Debug for PlatformDescriptor {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PlatformDescriptor")
            .field("name", &self.name)
            .field("default_version", &self.default_version)
            .finish_non_exhaustive()
    }
}

impl PlatformDescriptor {
    /// Builder for `version`, or the default version
    pub fn create(&self, version: Option<&str>) -> Result<Box<dyn PlatformBuilder>> {
        (self.factory)(version.unwrap_or(self.default_version))
    }
}

/// Registry of all supported frameworks
#[derive(Debug, Clone)]
pub struct PlatformRegistry {
    platforms: Vec<PlatformDescriptor>,
}

impl Default for PlatformRegistry {
    fn default() -> Self {
        Self::new(default_platforms())
    }
}

impl PlatformRegistry {
    pub fn new(platforms: Vec<PlatformDescriptor>) -> Self {
        Self { platforms }
    }

    /// Descriptor for `name` (case-insensitive)
    pub fn get(&self, name: &str) -> Option<&PlatformDescriptor> {
        let name = name.trim().to_ascii_lowercase();
        let name = match name.as_str() {
            "kf" => knopflerfish::NAME,
            "eclipse" => equinox::NAME,
            other => other,
        };
        self.platforms.iter().find(|p| p.name == name)
    }

    /// Builder for `name` at `version`
    pub fn create(&self, name: &str, version: Option<&str>) -> Result<Box<dyn PlatformBuilder>> {
        self.get(name)
            .ok_or_else(|| platform::not_supported(name))?
            .create(version)
    }

    pub fn all(&self) -> &[PlatformDescriptor] {
        &self.platforms
    }
}

/// Equinox, Felix and Knopflerfish
pub fn default_platforms() -> Vec<PlatformDescriptor> {
    vec![
        PlatformDescriptor {
            name: equinox::NAME,
            display_name: "Eclipse Equinox",
            default_version: equinox::DEFAULT_VERSION,
            versions: naming::EQUINOX,
            factory: equinox_builder,
        },
        PlatformDescriptor {
            name: felix::NAME,
            display_name: "Apache Felix",
            default_version: felix::DEFAULT_VERSION,
            versions: naming::FELIX,
            factory: felix_builder,
        },
        PlatformDescriptor {
            name: knopflerfish::NAME,
            display_name: "Knopflerfish",
            default_version: knopflerfish::DEFAULT_VERSION,
            versions: naming::KNOPFLERFISH,
            factory: knopflerfish_builder,
        },
    ]
}

fn equinox_builder(version: &str) -> Result<Box<dyn PlatformBuilder>> {
    Ok(Box::new(EquinoxBuilder::new(version)?))
}

fn felix_builder(version: &str) -> Result<Box<dyn PlatformBuilder>> {
    Ok(Box::new(FelixBuilder::new(version)?))
}

fn knopflerfish_builder(version: &str) -> Result<Box<dyn PlatformBuilder>> {
    Ok(Box::new(KnopflerfishBuilder::new(version)?))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::OsgiRunError;

    #[test]
    fn test_create_each_default() {
        let registry = PlatformRegistry::default();
        for descriptor in registry.all() {
            let builder = descriptor.create(None).unwrap();
            assert_eq!(builder.name(), descriptor.name);
            assert_eq!(builder.version(), descriptor.default_version);
        }
    }

    #[test]
    fn test_lookup_is_case_insensitive_with_aliases() {
        let registry = PlatformRegistry::default();
        assert_eq!(registry.get("Felix").map(|p| p.name), Some("felix"));
        assert_eq!(registry.get("kf").map(|p| p.name), Some("knopflerfish"));
        assert_eq!(registry.get("eclipse").map(|p| p.name), Some("equinox"));
    }

    #[test]
    fn test_unknown_platform() {
        let err = PlatformRegistry::default().create("concierge", None).unwrap_err();
        assert!(matches!(err, OsgiRunError::PlatformNotSupported { .. }));
    }

    #[test]
    fn test_explicit_version() {
        let builder = PlatformRegistry::default()
            .create("felix", Some("1.2.1"))
            .unwrap();
        assert_eq!(builder.version(), "1.2.1");

        let err = PlatformRegistry::default()
            .create("felix", Some("0.8"))
            .unwrap_err();
        assert!(matches!(err, OsgiRunError::UnsupportedVersion { .. }));
    }
}
