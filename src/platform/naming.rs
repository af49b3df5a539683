//! Framework versions and the property names each version understands
//!
//! Property names moved between framework releases (Felix 1.4 adopted the
//! OSGi R4.2 storage keys, Knopflerfish 3 did the same). Each framework has a
//! [`VersionTable`]; the row with the highest minimum version not above the
//! requested version supplies the [`PropertyNames`].

use std::cmp::Ordering;
use std::fmt;

use crate::error::{Result, platform};

/// Dotted numeric version; qualifiers such as `.v20120529` are ignored
#[derive(Debug, Clone)]
pub struct Version(Vec<u32>);

impl Version {
    /// Parse `3.8.0.v20120529`, `7.0.5`, `6`
    ///
    /// Parsing stops at the first segment that does not start with a digit.
    /// The first segment must be numeric.
    pub fn parse(input: &str) -> Option<Self> {
        let mut parts = Vec::new();
        for segment in input.trim().split(['.', '-']) {
            let digits: String = segment.chars().take_while(char::is_ascii_digit).collect();
            if digits.is_empty() {
                break;
            }
            parts.push(digits.parse().ok()?);
            if digits.len() != segment.len() {
                break;
            }
        }
        (!parts.is_empty()).then_some(Self(parts))
    }

    pub fn from_parts(parts: &[u32]) -> Self {
        Self(parts.to_vec())
    }

    /// Check `self >= minimum`
    pub fn at_least(&self, minimum: &[u32]) -> bool {
        self.cmp(&Self::from_parts(minimum)) != Ordering::Less
    }
}

impl Ord for Version {
    fn cmp(&self, other: &Self) -> Ordering {
        let len = self.0.len().max(other.0.len());
        (0..len)
            .map(|i| {
                let a = self.0.get(i).copied().unwrap_or(0);
                let b = other.0.get(i).copied().unwrap_or(0);
                a.cmp(&b)
            })
            .find(|ordering| *ordering != Ordering::Equal)
            .unwrap_or(Ordering::Equal)
    }
}

impl PartialEq for Version {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl Eq for Version {}

impl PartialOrd for Version {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl fmt::Display for Version {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let parts: Vec<String> = self.0.iter().map(u32::to_string).collect();
        write!(f, "{}", parts.join("."))
    }
}

/// Version-specific property keys
///
/// `None` means the version has no such property; the builder then uses a
/// command-line form or omits the setting.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PropertyNames {
    pub storage: Option<&'static str>,
    pub framework_start_level: Option<&'static str>,
    pub bundle_start_level: Option<&'static str>,
    /// Key and value that ask the framework to start with empty storage
    pub clean: Option<(&'static str, &'static str)>,
}

/// `(minimum version, names)` rows in ascending order
#[derive(Debug, Clone, Copy)]
pub struct VersionTable {
    pub platform: &'static str,
    pub rows: &'static [(&'static [u32], PropertyNames)],
}

impl VersionTable {
    /// Names for `version`
    pub fn select(&self, version: &str) -> Result<&'static PropertyNames> {
        let parsed = Version::parse(version)
            .ok_or_else(|| platform::unsupported_version(self.platform, version))?;
        self.rows
            .iter()
            .rev()
            .find(|(minimum, _)| parsed.at_least(minimum))
            .map(|(_, names)| names)
            .ok_or_else(|| platform::unsupported_version(self.platform, version))
    }

    /// Lowest supported version
    pub fn minimum(&self) -> Option<Version> {
        self.rows.first().map(|(minimum, _)| Version::from_parts(minimum))
    }
}

pub const EQUINOX: VersionTable = VersionTable {
    platform: "equinox",
    rows: &[(
        &[3, 0],
        PropertyNames {
            storage: None,
            framework_start_level: Some("osgi.startLevel"),
            bundle_start_level: Some("osgi.bundles.defaultStartLevel"),
            clean: Some(("osgi.clean", "true")),
        },
    )],
};

pub const FELIX: VersionTable = VersionTable {
    platform: "felix",
    rows: &[
        (
            &[1, 0],
            PropertyNames {
                storage: Some("felix.cache.profiledir"),
                framework_start_level: Some("org.osgi.framework.startlevel"),
                bundle_start_level: Some("felix.startlevel.bundle"),
                clean: None,
            },
        ),
        (
            &[1, 4],
            PropertyNames {
                storage: Some("org.osgi.framework.storage"),
                framework_start_level: Some("org.osgi.framework.startlevel.beginning"),
                bundle_start_level: Some("felix.startlevel.bundle"),
                clean: Some(("org.osgi.framework.storage.clean", "onFirstInit")),
            },
        ),
    ],
};

pub const KNOPFLERFISH: VersionTable = VersionTable {
    platform: "knopflerfish",
    rows: &[
        (
            &[2, 0],
            PropertyNames {
                storage: Some("org.osgi.framework.dir"),
                framework_start_level: None,
                bundle_start_level: None,
                clean: None,
            },
        ),
        (
            &[3, 0],
            PropertyNames {
                storage: Some("org.osgi.framework.storage"),
                framework_start_level: None,
                bundle_start_level: None,
                clean: None,
            },
        ),
    ],
};
