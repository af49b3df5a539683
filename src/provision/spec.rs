//! Provisioning specification parsing
//!
//! A specification is `<scheme>:<payload>`. Only the first colon separates
//! the two, so payloads may be URLs (`scan-bundle:file:/a.jar`).

use crate::error::{Result, provision};

/// A parsed `<scheme>:<payload>` specification
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProvisionSpec {
    scheme: String,
    path: String,
}

impl ProvisionSpec {
    /// Parse a specification string
    ///
    /// Blank input, a missing `:` and an empty payload are all malformed.
    pub fn parse(input: &str) -> Result<Self> {
        let trimmed = input.trim();
        if trimmed.is_empty() {
            return Err(provision::malformed(input, "specification is empty"));
        }

        let (scheme, path) = trimmed
            .split_once(':')
            .ok_or_else(|| provision::malformed(trimmed, "missing scheme separator ':'"))?;

        let scheme = scheme.trim();
        if scheme.is_empty() {
            return Err(provision::malformed(trimmed, "scheme is empty"));
        }
        let path = path.trim();
        if path.is_empty() {
            return Err(provision::malformed(trimmed, "payload is empty"));
        }

        Ok(Self {
            scheme: scheme.to_string(),
            path: path.to_string(),
        })
    }

    pub fn scheme(&self) -> &str {
        &self.scheme
    }

    pub fn path(&self) -> &str {
        &self.path
    }
}

impl std::fmt::Display for ProvisionSpec {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}:{}", self.scheme, self.path)
    }
}
