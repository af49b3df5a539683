//! Bundle reference model
//!
//! A [`BundleReference`] describes one bundle to install: where it lives, the
//! start level it wants and whether it should be started or updated. Scanners
//! create references; nothing mutates them afterwards.

use serde::{Deserialize, Serialize};

/// Immutable descriptor of one bundle to install
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct BundleReference {
    /// URI or path of the bundle artifact
    #[serde(skip_serializing_if = "Option::is_none")]
    location: Option<String>,

    /// Desired start level (container default when absent)
    #[serde(skip_serializing_if = "Option::is_none")]
    start_level: Option<u32>,

    /// Start intent (caller default when absent)
    #[serde(skip_serializing_if = "Option::is_none")]
    should_start: Option<bool>,

    /// Force an update of a stale pre-existing install
    #[serde(skip_serializing_if = "Option::is_none")]
    should_update: Option<bool>,
}

impl BundleReference {
    /// Create a reference to the bundle at `location`
    pub fn new(location: impl Into<String>) -> Self {
        Self {
            location: Some(location.into()),
            ..Self::default()
        }
    }

    /// Create a reference that has no location
    ///
    /// Installing or rendering such a reference fails.
    pub fn without_location() -> Self {
        Self::default()
    }

    /// Set the desired start level
    pub fn with_start_level(mut self, level: u32) -> Self {
        self.start_level = Some(level);
        self
    }

    /// Set the start intent
    pub fn with_start(mut self, start: bool) -> Self {
        self.should_start = Some(start);
        self
    }

    /// Set the update intent
    pub fn with_update(mut self, update: bool) -> Self {
        self.should_update = Some(update);
        self
    }

    /// Copy of this reference pointing at a different location
    pub fn relocated(&self, location: impl Into<String>) -> Self {
        Self {
            location: Some(location.into()),
            ..self.clone()
        }
    }

    pub fn location(&self) -> Option<&str> {
        self.location.as_deref()
    }

    pub fn start_level(&self) -> Option<u32> {
        self.start_level
    }

    pub fn should_start(&self) -> Option<bool> {
        self.should_start
    }

    pub fn should_update(&self) -> Option<bool> {
        self.should_update
    }
}

impl std::fmt::Display for BundleReference {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.location.as_deref().unwrap_or("<no location>"))?;
        if let Some(level) = self.start_level {
            write!(f, "@{level}")?;
        }
        match self.should_start {
            Some(true) => write!(f, "@start")?,
            Some(false) => write!(f, "@nostart")?,
            None => {}
        }
        if self.should_update == Some(true) {
            write!(f, "@update")?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_reference_has_only_location() {
        let reference = BundleReference::new("file:/bundles/a.jar");
        assert_eq!(reference.location(), Some("file:/bundles/a.jar"));
        assert_eq!(reference.start_level(), None);
        assert_eq!(reference.should_start(), None);
        assert_eq!(reference.should_update(), None);
    }

    #[test]
    fn test_relocated_keeps_intent() {
        let reference = BundleReference::new("mvn:org.example/a/1.0")
            .with_start_level(3)
            .with_start(true);
        let relocated = reference.relocated("file:/repo/a-1.0.jar");

        assert_eq!(relocated.location(), Some("file:/repo/a-1.0.jar"));
        assert_eq!(relocated.start_level(), Some(3));
        assert_eq!(relocated.should_start(), Some(true));
        assert_eq!(reference.location(), Some("mvn:org.example/a/1.0"));
    }

    #[test]
    fn test_display_includes_options() {
        let reference = BundleReference::new("file:/a.jar")
            .with_start_level(4)
            .with_start(false)
            .with_update(true);
        assert_eq!(reference.to_string(), "file:/a.jar@4@nostart@update");
        assert_eq!(
            BundleReference::without_location().to_string(),
            "<no location>"
        );
    }

    #[test]
    fn test_json_skips_unset_fields() {
        let json = serde_json::to_string(&BundleReference::new("file:/a.jar")).unwrap();
        assert_eq!(json, r#"{"location":"file:/a.jar"}"#);
    }
}
