//! `osgirun.yaml` launch file
//!
//! ```yaml
//! platform: equinox
//! version: "3.18"
//! provision:
//!   - scan-dir:bundles
//!   - mvn:org.example/app/1.0@start
//! profiles:
//!   web: [ "mvn:org.apache.felix/org.apache.felix.http.jetty/4.2.0@start" ]
//! properties:
//!   org.osgi.service.http.port: "8080"
//! options:
//!   start_level: 10
//! ```

use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use tracing::debug;

use super::options::LaunchOptions;
use crate::error::{Result, config};

/// Launch file name looked up in the current directory
pub const LAUNCH_FILE: &str = "osgirun.yaml";

/// Contents of an `osgirun.yaml`
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct LaunchFile {
    pub platform: Option<String>,
    pub version: Option<String>,
    pub provision: Vec<String>,
    pub profiles: BTreeMap<String, Vec<String>>,
    pub properties: BTreeMap<String, String>,
    pub options: LaunchOptions,
}

impl LaunchFile {
    /// Parse YAML content; `origin` names the source in errors
    pub fn from_yaml(content: &str, origin: &str) -> Result<Self> {
        if content.trim().is_empty() {
            return Ok(Self::default());
        }
        serde_yaml::from_str(content).map_err(|e| config::parse_failed(origin, e.to_string()))
    }

    /// Load an explicit file; a missing file is an error
    pub fn load(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Err(crate::error::fs::not_found(path.display().to_string()));
        }
        let content =
            fs::read_to_string(path).map_err(|e| crate::error::fs::read_failed(path, &e))?;
        debug!(path = %path.display(), "loaded launch file");
        Self::from_yaml(&content, &path.display().to_string())
    }

    /// Load `osgirun.yaml` from `dir` if it exists
    pub fn discover(dir: &Path) -> Result<Option<(PathBuf, Self)>> {
        let path = dir.join(LAUNCH_FILE);
        if !path.is_file() {
            return Ok(None);
        }
        Self::load(&path).map(|file| Some((path, file)))
    }

    /// Options of the file, with the top-level `platform`/`version` shorthands
    pub fn launch_options(&self) -> LaunchOptions {
        LaunchOptions {
            platform: self.platform.clone(),
            platform_version: self.version.clone(),
            ..LaunchOptions::default()
        }
        .or(self.options.clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::OsgiRunError;
    use tempfile::TempDir;

    #[test]
    fn test_full_file() {
        let file = LaunchFile::from_yaml(
            r#"
platform: equinox
version: "3.18"
provision:
  - scan-dir:bundles
  - mvn:org.example/app/1.0@start
profiles:
  web: [ "scan-bundle:mvn:org.example/web/1.0" ]
properties:
  org.osgi.service.http.port: "8080"
options:
  start_level: 10
  console: false
"#,
            "test",
        )
        .unwrap();

        assert_eq!(file.provision.len(), 2);
        assert_eq!(file.profiles["web"].len(), 1);
        assert_eq!(file.properties["org.osgi.service.http.port"], "8080");

        let options = file.launch_options();
        assert_eq!(options.platform.as_deref(), Some("equinox"));
        assert_eq!(options.platform_version.as_deref(), Some("3.18"));
        assert_eq!(options.start_level, Some(10));
        assert_eq!(options.console, Some(false));
    }

    #[test]
    fn test_top_level_platform_wins_over_options() {
        let file =
            LaunchFile::from_yaml("platform: felix\noptions:\n  platform: equinox\n", "t").unwrap();
        assert_eq!(file.launch_options().platform.as_deref(), Some("felix"));
    }

    #[test]
    fn test_empty_content_is_default() {
        assert_eq!(LaunchFile::from_yaml("  \n", "t").unwrap(), LaunchFile::default());
    }

    #[test]
    fn test_unknown_key_is_parse_error() {
        let err = LaunchFile::from_yaml("platfrom: felix\n", "osgirun.yaml").unwrap_err();
        assert!(matches!(err, OsgiRunError::ConfigParseFailed { path, .. } if path == "osgirun.yaml"));
    }

    #[test]
    fn test_discover() {
        let temp = TempDir::new_in(crate::temp::temp_dir_base()).unwrap();
        assert!(LaunchFile::discover(temp.path()).unwrap().is_none());

        fs::write(temp.path().join(LAUNCH_FILE), "platform: knopflerfish\n").unwrap();
        let (path, file) = LaunchFile::discover(temp.path()).unwrap().unwrap();
        assert!(path.ends_with(LAUNCH_FILE));
        assert_eq!(file.platform.as_deref(), Some("knopflerfish"));
    }
}
