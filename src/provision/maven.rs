//! `mvn:` coordinates and the local Maven repository
//!
//! Only artifacts already present in the local repository resolve; nothing
//! is downloaded.

use std::path::{Path, PathBuf};

use tracing::debug;

use crate::common::location;
use crate::error::{Result, provision};

/// `mvn:group/artifact/version[/type[/classifier]]`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MavenCoordinates {
    pub group_id: String,
    pub artifact_id: String,
    pub version: String,
    pub kind: String,
    pub classifier: Option<String>,
}

impl MavenCoordinates {
    /// Parse a `mvn:` location
    ///
    /// A repository prefix (`mvn:http://repo!g/a/v`) is accepted and ignored.
    pub fn parse(location: &str) -> Result<Self> {
        let rest = location
            .strip_prefix("mvn:")
            .ok_or_else(|| provision::malformed(location, "not a mvn: location"))?;
        let rest = rest.rsplit_once('!').map_or(rest, |(_, coords)| coords);

        let parts: Vec<&str> = rest.split('/').map(str::trim).collect();
        let non_empty = |i: usize| parts.get(i).copied().filter(|p| !p.is_empty());

        let (Some(group_id), Some(artifact_id)) = (non_empty(0), non_empty(1)) else {
            return Err(provision::malformed(location, "expected group/artifact/version"));
        };
        let version = non_empty(2)
            .ok_or_else(|| provision::malformed(location, "a version is required"))?;
        if parts.len() > 5 {
            return Err(provision::malformed(location, "too many coordinate segments"));
        }

        Ok(Self {
            group_id: group_id.to_string(),
            artifact_id: artifact_id.to_string(),
            version: version.to_string(),
            kind: non_empty(3).unwrap_or("jar").to_string(),
            classifier: non_empty(4).map(str::to_string),
        })
    }

    /// Path of the artifact relative to a repository root
    pub fn repository_path(&self) -> PathBuf {
        let extension = if self.kind == "bundle" { "jar" } else { &self.kind };
        let file = match &self.classifier {
            Some(classifier) => format!(
                "{}-{}-{classifier}.{extension}",
                self.artifact_id, self.version
            ),
            None => format!("{}-{}.{extension}", self.artifact_id, self.version),
        };

        let mut path: PathBuf = self.group_id.split('.').collect();
        path.push(&self.artifact_id);
        path.push(&self.version);
        path.push(file);
        path
    }
}

impl std::fmt::Display for MavenCoordinates {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "mvn:{}/{}/{}", self.group_id, self.artifact_id, self.version)?;
        if self.kind != "jar" || self.classifier.is_some() {
            write!(f, "/{}", self.kind)?;
        }
        if let Some(classifier) = &self.classifier {
            write!(f, "/{classifier}")?;
        }
        Ok(())
    }
}

/// A local Maven repository such as `~/.m2/repository`
#[derive(Debug, Clone)]
pub struct LocalRepository {
    root: PathBuf,
}

impl LocalRepository {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    /// `~/.m2/repository`, if a home directory is known
    pub fn default_root() -> Option<PathBuf> {
        dirs::home_dir().map(|home| home.join(".m2").join("repository"))
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Local file of `coordinates`
    pub fn artifact(&self, coordinates: &MavenCoordinates) -> Result<PathBuf> {
        let path = self.root.join(coordinates.repository_path());
        if path.is_file() {
            Ok(path)
        } else {
            Err(provision::artifact_not_found(
                coordinates.to_string(),
                self.root.display().to_string(),
            ))
        }
    }

    /// Map a `mvn:` (or `wrap:mvn:`) location to a `file:` URL
    ///
    /// Other locations are returned unchanged.
    pub fn resolve(&self, bundle_location: &str) -> Result<String> {
        if let Some(inner) = bundle_location.strip_prefix("wrap:") {
            return Ok(format!("wrap:{}", self.resolve(inner)?));
        }
        if location::scheme(bundle_location) != Some("mvn") {
            return Ok(bundle_location.to_string());
        }

        let coordinates = MavenCoordinates::parse(bundle_location)?;
        let path = self.artifact(&coordinates)?;
        debug!(%coordinates, path = %path.display(), "resolved from local repository");
        Ok(location::file_url(&path))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::OsgiRunError;
    use std::fs;
    use tempfile::TempDir;

    #[test]
    fn test_parse_coordinates() {
        let c = MavenCoordinates::parse("mvn:org.apache.felix/org.apache.felix.main/7.0.5").unwrap();
        assert_eq!(c.group_id, "org.apache.felix");
        assert_eq!(c.artifact_id, "org.apache.felix.main");
        assert_eq!(c.version, "7.0.5");
        assert_eq!(c.kind, "jar");
        assert_eq!(c.classifier, None);

        let c = MavenCoordinates::parse("mvn:http://repo.example!g/a/1/zip/dist").unwrap();
        assert_eq!(c.kind, "zip");
        assert_eq!(c.classifier.as_deref(), Some("dist"));
        assert_eq!(c.to_string(), "mvn:g/a/1/zip/dist");
    }

    #[test]
    fn test_parse_rejects_incomplete() {
        for location in ["mvn:", "mvn:g", "mvn:g/a", "mvn:g/a/", "file:/a.jar", "mvn:g/a/1/j/c/x"] {
            assert!(MavenCoordinates::parse(location).is_err(), "{location}");
        }
    }

    #[test]
    fn test_repository_path() {
        let c = MavenCoordinates::parse("mvn:org.example/app/1.0/bundle").unwrap();
        assert_eq!(
            c.repository_path(),
            PathBuf::from("org/example/app/1.0/app-1.0.jar")
        );

        let c = MavenCoordinates::parse("mvn:org.example/app/1.0/jar/tests").unwrap();
        assert_eq!(
            c.repository_path(),
            PathBuf::from("org/example/app/1.0/app-1.0-tests.jar")
        );
    }

    #[test]
    fn test_resolve_present_artifact() {
        let temp = TempDir::new_in(crate::temp::temp_dir_base()).unwrap();
        let jar = temp.path().join("org/example/app/1.0/app-1.0.jar");
        fs::create_dir_all(jar.parent().unwrap()).unwrap();
        fs::write(&jar, b"jar").unwrap();
        let repository = LocalRepository::new(temp.path());

        let url = repository.resolve("mvn:org.example/app/1.0").unwrap();
        assert_eq!(url, location::file_url(&jar));

        let wrapped = repository.resolve("wrap:mvn:org.example/app/1.0").unwrap();
        assert_eq!(wrapped, format!("wrap:{url}"));
    }

    #[test]
    fn test_resolve_missing_artifact() {
        let temp = TempDir::new_in(crate::temp::temp_dir_base()).unwrap();
        let repository = LocalRepository::new(temp.path());

        let err = repository.resolve("mvn:org.example/missing/1.0").unwrap_err();

        assert!(matches!(err, OsgiRunError::ArtifactNotFound { .. }));
    }

    #[test]
    fn test_resolve_passes_other_locations_through() {
        let repository = LocalRepository::new("/nowhere");
        assert_eq!(repository.resolve("file:/a.jar").unwrap(), "file:/a.jar");
        assert_eq!(repository.resolve("http://h/a.jar").unwrap(), "http://h/a.jar");
    }
}
