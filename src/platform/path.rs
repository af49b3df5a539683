//! Path and URL rendering for configuration files
//!
//! Builders never format paths themselves; they ask the context's
//! [`PathStrategy`]. [`AbsolutePathStrategy`] is used for real launches,
//! [`RelativePathStrategy`] renders everything relative to a base directory
//! so output does not depend on where a test runs.

use std::fmt::Debug;
use std::path::{Component, Path, PathBuf};

use normpath::PathExt;

use crate::common::location;

/// Converts filesystem paths and bundle locations into rendered strings
pub trait PathStrategy: Debug + Send + Sync {
    /// Render `path` as a filesystem path with forward slashes
    fn normalize_as_path(&self, path: &Path) -> String;

    /// Render `bundle_location` as a URL
    ///
    /// Locations with a non-`file` scheme are returned unchanged.
    fn normalize_as_url(&self, bundle_location: &str) -> String;
}

/// Absolute, symlink-resolved paths and `file:` URLs
#[derive(Debug, Clone, Copy, Default)]
pub struct AbsolutePathStrategy;

impl AbsolutePathStrategy {
    /// Make `path` absolute and resolve it as far as it exists
    ///
    /// For paths that do not exist yet the longest existing ancestor is
    /// resolved and the remaining components are appended.
    pub fn absolute(path: &Path) -> PathBuf {
        let path = if path.is_absolute() {
            path.to_path_buf()
        } else {
            match std::env::current_dir() {
                Ok(cwd) => cwd.join(path),
                Err(_) => return lexical(path),
            }
        };

        if let Ok(norm) = path.normalize() {
            return dunce::simplified(norm.as_path()).to_path_buf();
        }

        let mut existing = path.as_path();
        let mut missing = Vec::new();
        while !existing.exists() {
            match (existing.file_name(), existing.parent()) {
                (Some(name), Some(parent)) => {
                    missing.push(name);
                    existing = parent;
                }
                _ => return lexical(&path),
            }
        }

        let mut resolved = existing
            .normalize()
            .map(|norm| dunce::simplified(norm.as_path()).to_path_buf())
            .unwrap_or_else(|_| existing.to_path_buf());
        for name in missing.iter().rev() {
            resolved.push(name);
        }
        lexical(&resolved)
    }
}

impl PathStrategy for AbsolutePathStrategy {
    fn normalize_as_path(&self, path: &Path) -> String {
        forward_slashes(&Self::absolute(path))
    }

    fn normalize_as_url(&self, bundle_location: &str) -> String {
        if is_remote(bundle_location) {
            return bundle_location.to_string();
        }
        match location::to_local_path(bundle_location) {
            Some(path) => location::file_url(&Self::absolute(&path)),
            None => bundle_location.to_string(),
        }
    }
}

/// Paths relative to a base directory
///
/// Paths outside the base are rendered unchanged (with forward slashes).
#[allow(dead_code)] // used in tests
#[derive(Debug, Clone)]
pub struct RelativePathStrategy {
    base: PathBuf,
}

#[allow(dead_code)]
impl RelativePathStrategy {
    pub fn new(base: impl Into<PathBuf>) -> Self {
        Self { base: base.into() }
    }

    fn relative(&self, path: &Path) -> String {
        let path = if path.is_absolute() {
            lexical(path)
        } else {
            lexical(&self.base.join(path))
        };
        match path.strip_prefix(lexical(&self.base)) {
            Ok(rel) if rel.as_os_str().is_empty() => ".".to_string(),
            Ok(rel) => forward_slashes(rel),
            Err(_) => forward_slashes(&path),
        }
    }
}

impl PathStrategy for RelativePathStrategy {
    fn normalize_as_path(&self, path: &Path) -> String {
        self.relative(path)
    }

    fn normalize_as_url(&self, bundle_location: &str) -> String {
        if is_remote(bundle_location) {
            return bundle_location.to_string();
        }
        match location::to_local_path(bundle_location) {
            Some(path) => format!("file:{}", self.relative(&path)),
            None => bundle_location.to_string(),
        }
    }
}

/// Any scheme but `file:`
fn is_remote(bundle_location: &str) -> bool {
    location::scheme(bundle_location).is_some_and(|scheme| !scheme.eq_ignore_ascii_case("file"))
}

fn forward_slashes(path: &Path) -> String {
    path.to_string_lossy().replace('\\', "/")
}

/// Drop `.` and fold `..` without touching the filesystem
fn lexical(path: &Path) -> PathBuf {
    let mut out = PathBuf::new();
    for component in path.components() {
        match component {
            Component::CurDir => {}
            Component::ParentDir => {
                if !out.pop() {
                    out.push("..");
                }
            }
            other => out.push(other.as_os_str()),
        }
    }
    out
}
