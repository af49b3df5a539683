//! Helpers for bundle locations
//!
//! A location is either a URL (`file:/a.jar`, `mvn:g/a/v`, `http://...`) or a
//! plain filesystem path. Windows drive letters (`C:\...`) are paths, not
//! schemes, so a scheme needs at least two characters.

use std::path::{Path, PathBuf};

/// Return the URL scheme of `location`, if it has one
pub fn scheme(location: &str) -> Option<&str> {
    let (candidate, _) = location.split_once(':')?;
    let valid = candidate.len() >= 2
        && candidate
            .chars()
            .next()
            .is_some_and(|c| c.is_ascii_alphabetic())
        && candidate
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || matches!(c, '+' | '-' | '.'));
    valid.then_some(candidate)
}

/// Check if `location` carries a URL scheme
pub fn has_scheme(location: &str) -> bool {
    scheme(location).is_some()
}

/// Local filesystem path of a `file:` URL or plain path
///
/// Returns `None` for any other scheme.
pub fn to_local_path(location: &str) -> Option<PathBuf> {
    if let Some(rest) = location.strip_prefix("file:") {
        let rest = rest.strip_prefix("//").unwrap_or(rest);
        return Some(PathBuf::from(strip_windows_root_slash(rest)));
    }
    if has_scheme(location) {
        return None;
    }
    Some(PathBuf::from(location))
}

/// Render a path as a `file:` URL with forward slashes
pub fn file_url(path: &Path) -> String {
    let rendered = path.to_string_lossy().replace('\\', "/");
    if rendered.starts_with('/') || rendered.is_empty() {
        format!("file:{rendered}")
    } else if path.is_absolute() {
        // C:/x -> file:/C:/x
        format!("file:/{rendered}")
    } else {
        format!("file:{rendered}")
    }
}

/// `/C:/x` -> `C:/x`
fn strip_windows_root_slash(rest: &str) -> &str {
    let bytes = rest.as_bytes();
    if bytes.len() >= 3 && bytes[0] == b'/' && bytes[1].is_ascii_alphabetic() && bytes[2] == b':' {
        &rest[1..]
    } else {
        rest
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_scheme_detection() {
        assert_eq!(scheme("file:/a.jar"), Some("file"));
        assert_eq!(scheme("mvn:org.example/a/1.0"), Some("mvn"));
        assert_eq!(scheme("scan-bundle:file:/a.jar"), Some("scan-bundle"));
        assert_eq!(scheme("http://host/a.jar"), Some("http"));
        assert_eq!(scheme("C:\\bundles\\a.jar"), None);
        assert_eq!(scheme("bundles/a.jar"), None);
        assert_eq!(scheme("1x:foo"), None);
    }

    #[test]
    fn test_to_local_path() {
        assert_eq!(to_local_path("file:/tmp/a.jar"), Some(PathBuf::from("/tmp/a.jar")));
        assert_eq!(
            to_local_path("file:///tmp/a.jar"),
            Some(PathBuf::from("/tmp/a.jar"))
        );
        assert_eq!(to_local_path("file:/C:/a.jar"), Some(PathBuf::from("C:/a.jar")));
        assert_eq!(to_local_path("bundles/a.jar"), Some(PathBuf::from("bundles/a.jar")));
        assert_eq!(to_local_path("http://host/a.jar"), None);
        assert_eq!(to_local_path("mvn:g/a/1"), None);
    }

    #[test]
    fn test_file_url() {
        assert_eq!(file_url(Path::new("/tmp/a.jar")), "file:/tmp/a.jar");
        assert_eq!(file_url(Path::new("bundles/a.jar")), "file:bundles/a.jar");
    }
}
