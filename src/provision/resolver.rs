//! Scheme inference for bare paths and URLs
//!
//! | input                                   | scheme        |
//! |-----------------------------------------|---------------|
//! | `scan-*:...` or a registered scheme     | unchanged     |
//! | `mvn:...`, `wrap:...`, `*.jar`, `*.bundle` | `scan-bundle` |
//! | `*.pom`, `pom.xml`                      | `scan-pom`    |
//! | `*.zip`, `dir!/glob`, trailing `/`, existing directory, no extension | `scan-dir` |
//! | anything else                           | `scan-file`   |

use std::path::Path;

use super::scanner::{ScannerOptions, bundle, dir, file, pom};
use super::service::ProvisionService;
use crate::common::location;

/// Prefixes a bare location with the scheme its extension implies
#[derive(Debug, Clone, Default)]
pub struct ExtensionBasedSchemaResolver {
    known_schemes: Vec<String>,
}

impl ExtensionBasedSchemaResolver {
    pub fn new() -> Self {
        Self::default()
    }

    /// Resolver that also passes through every scheme registered in `service`
    pub fn for_service(service: &ProvisionService) -> Self {
        Self {
            known_schemes: service.schemes(),
        }
    }

    /// Full specification for `input`
    pub fn resolve(&self, input: &str) -> String {
        let input = input.trim();
        let passthrough = location::scheme(input).is_some_and(|scheme| {
            scheme.starts_with("scan-") || self.known_schemes.iter().any(|s| s == scheme)
        });
        if passthrough {
            return input.to_string();
        }
        format!("{}:{input}", self.infer(input))
    }

    fn infer(&self, input: &str) -> &'static str {
        if matches!(location::scheme(input), Some("mvn" | "wrap")) {
            return bundle::SCHEME;
        }

        let (target, _) = ScannerOptions::split(input);
        if target.contains("!/") || target.ends_with('/') || target.ends_with('\\') {
            return dir::SCHEME;
        }
        if location::to_local_path(target).is_some_and(|p| p.is_dir()) {
            return dir::SCHEME;
        }

        if file_name(target).eq_ignore_ascii_case("pom.xml") {
            return pom::SCHEME;
        }

        match extension(target).map(str::to_ascii_lowercase).as_deref() {
            Some("pom") => pom::SCHEME,
            Some("jar" | "bundle") => bundle::SCHEME,
            Some("zip") | None => dir::SCHEME,
            Some(_) => file::SCHEME,
        }
    }
}

/// Last path segment without query or fragment
fn file_name(target: &str) -> &str {
    let segment = target.rsplit(['/', '\\']).next().unwrap_or(target);
    segment.split(['?', '#']).next().unwrap_or(segment)
}

/// Extension of the last path segment, if any
fn extension(target: &str) -> Option<&str> {
    Path::new(file_name(target)).extension().and_then(|e| e.to_str())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;
    use tempfile::TempDir;

    #[test]
    fn test_extension_table() {
        let resolver = ExtensionBasedSchemaResolver::new();
        let cases = [
            ("file:/a/app.pom", "scan-pom:file:/a/app.pom"),
            ("pom.xml", "scan-pom:pom.xml"),
            ("/project/POM.XML@start", "scan-pom:/project/POM.XML@start"),
            ("http://host/repo/pom.xml", "scan-pom:http://host/repo/pom.xml"),
            ("/conf/felix.xml", "scan-file:/conf/felix.xml"),
            ("/bundles/a.jar", "scan-bundle:/bundles/a.jar"),
            ("http://host/a.bundle", "scan-bundle:http://host/a.bundle"),
            ("mvn:org.example/a/1.0", "scan-bundle:mvn:org.example/a/1.0"),
            ("wrap:file:/lib/plain.jar", "scan-bundle:wrap:file:/lib/plain.jar"),
            ("http://host/archive.zip", "scan-dir:http://host/archive.zip"),
            ("http://host/archive.zip!/", "scan-dir:http://host/archive.zip!/"),
            ("/does/not/exist/", "scan-dir:/does/not/exist/"),
            ("/does/not/exist", "scan-dir:/does/not/exist"),
            ("/lists/bundles.txt", "scan-file:/lists/bundles.txt"),
            ("/a/app.jar@5@start", "scan-bundle:/a/app.jar@5@start"),
        ];
        for (input, expected) in cases {
            assert_eq!(resolver.resolve(input), expected, "input {input}");
        }
    }

    #[test]
    fn test_scan_prefix_passes_through() {
        let resolver = ExtensionBasedSchemaResolver::new();
        assert_eq!(
            resolver.resolve("scan-file:/x/list.txt"),
            "scan-file:/x/list.txt"
        );
        assert_eq!(resolver.resolve("scan-custom:abc"), "scan-custom:abc");
    }

    #[test]
    fn test_registered_scheme_passes_through() {
        struct Custom;
        impl crate::provision::Scanner for Custom {
            fn scheme(&self) -> &str {
                "obr"
            }
            fn scan(&self, _: &str) -> crate::error::Result<Vec<crate::bundle::BundleReference>> {
                Ok(Vec::new())
            }
        }
        let service = ProvisionService::new();
        service.add_scanner("obr", Arc::new(Custom));

        let resolver = ExtensionBasedSchemaResolver::for_service(&service);

        assert_eq!(resolver.resolve("obr:repo/index.xml"), "obr:repo/index.xml");
    }

    #[test]
    fn test_existing_directory_with_dot_is_dir() {
        let temp = TempDir::new_in(crate::temp::temp_dir_base()).unwrap();
        let dir = temp.path().join("bundles.d");
        std::fs::create_dir(&dir).unwrap();
        let input = dir.to_string_lossy().to_string();

        assert_eq!(
            ExtensionBasedSchemaResolver::new().resolve(&input),
            format!("scan-dir:{input}")
        );
    }
}
