//! `scan-file`: a text file listing one bundle per line
//!
//! ```text
//! # comments and blank lines are skipped
//! file:/opt/bundles/api.jar@2
//! mvn:org.example/impl/1.0@start
//! lib/relative.jar              <- relative to the list file
//! ${BUNDLES_HOME}/extra.jar     <- placeholders come from the environment
//! ```
//!
//! Options on the `scan-file` specification itself are defaults for every
//! line; options on a line override them.

use std::fs;
use std::path::Path;

use tracing::debug;

use super::{Scanner, ScannerOptions};
use crate::bundle::BundleReference;
use crate::common::location;
use crate::error::{Result, provision};

pub const SCHEME: &str = "scan-file";

/// Scanner reading bundle URLs from a local list file
#[derive(Debug, Clone, Copy, Default)]
pub struct FileScanner;

impl Scanner for FileScanner {
    fn scheme(&self) -> &str {
        SCHEME
    }

    fn scan(&self, payload: &str) -> Result<Vec<BundleReference>> {
        self.scan_with(payload, &|name| std::env::var(name).ok())
    }
}

impl FileScanner {
    /// Scan with an explicit placeholder lookup
    pub fn scan_with(
        &self,
        payload: &str,
        lookup: &dyn Fn(&str) -> Option<String>,
    ) -> Result<Vec<BundleReference>> {
        let (target, defaults) = ScannerOptions::split(payload);
        let path = location::to_local_path(target).ok_or_else(|| {
            provision::scanner_failed(SCHEME, target, "only local list files are supported")
        })?;
        let content = fs::read_to_string(&path)
            .map_err(|e| provision::scanner_failed(SCHEME, target, e.to_string()))?;
        let base = path.parent().unwrap_or_else(|| Path::new(""));

        let mut bundles = Vec::new();
        for (number, line) in content.lines().enumerate() {
            let line = line.trim();
            if line.is_empty() || line.starts_with('#') {
                continue;
            }
            let expanded = expand_placeholders(line, lookup).map_err(|name| {
                provision::scanner_failed(
                    SCHEME,
                    target,
                    format!("line {}: unresolved placeholder ${{{name}}}", number + 1),
                )
            })?;
            let (bundle, options) = ScannerOptions::split(&expanded);
            let bundle_location = resolve_relative(bundle, base);
            debug!(location = %bundle_location, "scanned list entry");
            bundles.push(options.or(defaults).reference(bundle_location));
        }

        Ok(bundles)
    }
}

/// Relative plain paths are taken relative to the list file's directory
fn resolve_relative(entry: &str, base: &Path) -> String {
    if location::has_scheme(entry) || Path::new(entry).is_absolute() || entry.starts_with('/') {
        return entry.to_string();
    }
    base.join(entry).to_string_lossy().replace('\\', "/")
}

/// Replace every `${name}` in `line`; the error carries the first unknown name
pub(super) fn expand_placeholders(
    line: &str,
    lookup: &dyn Fn(&str) -> Option<String>,
) -> std::result::Result<String, String> {
    let mut out = String::with_capacity(line.len());
    let mut rest = line;
    while let Some(start) = rest.find("${") {
        out.push_str(&rest[..start]);
        let after = &rest[start + 2..];
        let Some(end) = after.find('}') else {
            // Unterminated: keep verbatim
            out.push_str(&rest[start..]);
            return Ok(out);
        };
        let name = &after[..end];
        let value = lookup(name).ok_or_else(|| name.to_string())?;
        out.push_str(&value);
        rest = &after[end + 1..];
    }
    out.push_str(rest);
    Ok(out)
}
