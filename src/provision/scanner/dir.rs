//! `scan-dir`: every matching file under a directory or inside a zip archive
//!
//! Payload is `dir[!/glob][@options]`. The glob is matched against paths
//! relative to `dir` with forward slashes and defaults to `**/*.jar`. When
//! `dir` is a local `.zip`, entry names are matched instead and each match is
//! provisioned as `jar:file:/archive.zip!/entry`.

use std::fs::File;
use std::path::Path;

use tracing::debug;
use walkdir::WalkDir;
use wax::{CandidatePath, Glob, Pattern};
use zip::ZipArchive;

use super::{Scanner, ScannerOptions};
use crate::bundle::BundleReference;
use crate::common::location;
use crate::error::{Result, provision};

pub const SCHEME: &str = "scan-dir";

const DEFAULT_GLOB: &str = "**/*.jar";

/// Scanner provisioning the files of a local directory or archive
#[derive(Debug, Clone, Copy, Default)]
pub struct DirScanner;

impl Scanner for DirScanner {
    fn scheme(&self) -> &str {
        SCHEME
    }

    fn scan(&self, payload: &str) -> Result<Vec<BundleReference>> {
        let (target, options) = ScannerOptions::split(payload);
        let (dir, pattern) = match target.split_once("!/") {
            Some((dir, pattern)) if !pattern.trim().is_empty() => (dir, pattern.trim()),
            Some((dir, _)) => (dir, DEFAULT_GLOB),
            None => (target, DEFAULT_GLOB),
        };

        let glob = Glob::new(pattern).map_err(|e| {
            provision::scanner_failed(SCHEME, target, format!("invalid glob '{pattern}': {e}"))
        })?;

        let is_archive = dir.to_ascii_lowercase().ends_with(".zip");
        let Some(root) = location::to_local_path(dir) else {
            let reason = if is_archive {
                "remote archives are not supported; download the archive first"
            } else {
                "only local directories are supported"
            };
            return Err(provision::scanner_failed(SCHEME, target, reason));
        };

        let locations = if is_archive && !root.is_dir() {
            scan_archive(&root, &glob, target)?
        } else {
            scan_directory(&root, &glob, target)?
        };
        debug!(root = %root.display(), pattern, count = locations.len(), "scanned");

        Ok(locations
            .into_iter()
            .map(|location| options.reference(location))
            .collect())
    }
}

/// `file:` URLs of matching files, sorted by relative path
fn scan_directory(root: &Path, glob: &Glob<'_>, target: &str) -> Result<Vec<String>> {
    if !root.is_dir() {
        return Err(provision::scanner_failed(
            SCHEME,
            target,
            format!("directory not found: {}", root.display()),
        ));
    }

    let mut matched = Vec::new();
    for entry in WalkDir::new(root).follow_links(true) {
        let entry = entry.map_err(|e| provision::scanner_failed(SCHEME, target, e.to_string()))?;
        if !entry.file_type().is_file() {
            continue;
        }
        let Ok(relative) = entry.path().strip_prefix(root) else {
            continue;
        };
        let relative = relative.to_string_lossy().replace('\\', "/");
        if glob.matched(&CandidatePath::from(relative.as_str())).is_some() {
            matched.push((relative, entry.into_path()));
        }
    }
    matched.sort_by(|a, b| a.0.cmp(&b.0));

    Ok(matched.into_iter().map(|(_, path)| file_url(&path)).collect())
}

/// `jar:` URLs of matching archive entries, sorted by entry name
fn scan_archive(archive: &Path, glob: &Glob<'_>, target: &str) -> Result<Vec<String>> {
    let file = File::open(archive).map_err(|e| {
        provision::scanner_failed(
            SCHEME,
            target,
            format!("cannot open archive {}: {e}", archive.display()),
        )
    })?;
    let zip = ZipArchive::new(file).map_err(|e| {
        provision::scanner_failed(
            SCHEME,
            target,
            format!("cannot read archive {}: {e}", archive.display()),
        )
    })?;

    let mut entries: Vec<&str> = zip
        .file_names()
        .filter(|name| !name.ends_with('/'))
        .filter(|name| glob.matched(&CandidatePath::from(*name)).is_some())
        .collect();
    entries.sort_unstable();

    let base = file_url(archive);
    Ok(entries
        .into_iter()
        .map(|entry| format!("jar:{base}!/{entry}"))
        .collect())
}

fn file_url(path: &Path) -> String {
    let absolute = dunce::canonicalize(path).unwrap_or_else(|_| path.to_path_buf());
    location::file_url(&absolute)
}
