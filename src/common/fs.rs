//! Common file system operations with unified error handling

use std::fs;
use std::io::Write;
use std::path::Path;

use tempfile::NamedTempFile;

use crate::error::{Result, fs as fs_error};

/// Ensure parent directory exists for a path
pub fn ensure_parent_dir(path: &Path) -> Result<()> {
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            fs::create_dir_all(parent).map_err(|e| fs_error::write_failed(parent, &e))?;
        }
    }
    Ok(())
}

/// Write `content` to `target` all-or-nothing
///
/// The content goes to a temporary file next to the target which is then
/// renamed over it, so readers see either the old or the new file.
pub fn write_atomic(target: &Path, content: &str) -> Result<()> {
    ensure_parent_dir(target)?;
    let dir = target
        .parent()
        .filter(|p| !p.as_os_str().is_empty())
        .unwrap_or_else(|| Path::new("."));

    let mut temp = NamedTempFile::new_in(dir).map_err(|e| fs_error::write_failed(target, &e))?;
    temp.write_all(content.as_bytes())
        .and_then(|()| temp.flush())
        .map_err(|e| fs_error::write_failed(target, &e))?;
    temp.persist(target)
        .map_err(|e| fs_error::write_failed(target, &e.error))?;
    Ok(())
}

/// Remove `dir` and everything below it; a missing directory is fine
pub fn remove_dir_all_if_exists(dir: &Path) -> Result<()> {
    match fs::remove_dir_all(dir) {
        Ok(()) => Ok(()),
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(()),
        Err(e) => Err(fs_error::write_failed(dir, &e)),
    }
}
