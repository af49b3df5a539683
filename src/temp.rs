//! Base directory for test scratch space
//!
//! Framework working directories created by tests must never land inside the
//! source tree, which happens when `TMPDIR` is relative.

use std::env;
use std::path::PathBuf;

/// Absolute directory to create temporary working directories in
pub fn temp_dir_base() -> PathBuf {
    let base = env::temp_dir();
    if base.is_absolute() {
        return base;
    }
    fallback()
}

#[cfg(windows)]
fn fallback() -> PathBuf {
    ["TEMP", "TMP"]
        .iter()
        .find_map(|name| env::var_os(name).map(PathBuf::from))
        .filter(|p| p.is_absolute())
        .unwrap_or_else(|| PathBuf::from(r"C:\Windows\Temp"))
}

#[cfg(not(windows))]
fn fallback() -> PathBuf {
    PathBuf::from("/tmp")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_base_is_absolute() {
        assert!(temp_dir_base().is_absolute());
    }
}
