//! File system errors

use std::path::Path;

use super::OsgiRunError;

/// Creates a file not found error
pub fn not_found(path: impl Into<String>) -> OsgiRunError {
    OsgiRunError::FileNotFound { path: path.into() }
}

/// Creates a file read error for `path`
pub fn read_failed(path: &Path, err: &std::io::Error) -> OsgiRunError {
    OsgiRunError::FileReadFailed {
        path: path.display().to_string(),
        reason: err.to_string(),
    }
}

/// Creates a file write error for `path`
pub fn write_failed(path: &Path, err: &std::io::Error) -> OsgiRunError {
    OsgiRunError::FileWriteFailed {
        path: path.display().to_string(),
        reason: err.to_string(),
    }
}
