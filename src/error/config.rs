//! Configuration errors

use super::OsgiRunError;

/// Creates a configuration parse error
pub fn parse_failed(path: impl Into<String>, reason: impl Into<String>) -> OsgiRunError {
    OsgiRunError::ConfigParseFailed {
        path: path.into(),
        reason: reason.into(),
    }
}

/// Creates an invalid configuration error
pub fn invalid(message: impl Into<String>) -> OsgiRunError {
    OsgiRunError::ConfigInvalid {
        message: message.into(),
    }
}
