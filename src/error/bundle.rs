//! Bundle lifecycle errors

use super::OsgiRunError;

/// Creates a bundle lifecycle error
pub fn lifecycle_failed(
    operation: impl Into<String>,
    location: impl Into<String>,
    reason: impl Into<String>,
) -> OsgiRunError {
    OsgiRunError::BundleLifecycle {
        operation: operation.into(),
        location: location.into(),
        reason: reason.into(),
    }
}

/// Creates the error raised when a bundle reference carries no location
pub fn missing_location(operation: impl Into<String>) -> OsgiRunError {
    lifecycle_failed(operation, "<none>", "bundle reference has no location")
}
