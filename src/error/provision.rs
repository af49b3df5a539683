//! Provisioning specification and scanner errors

use super::OsgiRunError;

/// Creates a malformed specification error
pub fn malformed(spec: impl Into<String>, reason: impl Into<String>) -> OsgiRunError {
    OsgiRunError::MalformedSpecification {
        spec: spec.into(),
        reason: reason.into(),
    }
}

/// Creates an unsupported scheme error
pub fn unsupported_schema(scheme: impl Into<String>) -> OsgiRunError {
    OsgiRunError::UnsupportedSchema {
        scheme: scheme.into(),
    }
}

/// Creates a scanner failure
pub fn scanner_failed(
    scheme: impl Into<String>,
    target: impl Into<String>,
    reason: impl Into<String>,
) -> OsgiRunError {
    OsgiRunError::Scanner {
        scheme: scheme.into(),
        target: target.into(),
        reason: reason.into(),
    }
}

/// Creates an artifact not found error
pub fn artifact_not_found(
    coordinates: impl Into<String>,
    repository: impl Into<String>,
) -> OsgiRunError {
    OsgiRunError::ArtifactNotFound {
        coordinates: coordinates.into(),
        repository: repository.into(),
    }
}
