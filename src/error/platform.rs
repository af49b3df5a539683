//! Platform errors

use super::OsgiRunError;

/// Creates a generic platform error
pub fn failed(message: impl Into<String>) -> OsgiRunError {
    OsgiRunError::Platform {
        message: message.into(),
    }
}

/// Creates a platform not supported error
pub fn not_supported(platform: impl Into<String>) -> OsgiRunError {
    OsgiRunError::PlatformNotSupported {
        platform: platform.into(),
    }
}

/// Creates an unsupported framework version error
pub fn unsupported_version(
    platform: impl Into<String>,
    version: impl Into<String>,
) -> OsgiRunError {
    OsgiRunError::UnsupportedVersion {
        platform: platform.into(),
        version: version.into(),
    }
}

/// Creates a process launch error
pub fn process_failed(program: impl Into<String>, reason: impl Into<String>) -> OsgiRunError {
    OsgiRunError::ProcessFailed {
        program: program.into(),
        reason: reason.into(),
    }
}
