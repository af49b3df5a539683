//! Error types and handling for osgirun
//!
//! Uses `thiserror` for error definitions and `miette` for pretty diagnostics.
//!
//! This module is organized into sub-modules by error domain:
//! - [`provision`]: Specification parsing and scanner errors
//! - [`bundle`]: Bundle lifecycle errors
//! - [`platform`]: Configuration rendering and launch errors
//! - [`config`]: Configuration file and option errors
//! - [`fs`]: File system errors

pub mod bundle;
pub mod config;
pub mod fs;
pub mod platform;
pub mod provision;


use miette::Diagnostic;
use thiserror::Error;

/// Main error type for osgirun operations
#[derive(Error, Diagnostic, Debug)]
pub enum OsgiRunError {
    // Provisioning errors
    #[error("Malformed provisioning specification '{spec}': {reason}")]
    #[diagnostic(
        code(osgirun::provision::malformed_spec),
        help("Specifications have the form <scheme>:<payload>, e.g. scan-bundle:file:/tmp/a.jar")
    )]
    MalformedSpecification { spec: String, reason: String },

    #[error("Unsupported provisioning scheme: {scheme}")]
    #[diagnostic(
        code(osgirun::provision::unsupported_schema),
        help("Supported schemes: scan-bundle, scan-dir, scan-file, scan-pom")
    )]
    UnsupportedSchema { scheme: String },

    #[error("Scanner '{scheme}' failed for '{target}': {reason}")]
    #[diagnostic(code(osgirun::provision::scanner_failed))]
    Scanner {
        scheme: String,
        target: String,
        reason: String,
    },

    #[error("Artifact '{coordinates}' not found in local repository {repository}")]
    #[diagnostic(
        code(osgirun::provision::artifact_not_found),
        help("Download the artifact into the local repository (e.g. mvn dependency:get) or set --local-repository")
    )]
    ArtifactNotFound {
        coordinates: String,
        repository: String,
    },

    // Bundle lifecycle errors
    #[error("Bundle lifecycle operation '{operation}' failed for {location}: {reason}")]
    #[diagnostic(code(osgirun::bundle::lifecycle_failed))]
    BundleLifecycle {
        operation: String,
        location: String,
        reason: String,
    },

    // Platform errors
    #[error("Platform error: {message}")]
    #[diagnostic(code(osgirun::platform::failed))]
    Platform { message: String },

    #[error("Platform not supported: {platform}")]
    #[diagnostic(
        code(osgirun::platform::not_supported),
        help("Supported platforms: equinox, felix, knopflerfish")
    )]
    PlatformNotSupported { platform: String },

    #[error("Platform '{platform}' does not support version '{version}'")]
    #[diagnostic(
        code(osgirun::platform::unsupported_version),
        help("Run 'osgirun platforms' to list supported versions")
    )]
    UnsupportedVersion { platform: String, version: String },

    #[error("Failed to launch '{program}': {reason}")]
    #[diagnostic(
        code(osgirun::platform::process_failed),
        help("Check that a Java runtime is installed or set JAVA_HOME")
    )]
    ProcessFailed { program: String, reason: String },

    // Configuration errors
    #[error("Failed to parse configuration file {path}: {reason}")]
    #[diagnostic(code(osgirun::config::parse_failed))]
    ConfigParseFailed { path: String, reason: String },

    #[error("Invalid configuration: {message}")]
    #[diagnostic(code(osgirun::config::invalid))]
    ConfigInvalid { message: String },

    // File system errors
    #[error("File not found: {path}")]
    #[diagnostic(code(osgirun::fs::not_found))]
    FileNotFound { path: String },

    #[error("Failed to read file {path}: {reason}")]
    #[diagnostic(code(osgirun::fs::read_failed))]
    FileReadFailed { path: String, reason: String },

    #[error("Failed to write file {path}: {reason}")]
    #[diagnostic(code(osgirun::fs::write_failed))]
    FileWriteFailed { path: String, reason: String },

    #[error("IO error: {message}")]
    #[diagnostic(code(osgirun::fs::io_error))]
    IoError { message: String },
}

impl From<std::io::Error> for OsgiRunError {
    fn from(err: std::io::Error) -> Self {
        OsgiRunError::IoError {
            message: err.to_string(),
        }
    }
}

impl From<serde_yaml::Error> for OsgiRunError {
    fn from(err: serde_yaml::Error) -> Self {
        OsgiRunError::ConfigParseFailed {
            path: "unknown".to_string(),
            reason: err.to_string(),
        }
    }
}

impl From<serde_json::Error> for OsgiRunError {
    fn from(err: serde_json::Error) -> Self {
        OsgiRunError::ConfigParseFailed {
            path: "unknown".to_string(),
            reason: err.to_string(),
        }
    }
}

/// Result type alias using miette for error handling
pub type Result<T> = miette::Result<T, OsgiRunError>;
