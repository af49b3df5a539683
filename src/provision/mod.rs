//! Provisioning: from specification strings to bundle references
//!
//! - `spec.rs`: `<scheme>:<payload>` parsing
//! - `scanner/`: one scanner per scheme
//! - `service.rs`: the scheme → scanner registry
//! - `resolver.rs`: scheme inference for bare locations
//! - `maven.rs`: `mvn:` coordinates and the local repository

pub mod maven;
pub mod resolver;
pub mod scanner;
pub mod service;
pub mod spec;

pub use maven::{LocalRepository, MavenCoordinates};
pub use resolver::ExtensionBasedSchemaResolver;
pub use scanner::Scanner;
pub use service::ProvisionService;
