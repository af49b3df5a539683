//! Framework configuration and launch details
//!
//! This module handles:
//! - The builder contract shared by all frameworks (via `builder`)
//! - Equinox, Felix and Knopflerfish renderers
//! - Version-specific property names (via `naming`)
//! - Builder lookup by name (via `registry`)
//! - Rendering input (via `context`) and path rendering (via `path`)
//! - Named bundle sets (via `profiles`)

pub mod builder;
pub mod context;
pub mod equinox;
pub mod felix;
pub mod knopflerfish;
pub mod naming;
pub mod path;
pub mod profiles;
pub mod properties;
pub mod registry;


pub use builder::PlatformBuilder;
pub use context::PlatformContext;
pub use profiles::Profiles;
pub use registry::PlatformRegistry;
