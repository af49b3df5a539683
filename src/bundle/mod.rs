//! Bundle model and installation lifecycle
//!
//! - `reference.rs`: BundleReference, the immutable bundle descriptor
//! - `installable.rs`: InstallableBundle state machine
//! - `installables.rs`: InstallableBundles two-pass bulk install

pub mod installable;
pub mod installables;
pub mod reference;

pub use installable::{InstallableBundle, LifecycleState};
pub use installables::InstallableBundles;
pub use reference::BundleReference;
