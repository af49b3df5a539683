//! Container seam for bundle installation
//!
//! The provisioning core drives bundles through these traits and never talks
//! to a framework directly:
//! - [`BundleContainer`]: install-by-location
//! - [`InstalledBundle`]: the opaque handle a container returns
//! - [`StartLevelService`]: optional start level assignment
//!
//! [`deploy::DeployDirContainer`] implements the seam for frameworks that
//! watch a hot-deploy directory.

use std::fmt::Debug;
use std::time::SystemTime;

use crate::error::Result;

pub mod deploy;

#[cfg(test)]
pub(crate) mod testing;

pub use deploy::DeployDirContainer;

/// Bundle installation API of a live container
pub trait BundleContainer: Send + Sync {
    /// Install the bundle at `location`, returning a handle to it
    ///
    /// Installing a location that is already installed returns the existing
    /// bundle.
    fn install(&self, location: &str) -> Result<Box<dyn InstalledBundle>>;
}

/// Handle to a bundle installed in a container
pub trait InstalledBundle: Debug + Send + Sync {
    /// Location the bundle was installed from
    fn location(&self) -> &str;

    /// Time the installed bundle was last modified
    fn last_modified(&self) -> SystemTime;

    /// Re-read the bundle from its location
    fn update(&self) -> Result<()>;

    /// Start the bundle
    fn start(&self) -> Result<()>;
}

/// Start level assignment capability
pub trait StartLevelService: Send + Sync {
    fn set_bundle_start_level(&self, bundle: &dyn InstalledBundle, level: u32) -> Result<()>;
}
