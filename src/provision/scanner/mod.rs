//! Scanners turn one provisioning scheme into bundle references
//!
//! - `bundle.rs`: `scan-bundle`, a single bundle URL
//! - `file.rs`: `scan-file`, a text file listing bundle URLs
//! - `dir.rs`: `scan-dir`, every matching file under a directory
//! - `pom.rs`: `scan-pom`, the dependencies of a Maven POM
//! - `options.rs`: `@`-options shared by all of the above

use crate::bundle::BundleReference;
use crate::error::Result;

pub mod bundle;
pub mod dir;
pub mod file;
pub mod options;
pub mod pom;

pub use bundle::BundleScanner;
pub use dir::DirScanner;
pub use file::FileScanner;
pub use options::ScannerOptions;
pub use pom::PomScanner;

/// Parses the payload of one specification scheme into bundle references
pub trait Scanner: Send + Sync {
    /// Scheme this scanner is registered under by default
    fn scheme(&self) -> &str;

    /// Scan `payload` (the part of the specification after `<scheme>:`)
    fn scan(&self, payload: &str) -> Result<Vec<BundleReference>>;
}

/// The scanners registered by default
pub fn default_scanners() -> Vec<Box<dyn Scanner>> {
    vec![
        Box::new(BundleScanner),
        Box::new(DirScanner),
        Box::new(FileScanner),
        Box::new(PomScanner),
    ]
}
