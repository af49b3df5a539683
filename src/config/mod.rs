//! Configuration for osgirun
//!
//! - `options.rs`: launch options, environment variables and defaults
//! - `file.rs`: the `osgirun.yaml` launch file

pub mod file;
pub mod options;

pub use file::LaunchFile;
pub use options::{Configuration, LaunchOptions};
