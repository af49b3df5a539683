//! Command implementations for the osgirun CLI

pub mod completions;
pub mod deploy;
pub mod helpers;
pub mod platforms;
pub mod prepare;
pub mod run;
pub mod scan;
pub mod version;
