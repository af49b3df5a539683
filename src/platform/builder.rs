//! The per-framework builder contract
//!
//! A builder turns a [`PlatformContext`] into the framework's bootstrap
//! configuration and the command line that launches it. Builders hold no
//! state besides their version, so equal contexts give identical output.

use std::path::PathBuf;

use tracing::{debug, info};

use super::context::PlatformContext;
use crate::bundle::BundleReference;
use crate::common::fs;
use crate::error::{Result, platform};

/// Framework-specific rendering and launch details
pub trait PlatformBuilder: std::fmt::Debug + Send + Sync {
    /// Registry name, e.g. `felix`
    fn name(&self) -> &str;

    /// Framework version this builder renders for
    fn version(&self) -> &str;

    /// Entry point class of the framework
    fn main_class_name(&self) -> &str;

    /// `mvn:` coordinates of the framework jar
    fn framework_artifact(&self) -> String;

    /// Directory holding the framework's persisted state
    fn storage_directory(&self, context: &PlatformContext) -> PathBuf;

    /// The bootstrap file written by [`prepare`](Self::prepare)
    fn config_file(&self, context: &PlatformContext) -> PathBuf;

    /// Full content of the bootstrap file
    ///
    /// Pure: no filesystem access.
    fn render(&self, context: &PlatformContext) -> Result<String>;

    /// Ordered arguments for the main class
    fn arguments(&self, context: &PlatformContext) -> Vec<String>;

    /// JVM options the framework needs
    fn vm_options(&self, context: &PlatformContext) -> Vec<String>;

    /// Profile that must be provisioned alongside the user's bundles
    fn required_profile(&self, context: &PlatformContext) -> Option<String>;

    /// Write the bootstrap configuration under the working directory
    ///
    /// The file is rendered in memory first; if rendering fails nothing on
    /// disk changes. With `use_persisted_state` explicitly `false` the
    /// storage directory is deleted before the file is written.
    fn prepare(&self, context: &PlatformContext) -> Result<PathBuf> {
        let content = self.render(context)?;

        if context.configuration().use_persisted_state == Some(false) {
            let storage = self.storage_directory(context);
            debug!(storage = %storage.display(), "clearing persisted framework state");
            fs::remove_dir_all_if_exists(&storage).map_err(|e| platform::failed(e.to_string()))?;
        }

        let file = self.config_file(context);
        fs::write_atomic(&file, &content).map_err(|e| platform::failed(e.to_string()))?;
        info!(platform = self.name(), file = %file.display(), "wrote framework configuration");
        Ok(file)
    }
}

/// A bundle as it appears in a configuration file
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BundleEntry {
    pub url: String,
    pub start_level: Option<u32>,
    pub start: bool,
}

/// Render every bundle of `context` in input order
///
/// The start level falls back to the configured bundle start level. A
/// bundle without a location fails the whole rendering.
pub fn bundle_entries(context: &PlatformContext) -> Result<Vec<BundleEntry>> {
    let default_level = context.configuration().bundle_start_level;
    context
        .bundles()
        .iter()
        .enumerate()
        .map(|(index, bundle)| entry(context, index, bundle, default_level))
        .collect()
}

fn entry(
    context: &PlatformContext,
    index: usize,
    bundle: &BundleReference,
    default_level: Option<u32>,
) -> Result<BundleEntry> {
    let location = bundle.location().ok_or_else(|| {
        platform::failed(format!(
            "bundle #{} has no location ({bundle})",
            index + 1
        ))
    })?;
    Ok(BundleEntry {
        url: context.url(location),
        start_level: bundle.start_level().or(default_level),
        start: bundle.should_start() == Some(true),
    })
}

/// Whether `context` asks for a clean start
pub fn is_clean(context: &PlatformContext) -> bool {
    context.configuration().use_persisted_state == Some(false)
}
