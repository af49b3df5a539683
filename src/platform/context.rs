//! Everything a platform builder renders from

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use super::path::{AbsolutePathStrategy, PathStrategy};
use crate::bundle::BundleReference;
use crate::config::Configuration;

/// Input of one `prepare` call
///
/// Builders only ever see `&PlatformContext`, so bundles and properties are
/// fixed while a builder renders.
#[derive(Debug, Clone)]
pub struct PlatformContext {
    working_directory: PathBuf,
    bundles: Vec<BundleReference>,
    system_packages: Option<String>,
    execution_environment: Option<String>,
    properties: BTreeMap<String, String>,
    path_strategy: Arc<dyn PathStrategy>,
    configuration: Configuration,
}

impl PlatformContext {
    /// Context for `configuration` with no bundles and absolute paths
    pub fn new(configuration: Configuration) -> Self {
        Self {
            working_directory: configuration.working_directory.clone(),
            bundles: Vec::new(),
            system_packages: configuration.system_packages.clone(),
            execution_environment: configuration.execution_environment.clone(),
            properties: BTreeMap::new(),
            path_strategy: Arc::new(AbsolutePathStrategy),
            configuration,
        }
    }

    #[must_use]
    pub fn with_working_directory(mut self, dir: impl Into<PathBuf>) -> Self {
        self.working_directory = dir.into();
        self
    }

    #[must_use]
    pub fn with_bundles(mut self, bundles: impl IntoIterator<Item = BundleReference>) -> Self {
        self.bundles.extend(bundles);
        self
    }

    #[must_use]
    pub fn with_property(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.properties.insert(key.into(), value.into());
        self
    }

    #[must_use]
    pub fn with_properties<K, V>(mut self, properties: impl IntoIterator<Item = (K, V)>) -> Self
    where
        K: Into<String>,
        V: Into<String>,
    {
        self.properties
            .extend(properties.into_iter().map(|(k, v)| (k.into(), v.into())));
        self
    }

    #[must_use]
    pub fn with_path_strategy(mut self, strategy: Arc<dyn PathStrategy>) -> Self {
        self.path_strategy = strategy;
        self
    }

    #[must_use]
    pub fn with_system_packages(mut self, packages: impl Into<String>) -> Self {
        self.system_packages = Some(packages.into());
        self
    }

    #[must_use]
    pub fn with_execution_environment(mut self, environment: impl Into<String>) -> Self {
        self.execution_environment = Some(environment.into());
        self
    }

    pub fn working_directory(&self) -> &Path {
        &self.working_directory
    }

    pub fn bundles(&self) -> &[BundleReference] {
        &self.bundles
    }

    pub fn system_packages(&self) -> Option<&str> {
        self.system_packages.as_deref()
    }

    pub fn execution_environment(&self) -> Option<&str> {
        self.execution_environment.as_deref()
    }

    /// Caller properties, in key order
    pub fn properties(&self) -> &BTreeMap<String, String> {
        &self.properties
    }

    pub fn path_strategy(&self) -> &dyn PathStrategy {
        self.path_strategy.as_ref()
    }

    pub fn configuration(&self) -> &Configuration {
        &self.configuration
    }

    /// Rendered path of `path`
    pub fn path(&self, path: &Path) -> String {
        self.path_strategy.normalize_as_path(path)
    }

    /// Rendered URL of a bundle location
    pub fn url(&self, bundle_location: &str) -> String {
        self.path_strategy.normalize_as_url(bundle_location)
    }
}
