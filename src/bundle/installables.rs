//! Bulk install-then-start over a list of bundles

use std::sync::Arc;

use tracing::info;

use super::{BundleReference, InstallableBundle};
use crate::container::{BundleContainer, StartLevelService};
use crate::error::Result;

/// An ordered group of [`InstallableBundle`]s installed together
///
/// [`install`](Self::install) runs two passes: every member is installed
/// before any member is started, so bundles that depend on each other are
/// all resolvable by the time the first one starts. The first failure aborts
/// the pass.
#[derive(Debug, Default)]
pub struct InstallableBundles {
    bundles: Vec<InstallableBundle>,
}

impl InstallableBundles {
    pub fn new(bundles: Vec<InstallableBundle>) -> Self {
        Self { bundles }
    }

    /// Bind every reference to `container`
    pub fn wrap(
        references: Vec<BundleReference>,
        container: Arc<dyn BundleContainer>,
        start_levels: Option<Arc<dyn StartLevelService>>,
        default_start: bool,
    ) -> Self {
        let bundles = references
            .into_iter()
            .map(|reference| {
                let bundle = InstallableBundle::new(reference, Arc::clone(&container))
                    .with_default_start(default_start);
                match &start_levels {
                    Some(service) => bundle.with_start_levels(Arc::clone(service)),
                    None => bundle,
                }
            })
            .collect();
        Self { bundles }
    }

    /// Install all members, then start the ones that ask for it
    pub fn install(&mut self) -> Result<()> {
        for bundle in &mut self.bundles {
            bundle.install_only()?;
        }
        for bundle in &mut self.bundles {
            bundle.start_if_necessary()?;
        }
        info!(count = self.bundles.len(), "bundles installed");
        Ok(())
    }

    pub fn len(&self) -> usize {
        self.bundles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bundles.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &InstallableBundle> {
        self.bundles.iter()
    }
}
