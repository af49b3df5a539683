//! Install/start state machine for a single bundle
//!
//! ```text
//!   ┌──────────────┐  install   ┌───────────┐  start   ┌─────────┐
//!   │ NotInstalled │ ─────────► │ Installed │ ───────► │ Started │
//!   └──────────────┘            └───────────┘          └─────────┘
//!          │                                                ▲
//!          └────────────── start (installs first) ──────────┘
//! ```
//!
//! Every transition is idempotent and a failed container call leaves the
//! state where it was, so calling the same operation again retries it.

use std::sync::Arc;
use std::time::SystemTime;

use tracing::debug;

use super::BundleReference;
use crate::container::{BundleContainer, InstalledBundle, StartLevelService};
use crate::error::{Result, bundle};

/// Lifecycle state of an [`InstallableBundle`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LifecycleState {
    NotInstalled,
    Installed,
    Started,
}

/// A bundle reference bound to a container
pub struct InstallableBundle {
    reference: BundleReference,
    container: Arc<dyn BundleContainer>,
    start_levels: Option<Arc<dyn StartLevelService>>,
    /// Start policy for references that do not say whether to start
    default_start: bool,
    state: LifecycleState,
    handle: Option<Box<dyn InstalledBundle>>,
}

impl InstallableBundle {
    pub fn new(reference: BundleReference, container: Arc<dyn BundleContainer>) -> Self {
        Self {
            reference,
            container,
            start_levels: None,
            default_start: false,
            state: LifecycleState::NotInstalled,
            handle: None,
        }
    }

    /// Assign start levels through `service` on install
    pub fn with_start_levels(mut self, service: Arc<dyn StartLevelService>) -> Self {
        self.start_levels = Some(service);
        self
    }

    /// Start policy applied when the reference leaves the start intent open
    pub fn with_default_start(mut self, start: bool) -> Self {
        self.default_start = start;
        self
    }

    pub fn state(&self) -> LifecycleState {
        self.state
    }

    pub fn reference(&self) -> &BundleReference {
        &self.reference
    }

    /// Handle of the installed bundle, once installed
    pub fn installed(&self) -> Option<&dyn InstalledBundle> {
        self.handle.as_deref()
    }

    /// Install the bundle, then start it if it asks to be started
    pub fn install(&mut self) -> Result<()> {
        if self.state != LifecycleState::NotInstalled {
            return Ok(());
        }
        self.install_only()?;
        self.start_if_necessary()
    }

    /// Start the bundle, installing it first when needed
    pub fn start(&mut self) -> Result<()> {
        match self.state {
            LifecycleState::Started => Ok(()),
            LifecycleState::NotInstalled => {
                self.install_only()?;
                self.start_installed()
            }
            LifecycleState::Installed => self.start_installed(),
        }
    }

    /// Start only if the reference (or the default policy) asks for it
    pub fn start_if_necessary(&mut self) -> Result<()> {
        if self.reference.should_start().unwrap_or(self.default_start) {
            self.start()
        } else {
            Ok(())
        }
    }

    /// NotInstalled -> Installed without the implicit start
    pub(crate) fn install_only(&mut self) -> Result<()> {
        if self.state != LifecycleState::NotInstalled {
            return Ok(());
        }

        let location = self
            .reference
            .location()
            .ok_or_else(|| bundle::missing_location("install"))?;

        let installed_at = SystemTime::now();
        debug!(location, "installing bundle");
        let handle = self.container.install(location)?;

        // An older modification time means the container already had this
        // bundle before the call.
        if self.reference.should_update() == Some(true) && handle.last_modified() < installed_at {
            debug!(location, "updating stale bundle");
            handle.update()?;
        }

        if let (Some(service), Some(level)) = (&self.start_levels, self.reference.start_level()) {
            service.set_bundle_start_level(handle.as_ref(), level)?;
        }

        self.handle = Some(handle);
        self.state = LifecycleState::Installed;
        Ok(())
    }

    fn start_installed(&mut self) -> Result<()> {
        let handle = self.handle.as_ref().ok_or_else(|| {
            bundle::lifecycle_failed(
                "start",
                self.reference.location().unwrap_or("<none>"),
                "bundle is not installed",
            )
        })?;
        debug!(location = handle.location(), "starting bundle");
        handle.start()?;
        self.state = LifecycleState::Started;
        Ok(())
    }
}

impl std::fmt::Debug for InstallableBundle {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("InstallableBundle")
            .field("reference", &self.reference)
            .field("state", &self.state)
            .finish_non_exhaustive()
    }
}
