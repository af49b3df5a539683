//! In-memory container that records every call, for lifecycle tests

use std::collections::{HashMap, HashSet};
use std::sync::{Arc, Mutex, PoisonError};
use std::time::{Duration, SystemTime};

use super::{BundleContainer, InstalledBundle, StartLevelService};
use crate::error::{Result, bundle};

#[derive(Default)]
struct State {
    calls: Vec<String>,
    installed: HashSet<String>,
    fail_install: HashSet<String>,
    fail_start: HashSet<String>,
    stale: HashSet<String>,
    /// location -> location that must be installed before it can start
    requires: HashMap<String, String>,
}

/// Container double recording `install:<loc>`, `update:<loc>`, `start:<loc>`
/// and `start_level:<loc>:<n>` calls in order
#[derive(Clone, Default)]
pub struct RecordingContainer {
    state: Arc<Mutex<State>>,
}

impl RecordingContainer {
    pub fn new() -> Self {
        Self::default()
    }

    fn with_state<T>(&self, f: impl FnOnce(&mut State) -> T) -> T {
        let mut state = self.state.lock().unwrap_or_else(PoisonError::into_inner);
        f(&mut state)
    }

    /// Make installs of `location` fail
    pub fn fail_install(&self, location: &str) {
        self.with_state(|s| s.fail_install.insert(location.to_string()));
    }

    /// Stop failing installs of `location`
    pub fn heal_install(&self, location: &str) {
        self.with_state(|s| s.fail_install.remove(location));
    }

    /// Make starts of `location` fail
    pub fn fail_start(&self, location: &str) {
        self.with_state(|s| s.fail_start.insert(location.to_string()));
    }

    /// Pretend `location` was installed long before this test ran
    pub fn preinstalled_stale(&self, location: &str) {
        self.with_state(|s| s.stale.insert(location.to_string()));
    }

    /// Starting `location` fails unless `dependency` is installed
    pub fn require(&self, location: &str, dependency: &str) {
        self.with_state(|s| {
            s.requires
                .insert(location.to_string(), dependency.to_string())
        });
    }

    pub fn calls(&self) -> Vec<String> {
        self.with_state(|s| s.calls.clone())
    }

    pub fn count(&self, prefix: &str) -> usize {
        self.with_state(|s| s.calls.iter().filter(|c| c.starts_with(prefix)).count())
    }
}

impl BundleContainer for RecordingContainer {
    fn install(&self, location: &str) -> Result<Box<dyn InstalledBundle>> {
        let stale = self.with_state(|s| {
            s.calls.push(format!("install:{location}"));
            if s.fail_install.contains(location) {
                return Err(bundle::lifecycle_failed("install", location, "refused"));
            }
            s.installed.insert(location.to_string());
            Ok(s.stale.contains(location))
        })?;

        let last_modified = if stale {
            SystemTime::now() - Duration::from_secs(3600)
        } else {
            SystemTime::now() + Duration::from_secs(3600)
        };

        Ok(Box::new(RecordedBundle {
            location: location.to_string(),
            last_modified,
            container: self.clone(),
        }))
    }
}

impl StartLevelService for RecordingContainer {
    fn set_bundle_start_level(&self, bundle: &dyn InstalledBundle, level: u32) -> Result<()> {
        self.with_state(|s| {
            s.calls
                .push(format!("start_level:{}:{level}", bundle.location()));
        });
        Ok(())
    }
}

#[derive(Clone)]
struct RecordedBundle {
    location: String,
    last_modified: SystemTime,
    container: RecordingContainer,
}

impl std::fmt::Debug for RecordedBundle {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RecordedBundle")
            .field("location", &self.location)
            .finish_non_exhaustive()
    }
}

impl InstalledBundle for RecordedBundle {
    fn location(&self) -> &str {
        &self.location
    }

    fn last_modified(&self) -> SystemTime {
        self.last_modified
    }

    fn update(&self) -> Result<()> {
        self.container
            .with_state(|s| s.calls.push(format!("update:{}", self.location)));
        Ok(())
    }

    fn start(&self) -> Result<()> {
        self.container.with_state(|s| {
            s.calls.push(format!("start:{}", self.location));
            if s.fail_start.contains(&self.location) {
                return Err(bundle::lifecycle_failed("start", &self.location, "refused"));
            }
            if let Some(dependency) = s.requires.get(&self.location) {
                if !s.installed.contains(dependency) {
                    return Err(bundle::lifecycle_failed(
                        "start",
                        &self.location,
                        format!("unresolved dependency {dependency}"),
                    ));
                }
            }
            Ok(())
        })
    }
}
