//! Hot-deploy directory container
//!
//! Frameworks such as Felix (with FileInstall) or Karaf watch a directory and
//! install every bundle dropped into it. [`DeployDirContainer`] installs a
//! bundle by copying it there; the watching framework takes care of resolving
//! and starting it.

use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex, PoisonError};
use std::time::SystemTime;

use tracing::{debug, info};

use super::{BundleContainer, InstalledBundle};
use crate::common::location;
use crate::error::{Result, bundle};

/// Container backed by a framework's hot-deploy directory
///
/// Bundles land under their file name, so two sources sharing a name cannot
/// both be deployed; the second one is refused.
#[derive(Debug, Clone)]
pub struct DeployDirContainer {
    directory: PathBuf,
    // deployed file name -> canonical source
    claimed: Arc<Mutex<HashMap<PathBuf, PathBuf>>>,
}

impl DeployDirContainer {
    /// Create a container deploying into `directory`, creating it if needed
    pub fn open(directory: impl Into<PathBuf>) -> Result<Self> {
        let directory = directory.into();
        fs::create_dir_all(&directory).map_err(|e| {
            bundle::lifecycle_failed("open", directory.display().to_string(), e.to_string())
        })?;
        Ok(Self {
            directory,
            claimed: Arc::default(),
        })
    }

    pub fn directory(&self) -> &Path {
        &self.directory
    }

    fn source_path(location: &str) -> Result<PathBuf> {
        let path = location::to_local_path(location).ok_or_else(|| {
            bundle::lifecycle_failed(
                "install",
                location,
                "only local bundles can be deployed; resolve remote locations first",
            )
        })?;
        if !path.is_file() {
            return Err(bundle::lifecycle_failed(
                "install",
                location,
                "bundle file does not exist",
            ));
        }
        Ok(path)
    }

    /// Reserve `target` for `source`, failing if another source holds it
    fn claim(&self, target: &Path, source: &Path, location: &str) -> Result<()> {
        let source = dunce::canonicalize(source).unwrap_or_else(|_| source.to_path_buf());
        let mut claimed = self.claimed.lock().unwrap_or_else(PoisonError::into_inner);
        match claimed.get(target) {
            Some(owner) if *owner != source => Err(bundle::lifecycle_failed(
                "install",
                location,
                format!(
                    "{} is already deployed from {}",
                    target.display(),
                    owner.display()
                ),
            )),
            Some(_) => Ok(()),
            None => {
                claimed.insert(target.to_path_buf(), source);
                Ok(())
            }
        }
    }
}

impl BundleContainer for DeployDirContainer {
    fn install(&self, location: &str) -> Result<Box<dyn InstalledBundle>> {
        let source = Self::source_path(location)?;
        let file_name = source.file_name().ok_or_else(|| {
            bundle::lifecycle_failed("install", location, "location has no file name")
        })?;
        let target = self.directory.join(file_name);
        self.claim(&target, &source, location)?;

        let last_modified = if target.exists() {
            // Already deployed: report the existing copy's age so callers can
            // decide whether to update it.
            fs::metadata(&target)
                .and_then(|m| m.modified())
                .map_err(|e| bundle::lifecycle_failed("install", location, e.to_string()))?
        } else {
            copy_bundle(&source, &target, location)?;
            info!(target = %target.display(), "deployed bundle");
            SystemTime::now()
        };

        Ok(Box::new(DeployedBundle {
            location: location.to_string(),
            source,
            target,
            last_modified,
        }))
    }
}

/// A bundle copied into the deploy directory
#[derive(Debug)]
pub struct DeployedBundle {
    location: String,
    source: PathBuf,
    target: PathBuf,
    last_modified: SystemTime,
}

impl DeployedBundle {
    pub fn target(&self) -> &Path {
        &self.target
    }
}

impl InstalledBundle for DeployedBundle {
    fn location(&self) -> &str {
        &self.location
    }

    fn last_modified(&self) -> SystemTime {
        self.last_modified
    }

    fn update(&self) -> Result<()> {
        copy_bundle(&self.source, &self.target, &self.location)?;
        info!(target = %self.target.display(), "updated deployed bundle");
        Ok(())
    }

    fn start(&self) -> Result<()> {
        debug!(
            location = %self.location,
            "deployed bundles are started by the watching framework"
        );
        Ok(())
    }
}

fn copy_bundle(source: &Path, target: &Path, location: &str) -> Result<()> {
    fs::copy(source, target)
        .map(|_| ())
        .map_err(|e| bundle::lifecycle_failed("copy", location, e.to_string()))
}
