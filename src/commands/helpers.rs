//! Command helper utilities

use std::path::{Path, PathBuf};

use tracing::debug;

use crate::cli::OptionArgs;
use crate::config::{Configuration, LaunchFile, LaunchOptions};
use crate::error::{OsgiRunError, Result};
use crate::launcher::Launcher;
use crate::platform::Profiles;

/// Current directory as a Result
pub fn current_dir() -> Result<PathBuf> {
    std::env::current_dir().map_err(|e| OsgiRunError::IoError {
        message: format!("Failed to get current directory: {e}"),
    })
}

/// The explicit launch file, or `osgirun.yaml` in the current directory
pub fn load_launch_file(explicit: Option<&Path>) -> Result<LaunchFile> {
    if let Some(path) = explicit {
        return LaunchFile::load(path);
    }
    match LaunchFile::discover(&current_dir()?)? {
        Some((path, file)) => {
            debug!(path = %path.display(), "using launch file");
            Ok(file)
        }
        None => Ok(LaunchFile::default()),
    }
}

/// Command line over launch file over environment over defaults
pub fn resolve_configuration(cli: LaunchOptions, file: &LaunchFile) -> Result<Configuration> {
    Ok(cli
        .or(file.launch_options())
        .or(LaunchOptions::from_env()?)
        .resolve())
}

/// Launcher plus the specifications to provision
///
/// The launch file's `provision` entries come before the command-line ones.
pub fn launcher(
    config_path: Option<&Path>,
    specs: &[String],
    options: &OptionArgs,
) -> Result<(Launcher, Vec<String>)> {
    let file = load_launch_file(config_path)?;
    let configuration = resolve_configuration(options.to_launch_options(), &file)?;
    debug!(?configuration, "resolved configuration");

    let all_specs = file
        .provision
        .iter()
        .chain(specs.iter())
        .cloned()
        .collect();

    let launcher = Launcher::new(configuration)
        .with_profiles(Profiles::builtin().with_overrides(&file.profiles))
        .with_properties(file.properties)
        .with_progress(console::Term::stderr().is_term());
    Ok((launcher, all_specs))
}
