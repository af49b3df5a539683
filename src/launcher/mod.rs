//! From provisioning specifications to a running framework
//!
//! [`Launcher::prepare`] runs the pipeline up to the command line:
//! scan → profiles → local repository → context → builder. [`Launcher::run`]
//! additionally spawns the framework through [`ProcessRunner`].

use std::collections::BTreeMap;
use std::path::PathBuf;
use std::sync::Arc;

use tracing::{debug, info};

use crate::bundle::BundleReference;
use crate::config::Configuration;
use crate::error::Result;
use crate::platform::path::AbsolutePathStrategy;
use crate::platform::{PlatformBuilder, PlatformContext, PlatformRegistry, Profiles};
use crate::progress::ProgressDisplay;
use crate::provision::{
    ExtensionBasedSchemaResolver, LocalRepository, MavenCoordinates, ProvisionService,
};

pub mod command;
pub mod pipe;
pub mod process;

pub use command::LaunchCommand;
pub use process::ProcessRunner;

/// Output of [`Launcher::prepare`]
#[derive(Debug)]
pub struct Prepared {
    pub builder: Box<dyn PlatformBuilder>,
    pub context: PlatformContext,
    pub config_file: PathBuf,
    pub command: LaunchCommand,
}

/// Provisions bundles and prepares a framework for launch
pub struct Launcher {
    service: Arc<ProvisionService>,
    registry: PlatformRegistry,
    profiles: Profiles,
    properties: BTreeMap<String, String>,
    configuration: Configuration,
    show_progress: bool,
}

impl Launcher {
    /// Launcher with the built-in scanners, platforms and profiles
    pub fn new(configuration: Configuration) -> Self {
        Self {
            service: Arc::new(ProvisionService::with_default_scanners()),
            registry: PlatformRegistry::default(),
            profiles: Profiles::builtin(),
            properties: BTreeMap::new(),
            configuration,
            show_progress: false,
        }
    }

    #[must_use]
    pub fn with_profiles(mut self, profiles: Profiles) -> Self {
        self.profiles = profiles;
        self
    }

    /// Framework properties appended to the generated configuration
    #[must_use]
    pub fn with_properties(mut self, properties: BTreeMap<String, String>) -> Self {
        self.properties = properties;
        self
    }

    #[must_use]
    pub fn with_progress(mut self, show: bool) -> Self {
        self.show_progress = show;
        self
    }

    /// Scan every specification in order
    ///
    /// Bare paths and URLs get a scheme from their extension first.
    pub fn provision<S: AsRef<str>>(&self, specs: &[S]) -> Result<Vec<BundleReference>> {
        let resolver = ExtensionBasedSchemaResolver::for_service(&self.service);
        let progress = ProgressDisplay::new(specs.len() as u64, self.show_progress);

        let mut bundles = Vec::new();
        for spec in specs {
            let spec = resolver.resolve(spec.as_ref());
            progress.update_spec(&spec);
            match self.service.scan(&spec) {
                Ok(found) => bundles.extend(found),
                Err(e) => {
                    progress.abandon();
                    return Err(e);
                }
            }
            progress.inc_spec();
        }
        progress.finish();
        Ok(bundles)
    }

    /// Write the framework configuration and build the launch command
    pub fn prepare<S: AsRef<str>>(&self, specs: &[S]) -> Result<Prepared> {
        let configuration = &self.configuration;
        let builder = self.registry.create(
            &configuration.platform,
            configuration.platform_version.as_deref(),
        )?;
        info!(
            platform = builder.name(),
            version = builder.version(),
            "preparing framework"
        );

        let working_directory = AbsolutePathStrategy::absolute(&configuration.working_directory);
        let base = PlatformContext::new(configuration.clone())
            .with_working_directory(&working_directory)
            .with_properties(self.properties.clone());

        let mut all_specs: Vec<String> = specs.iter().map(|s| s.as_ref().to_string()).collect();
        for profile in self.profile_names(builder.as_ref(), &base) {
            debug!(%profile, "adding profile");
            all_specs.extend(self.profiles.specs(&profile)?.iter().cloned());
        }

        let repository = local_repository(configuration);
        let bundles = self
            .provision(&all_specs)?
            .into_iter()
            .map(|bundle| localize(&repository, bundle))
            .collect::<Result<Vec<_>>>()?;
        info!(count = bundles.len(), "provisioned bundles");

        let context = base.with_bundles(bundles);
        let config_file = builder.prepare(&context)?;

        let framework_jar = match &configuration.framework_jar {
            Some(jar) => AbsolutePathStrategy::absolute(jar),
            None => repository.artifact(&MavenCoordinates::parse(&builder.framework_artifact())?)?,
        };

        let command = LaunchCommand {
            java: LaunchCommand::java_executable(configuration.java_home.as_deref()),
            vm_options: LaunchCommand::collect_vm_options(configuration, builder.vm_options(&context)),
            classpath: vec![framework_jar],
            main_class: builder.main_class_name().to_string(),
            arguments: builder.arguments(&context),
            working_directory,
        };

        Ok(Prepared {
            builder,
            context,
            config_file,
            command,
        })
    }

    /// Prepare and run the framework, returning its exit code
    pub fn run<S: AsRef<str>>(&self, specs: &[S]) -> Result<i32> {
        let prepared = self.prepare(specs)?;
        std::fs::create_dir_all(&prepared.command.working_directory)?;
        ProcessRunner::new().run(&prepared.command)
    }

    /// Configured profiles then the builder's required one, without repeats
    fn profile_names(&self, builder: &dyn PlatformBuilder, context: &PlatformContext) -> Vec<String> {
        let mut names: Vec<String> = Vec::new();
        let required = builder.required_profile(context);
        for name in self.configuration.profiles.iter().cloned().chain(required) {
            if !names.contains(&name) {
                names.push(name);
            }
        }
        names
    }
}

/// The configured repository, or `.m2/repository` when no home is known
pub fn local_repository(configuration: &Configuration) -> LocalRepository {
    let root = configuration
        .local_repository
        .clone()
        .unwrap_or_else(|| PathBuf::from(".m2").join("repository"));
    LocalRepository::new(root)
}

/// Point `mvn:` bundles at their local repository file
pub fn localize(repository: &LocalRepository, bundle: BundleReference) -> Result<BundleReference> {
    match bundle.location() {
        Some(location) => {
            let resolved = repository.resolve(location)?;
            if resolved == location {
                Ok(bundle)
            } else {
                Ok(bundle.relocated(resolved))
            }
        }
        None => Ok(bundle),
    }
}
