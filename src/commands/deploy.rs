//! Deploy command implementation
//!
//! Copies provisioned bundles into a framework's hot-deploy directory.

use std::path::Path;
use std::sync::Arc;

use console::Style;
use tracing::debug;

use crate::bundle::InstallableBundles;
use crate::cli::DeployArgs;
use crate::commands::helpers;
use crate::container::DeployDirContainer;
use crate::error::Result;
use crate::launcher;
use crate::provision::{ExtensionBasedSchemaResolver, ProvisionService};

/// Run deploy command
pub fn run(config: Option<&Path>, args: DeployArgs) -> Result<()> {
    let file = helpers::load_launch_file(config)?;
    let cli = crate::config::LaunchOptions {
        local_repository: args.local_repository.clone(),
        ..Default::default()
    };
    let configuration = helpers::resolve_configuration(cli, &file)?;
    let repository = launcher::local_repository(&configuration);

    let service = ProvisionService::with_default_scanners();
    let resolver = ExtensionBasedSchemaResolver::for_service(&service);
    let specs: Vec<String> = file
        .provision
        .iter()
        .chain(args.specs.iter())
        .map(|spec| resolver.resolve(spec))
        .collect();
    let references = service
        .scan_all(&specs)?
        .into_iter()
        .map(|reference| launcher::localize(&repository, reference))
        .collect::<Result<Vec<_>>>()?;
    debug!(count = references.len(), "bundles to deploy");

    let container = Arc::new(DeployDirContainer::open(&args.to)?);
    let mut bundles = InstallableBundles::wrap(references, container, None, args.start);
    bundles.install()?;

    println!(
        "{} {} bundle(s) to {}",
        Style::new().bold().green().apply_to("Deployed"),
        bundles.len(),
        args.to.display()
    );
    Ok(())
}

