//! Scan command implementation

use console::Style;

use crate::bundle::BundleReference;
use crate::cli::ScanArgs;
use crate::error::Result;
use crate::provision::{ExtensionBasedSchemaResolver, ProvisionService};

/// Run scan command
pub fn run(args: ScanArgs) -> Result<()> {
    let service = ProvisionService::with_default_scanners();
    let spec = ExtensionBasedSchemaResolver::for_service(&service).resolve(&args.spec);
    let bundles = service.scan(&spec)?;

    if args.json {
        println!("{}", serde_json::to_string_pretty(&bundles)?);
    } else {
        print_bundles(&spec, &bundles);
    }
    Ok(())
}

fn print_bundles(spec: &str, bundles: &[BundleReference]) {
    if bundles.is_empty() {
        println!("No bundles found for {spec}.");
        return;
    }

    println!("Bundles for {spec} ({}):", bundles.len());
    println!();
    let dim = Style::new().dim();
    for bundle in bundles {
        let location = bundle.location().unwrap_or("<no location>");
        let mut details = Vec::new();
        if let Some(level) = bundle.start_level() {
            details.push(format!("level {level}"));
        }
        match bundle.should_start() {
            Some(true) => details.push("start".to_string()),
            Some(false) => details.push("no start".to_string()),
            None => {}
        }
        if bundle.should_update() == Some(true) {
            details.push("update".to_string());
        }

        if details.is_empty() {
            println!("  {}", Style::new().yellow().apply_to(location));
        } else {
            println!(
                "  {} {}",
                Style::new().yellow().apply_to(location),
                dim.apply_to(format!("({})", details.join(", ")))
            );
        }
    }
}
