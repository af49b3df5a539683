//! Prepare command implementation
//!
//! Writes the framework configuration and prints how to launch it.

use std::path::Path;

use console::Style;

use crate::cli::PrepareArgs;
use crate::commands::helpers;
use crate::error::Result;

/// Run prepare command
pub fn run(config: Option<&Path>, args: PrepareArgs) -> Result<()> {
    let (launcher, specs) = helpers::launcher(config, &args.launch.specs, &args.launch.options)?;
    let prepared = launcher.prepare(&specs)?;

    let bold = Style::new().bold();
    println!(
        "{} {} {}",
        bold.apply_to("Prepared"),
        Style::new().green().apply_to(prepared.builder.name()),
        prepared.builder.version()
    );
    println!(
        "  {} {}",
        bold.apply_to("Bundles:"),
        prepared.context.bundles().len()
    );
    println!(
        "  {} {}",
        bold.apply_to("Configuration:"),
        prepared.config_file.display()
    );
    println!("  {} {}", bold.apply_to("Command:"), prepared.command);

    Ok(())
}
