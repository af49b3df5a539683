//! Platforms command implementation

use console::Style;

use crate::error::Result;
use crate::platform::PlatformRegistry;

/// List the supported frameworks
pub fn run() -> Result<()> {
    let registry = PlatformRegistry::default();

    println!("Supported platforms ({}):", registry.all().len());
    println!();
    for platform in registry.all() {
        println!(
            "  {} {}",
            Style::new().bold().yellow().apply_to(platform.name),
            Style::new().dim().apply_to(format!("({})", platform.display_name))
        );
        println!(
            "    {} {}",
            Style::new().bold().apply_to("Default version:"),
            platform.default_version
        );
        if let Some(minimum) = platform.versions.minimum() {
            println!(
                "    {} {}",
                Style::new().bold().apply_to("Minimum version:"),
                minimum
            );
        }
    }
    Ok(())
}
