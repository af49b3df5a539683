//! Version command implementation

use crate::error::Result;
use crate::platform::PlatformRegistry;

/// Run version command
pub fn run() -> Result<()> {
    println!("osgirun {}", env!("CARGO_PKG_VERSION"));
    println!();
    println!("Build info:");
    println!("  Rust version: {}", env!("CARGO_PKG_RUST_VERSION"));
    println!("  Profile: {}", build_profile());
    println!();
    println!("Default frameworks:");
    for platform in PlatformRegistry::default().all() {
        println!("  {} {}", platform.name, platform.default_version);
    }

    Ok(())
}

fn build_profile() -> &'static str {
    if cfg!(debug_assertions) {
        "debug"
    } else {
        "release"
    }
}
