//! Run command implementation

use std::path::Path;

use crate::cli::RunArgs;
use crate::commands::helpers;
use crate::error::Result;

/// Run command; returns the framework's exit code
pub fn run(config: Option<&Path>, args: RunArgs) -> Result<i32> {
    let (launcher, specs) = helpers::launcher(config, &args.launch.specs, &args.launch.options)?;

    if args.dry_run {
        let prepared = launcher.prepare(&specs)?;
        println!("{}", prepared.command);
        return Ok(0);
    }

    launcher.run(&specs)
}
