//! # Remove Command Implementation
//!
//! Deletes the links pointing into the given modules, or every link managed
//! by dotlink when no module is named. Merge directories created during
//! install stay in place; links not pointing into the modules directory are
//! never touched.

use anyhow::Result;
use clap::Args;

use dotlink::output::dry_run_prefix;
use dotlink::remove::remove;

use crate::cli::GlobalArgs;

/// Uninstall modules
#[derive(Args, Debug, Default)]
pub struct RemoveArgs {
    /// Modules to uninstall (default: all managed links)
    #[arg(value_name = "MODULE")]
    pub modules: Vec<String>,
}

/// Execute the `remove` command.
pub fn execute(args: RemoveArgs, global: &GlobalArgs) -> Result<()> {
    let config = global.config()?;
    let removed = remove(&config, &args.modules)?;

    if config.dry_run {
        let prefix = dry_run_prefix(&global.output());
        for path in &removed {
            println!("{} remove {}", prefix, path.display());
        }
    }
    Ok(())
}
