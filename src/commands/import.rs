//! # Import Command Implementation
//!
//! Moves an existing file or directory from the target directory into a
//! module and replaces it with a link. Imported git checkouts are recorded in
//! `bundles.json`.

use std::path::PathBuf;

use anyhow::Result;
use clap::Args;

use dotlink::git::SystemGit;
use dotlink::import::import;
use dotlink::output::dry_run_prefix;

use crate::cli::GlobalArgs;

/// Import existing files and directories into a given module
#[derive(Args, Debug)]
pub struct ImportArgs {
    /// File or directory to import
    #[arg(value_name = "FILE|DIR")]
    pub path: PathBuf,

    /// Module to import into
    #[arg(value_name = "MODULE")]
    pub module: String,
}

/// Execute the `import` command.
pub fn execute(args: ImportArgs, global: &GlobalArgs) -> Result<()> {
    let config = global.config()?;
    let outcome = import(&config, &SystemGit, &args.path, &args.module)?;

    if config.dry_run {
        println!(
            "{} move {} to {}",
            dry_run_prefix(&global.output()),
            args.path.display(),
            outcome.destination.display()
        );
    }
    if let Some(bundle) = outcome.bundle {
        println!("Recorded bundle {} from {}", bundle.dir, bundle.source);
    }
    Ok(())
}
