//! # Install Command Implementation
//!
//! Links modules into the target directory.
//!
//! - No module names installs the `base` module.
//! - `all` installs every module found under the modules directory.
//! - Otherwise the listed modules are installed in order.
//!
//! Each module is followed by its host-specific variant
//! (`<module>_<hostname>`) when one exists. Broken links left behind by
//! earlier installs are cleaned up first unless `--disable-check` is given.

use anyhow::Result;
use clap::Args;

use dotlink::install::{install, InstallOptions, Selection};
use dotlink::modules::enumerate_modules;
use dotlink::output::dry_run_prefix;
use dotlink::suggestions;

use crate::cli::GlobalArgs;

/// Install modules
#[derive(Args, Debug, Default)]
pub struct InstallArgs {
    /// Don't check for broken symlinks on install
    #[arg(long)]
    pub disable_check: bool,

    /// Modules to install, or `all` (default: base)
    #[arg(value_name = "MODULE")]
    pub modules: Vec<String>,
}

/// Execute the `install` command.
pub fn execute(args: InstallArgs, global: &GlobalArgs) -> Result<()> {
    let selection = Selection::from_args(&args.modules)?;
    let config = global.config()?;
    let output = global.output();

    let outcome = install(
        &config,
        &selection,
        InstallOptions {
            disable_check: args.disable_check,
        },
    )?;

    if config.dry_run {
        let prefix = dry_run_prefix(&output);
        for path in &outcome.removed_broken {
            println!("{} remove broken link {}", prefix, path.display());
        }
        for action in &outcome.report.actions {
            println!("{} {}", prefix, action);
        }
    }

    if !outcome.missing.is_empty() {
        let known = enumerate_modules(&config.source_root)?;
        eprintln!("{}", suggestions::unknown_modules(&outcome.missing, &known));
    }

    log::info!(
        "installed {} module(s): {} link(s) created, {} merge director(ies)",
        outcome.installed.len(),
        outcome.report.links_created(),
        outcome.report.merges()
    );
    Ok(())
}
