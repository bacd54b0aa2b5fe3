//! # Bundle Command Implementation
//!
//! Manages modules vendored from external git repositories with
//! `git subtree`.
//!
//! - `bundle add DIR SRC [REF]` vendors `SRC` at `REF` (default `master`)
//!   into `DIR`, records it in `bundles.json` and commits the manifest.
//! - `bundle update [DIR...]` pulls the listed bundles, or all of them.

use anyhow::Result;
use clap::{Args, Subcommand};

use dotlink::bundle::{self, Bundle};
use dotlink::defaults::DEFAULT_BUNDLE_REF;
use dotlink::git::SystemGit;
use dotlink::output::dry_run_prefix;

use crate::cli::GlobalArgs;

/// Manage bundles
#[derive(Args, Debug)]
pub struct BundleArgs {
    #[command(subcommand)]
    pub command: BundleCommand,
}

#[derive(Subcommand, Debug)]
pub enum BundleCommand {
    /// Add a new bundle
    Add {
        /// Directory under the modules directory
        dir: String,
        /// Repository to vendor
        source: String,
        /// Branch or tag to track
        #[arg(default_value = DEFAULT_BUNDLE_REF)]
        r#ref: String,
    },

    /// Update bundles
    Update {
        /// Bundle directories to update (default: all)
        dirs: Vec<String>,
    },
}

/// Execute the `bundle` command.
pub fn execute(args: BundleArgs, global: &GlobalArgs) -> Result<()> {
    let config = global.config()?;
    let prefix = dry_run_prefix(&global.output());

    match args.command {
        BundleCommand::Add { dir, source, r#ref } => {
            let bundle = Bundle {
                source,
                r#ref,
                dir,
                commit: None,
            };
            let summary = format!("{} from {} ({})", bundle.dir, bundle.source, bundle.r#ref);
            bundle::add(&config, &SystemGit, bundle)?;
            if config.dry_run {
                println!("{} add bundle {}", prefix, summary);
            }
        }
        BundleCommand::Update { dirs } => {
            let processed = bundle::update(&config, &SystemGit, &dirs)?;
            if config.dry_run {
                for dir in processed {
                    println!("{} update bundle {}", prefix, dir);
                }
            }
        }
    }
    Ok(())
}
