//! # Status Command Implementation
//!
//! Lists every known module and whether any of its content is currently
//! linked into the target directory. This is a read-only operation.

use anyhow::Result;
use clap::Args;

use dotlink::output::status_line;
use dotlink::state::status;

use crate::cli::GlobalArgs;

/// Display the status of all modules
#[derive(Args, Debug, Default)]
pub struct StatusArgs {}

/// Execute the `status` command.
pub fn execute(_args: StatusArgs, global: &GlobalArgs) -> Result<()> {
    let config = global.config()?;
    let output = global.output();

    for (module, installed) in status(&config)? {
        println!("{}", status_line(&output, &module, installed));
    }
    Ok(())
}
