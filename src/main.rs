//! # dotlink CLI
//!
//! This is the binary entry point for the `dotlink` command-line tool.
//!
//! Its primary responsibilities are:
//! - Parsing command-line arguments using `clap`.
//! - Executing the appropriate command based on the parsed arguments.
//! - Translating top-level errors into a message on stderr and one of the
//!   exit codes in [`dotlink::exit_codes`].
//!
//! The core application logic is defined in the `lib.rs` library crate, ensuring
//! that the binary is a thin wrapper around the reusable library functionality.

mod cli;
mod commands;

use std::process::ExitCode;

use clap::Parser;

use dotlink::exit_codes;

fn main() -> ExitCode {
    let cli = match cli::Cli::try_parse() {
        Ok(cli) => cli,
        Err(err) => {
            let _ = err.print();
            // --help and --version are reported through clap errors too.
            return if err.use_stderr() {
                ExitCode::from(exit_codes::USAGE)
            } else {
                ExitCode::from(exit_codes::SUCCESS)
            };
        }
    };

    match cli.execute() {
        Ok(()) => ExitCode::from(exit_codes::SUCCESS),
        Err(err) => {
            eprintln!("error: {:#}", err);
            let code = err
                .downcast_ref::<dotlink::error::Error>()
                .map(|e| e.exit_code())
                .unwrap_or(exit_codes::USAGE);
            ExitCode::from(code)
        }
    }
}
