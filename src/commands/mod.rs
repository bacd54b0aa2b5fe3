//! # CLI Command Implementations
//!
//! This module contains the implementation for each subcommand of the `dotlink`
//! command-line tool. Each subcommand is defined in its own file.
//!
//! ## Structure
//!
//! Each command module typically contains:
//! - An `Args` struct that defines the command-specific arguments and options,
//!   derived using `clap`.
//! - An `execute` function that takes the parsed `Args` together with the
//!   global options and calls into the `dotlink` library.

pub mod bundle;
pub mod completions;
pub mod import;
pub mod install;
pub mod remove;
pub mod status;
