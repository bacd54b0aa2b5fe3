//! # dotlink
//!
//! This library overlays a set of independently maintained *modules* (plain
//! directories under a source root) onto a single target directory, usually
//! the user's home, using symbolic links instead of copies. Installed files
//! therefore always reflect the current content of the module that owns them.
//! It is used by the `dotlink` command-line tool.
//!
//! ## Quick Example
//!
//! ```no_run
//! use dotlink::config::Config;
//! use dotlink::install::{install, InstallOptions, Selection};
//! use dotlink::state::status;
//!
//! let config = Config::new("/home/me/dotfiles", "/home/me")?;
//! install(&config, &Selection::All, InstallOptions::default())?;
//!
//! for (module, installed) in status(&config)? {
//!     println!("{module}: {installed}");
//! }
//! # Ok::<(), dotlink::error::Error>(())
//! ```
//!
//! ## Core Concepts
//!
//! - **Managed links (`managed`)**: a symlink under the target root is ours
//!   exactly when it points into the source root. There is no manifest of
//!   installed links; every command rediscovers them by walking the target
//!   tree, so manual edits are picked up on the next run.
//! - **Overlay linker (`linker`)**: places a module's tree into the target
//!   tree. When two modules want the same path and both sides are
//!   directories, the link is replaced by a real *merge directory* and both
//!   modules are linked one level deeper.
//! - **Reconciler (`reconcile`)**: removes managed links whose targets have
//!   disappeared.
//! - **State (`state`)**: which modules currently have links installed.
//! - **Bundles (`bundle`, `git`)**: modules vendored from external git
//!   repositories with `git subtree`, listed in `bundles.json`.
//!
//! Every operation takes an explicit [`config::Config`]; nothing is kept in
//! global state.

pub mod bundle;
pub mod config;
pub mod defaults;
pub mod error;
pub mod exit_codes;
pub mod git;
pub mod import;
pub mod install;
pub mod linker;
pub mod managed;
pub mod modules;
pub mod output;
pub mod path;
pub mod probe;
pub mod reconcile;
pub mod remove;
pub mod state;
pub mod suggestions;

#[cfg(test)]
mod path_proptest;
