//! # Error Handling
//!
//! This module defines the centralized error type for `dotlink`. It uses the
//! `thiserror` library to describe every failure that aborts a command.
//!
//! ## Key Components
//!
//! - **`Error`**: The main enum covering fatal filesystem failures, usage
//!   errors, import precondition failures and bundle/git failures.
//!
//! - **`Result<T>`**: A type alias for `std::result::Result<T, Error>`.
//!
//! Conditions that only affect a single entry of a tree walk (an unexpected
//! regular file at a destination, an unresolvable conflict, an empty file
//! name) are *not* errors. They are logged as warnings and reported through
//! [`crate::linker::Report`], and the walk carries on.
//!
//! Every variant maps to a process exit code through [`Error::exit_code`],
//! following the contract in [`crate::exit_codes`].

use std::path::PathBuf;

use thiserror::Error;

use crate::exit_codes;

/// Main error type for dotlink operations
#[derive(Error, Debug)]
pub enum Error {
    /// A filesystem call on a required path failed.
    ///
    /// Raised for failed symlink creation, directory creation, removal or
    /// directory listing when not suppressed by dry-run.
    #[error("Filesystem error at {}: {message}", path.display())]
    Filesystem { path: PathBuf, message: String },

    /// A tree walk could not even start, e.g. the target root is missing.
    #[error("Unable to walk {}: {message}", path.display())]
    Walk { path: PathBuf, message: String },

    /// A path has no usable final component.
    #[error("Invalid item name: {}", path.display())]
    InvalidName { path: PathBuf },

    /// A module name given on the command line is not usable.
    #[error("Invalid module name '{name}': {message}")]
    InvalidModule { name: String, message: String },

    /// A precondition of a command was not met (path outside target, path
    /// already exists, ...).
    #[error("{message}")]
    Precondition { message: String },

    /// No ancestor directory contains the bundle manifest.
    #[error("Unable to find bundles.json above {}", start.display())]
    SourceRootNotFound { start: PathBuf },

    /// A bundle manifest operation failed.
    #[error("Bundle error: {message}")]
    Bundle { message: String },

    /// An external git invocation failed.
    #[error("Git command failed: {command} - {stderr}")]
    GitCommand { command: String, stderr: String },

    /// An I/O error, wrapped from `std::io::Error`.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// A JSON (de)serialization error, wrapped from `serde_json::Error`.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

impl Error {
    /// Wrap an I/O error with the path it happened on.
    pub fn fs(path: impl Into<PathBuf>, err: std::io::Error) -> Self {
        Error::Filesystem {
            path: path.into(),
            message: err.to_string(),
        }
    }

    /// The process exit code this error should produce.
    pub fn exit_code(&self) -> u8 {
        match self {
            Error::Precondition { .. } => exit_codes::PRECONDITION,
            _ => exit_codes::USAGE,
        }
    }
}

/// A convenient type alias for `Result<T, Error>`.
pub type Result<T> = std::result::Result<T, Error>;
