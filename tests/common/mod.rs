//! Shared test utilities for E2E tests.
//!
//! This module provides a fixture holding a modules directory and a target
//! directory, plus helpers to run the `dotlink` binary against them.
//!
//! ## Usage
//!
//! Add `mod common;` to your test file, then use the helpers:
//!
//! ```rust,ignore
//! mod common;
//! use common::prelude::*;
//!
//! #[test]
//! fn test_example() {
//!     let fixture = TestFixture::new().with_module_file("base", ".bashrc", "");
//!     fixture.command().arg("install").assert().success();
//! }
//! ```

use assert_fs::prelude::*;
use std::path::{Path, PathBuf};

/// Re-export commonly used test dependencies for convenience.
pub mod prelude {
    pub use assert_cmd::cargo::cargo_bin_cmd;
    pub use assert_fs::prelude::*;
    pub use predicates::prelude::*;

    pub use super::TestFixture;
}

/// A modules directory and a target directory inside one temporary directory.
///
/// # Example
///
/// ```rust,ignore
/// let fixture = TestFixture::new()
///     .with_module_file("base", ".bashrc", "alias ll='ls -l'")
///     .with_module_file("vim", ".vimrc", "set nocompatible");
///
/// fixture.command().args(["install", "all"]).assert().success();
/// ```
pub struct TestFixture {
    temp_dir: assert_fs::TempDir,
}

impl TestFixture {
    /// Create a fixture with an empty `bundles.json` and an empty target.
    pub fn new() -> Self {
        let temp_dir = assert_fs::TempDir::new().expect("Failed to create temp directory");
        temp_dir
            .child("dots/bundles.json")
            .write_str("{\"Bundles\": []}")
            .expect("Failed to write bundles.json");
        temp_dir
            .child("home")
            .create_dir_all()
            .expect("Failed to create target directory");
        Self { temp_dir }
    }

    /// Add a file at `path` inside `module`.
    pub fn with_module_file(self, module: &str, path: &str, content: &str) -> Self {
        self.temp_dir
            .child(format!("dots/{}/{}", module, path))
            .write_str(content)
            .expect("Failed to write module file");
        self
    }

    /// Add a file at `path` inside the target directory.
    #[allow(dead_code)]
    pub fn with_target_file(self, path: &str, content: &str) -> Self {
        self.temp_dir
            .child(format!("home/{}", path))
            .write_str(content)
            .expect("Failed to write target file");
        self
    }

    /// The modules directory.
    pub fn source(&self) -> PathBuf {
        self.temp_dir.path().join("dots")
    }

    /// The target directory.
    pub fn target(&self) -> PathBuf {
        self.temp_dir.path().join("home")
    }

    /// Get the path to the temporary directory.
    #[allow(dead_code)]
    pub fn path(&self) -> &Path {
        self.temp_dir.path()
    }
}

impl Default for TestFixture {
    fn default() -> Self {
        Self::new()
    }
}

impl TestFixture {
    /// Create a command pointed at this fixture's modules and target
    /// directories, with a fixed hostname and colors disabled.
    pub fn command(&self) -> assert_cmd::Command {
        let mut cmd = assert_cmd::cargo::cargo_bin_cmd!("dotlink");
        cmd.current_dir(self.path())
            .env_remove("DOTLINK_BASE")
            .env_remove("TARGET")
            .env_remove("RUST_LOG")
            .arg("--base")
            .arg(self.source())
            .arg("--target")
            .arg(self.target())
            .arg("--hostname")
            .arg("testhost")
            .arg("--color")
            .arg("never");
        cmd
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fixture_layout() {
        let fixture = TestFixture::new().with_module_file("base", ".bashrc", "");
        assert!(fixture.source().join("bundles.json").exists());
        assert!(fixture.source().join("base/.bashrc").exists());
        assert!(fixture.target().is_dir());
    }
}
