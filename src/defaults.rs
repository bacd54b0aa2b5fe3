//! Default values for dotlink configuration.
//!
//! This module provides centralized default values used across commands,
//! ensuring consistency and avoiding duplication.

use std::path::PathBuf;

/// Name of the bundle manifest. Its presence marks the source root.
pub const MANIFEST_FILENAME: &str = "bundles.json";

/// Module installed when `install` is run without module names.
pub const DEFAULT_MODULE: &str = "base";

/// Pseudo module name selecting every module.
pub const ALL_MODULES: &str = "all";

/// Ref used by `bundle add` when none is given.
pub const DEFAULT_BUNDLE_REF: &str = "master";

/// Directories under the source root that are never modules.
pub const EXCLUDED_DIRS: &[&str] = &[".git", "manage", "old"];

/// Returns the default target root.
///
/// This is the user's home directory. Falls back to the current directory
/// when the home directory cannot be determined.
///
/// This can be overridden by the `--target` CLI flag or the `TARGET`
/// environment variable.
pub fn default_target_root() -> PathBuf {
    dirs::home_dir().unwrap_or_else(|| PathBuf::from("."))
}
