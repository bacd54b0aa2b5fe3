//! Module enumeration.
//!
//! Modules are the direct subdirectories of the source root, minus a few
//! reserved names. Host-specific variants (`<module>_<hostname>`) are plain
//! subdirectories as well; they are found by an existence check when their
//! base module is installed.

use std::fs;
use std::path::{Path, PathBuf};

use crate::defaults::EXCLUDED_DIRS;
use crate::error::{Error, Result};
use crate::probe;

/// Names of all modules under `source_root`, sorted.
pub fn enumerate_modules(source_root: &Path) -> Result<Vec<String>> {
    let mut modules = Vec::new();
    for entry in fs::read_dir(source_root).map_err(|e| Error::fs(source_root, e))? {
        let entry = entry.map_err(|e| Error::fs(source_root, e))?;
        let file_type = entry.file_type().map_err(|e| Error::fs(entry.path(), e))?;
        if !file_type.is_dir() {
            continue;
        }

        let name = entry.file_name().to_string_lossy().into_owned();
        if EXCLUDED_DIRS.contains(&name.as_str()) {
            continue;
        }
        modules.push(name);
    }
    modules.sort();
    Ok(modules)
}

/// Name of the host-specific variant of `module`.
pub fn host_variant_name(module: &str, hostname: &str) -> String {
    format!("{}_{}", module, hostname)
}

/// Directory of the host-specific variant of `module`, if it exists.
pub fn host_variant(source_root: &Path, module: &str, hostname: &str) -> Option<PathBuf> {
    let dir = source_root.join(host_variant_name(module, hostname));
    probe::exists(&dir).then_some(dir)
}
