//! Broken link cleanup.
//!
//! Module content gets renamed and deleted over time. The links that used to
//! point at it are left dangling in the target tree; this pass finds the
//! managed ones and removes them. Links pointing outside the source root are
//! never touched, dangling or not.

use std::fs;
use std::path::PathBuf;

use log::{debug, info};

use crate::config::Config;
use crate::error::{Error, Result};
use crate::managed::managed_links;
use crate::probe;

/// Remove every managed link whose target no longer exists.
///
/// Returns the removed links (the links that would be removed, in a dry run).
pub fn cleanup_broken_links(config: &Config) -> Result<Vec<PathBuf>> {
    info!("looking for broken symlinks in {}", config.target_root.display());

    let mut removed = Vec::new();
    for link in managed_links(config)? {
        debug!("check symlink {}", link.target.display());
        if probe::exists(&link.target) {
            continue;
        }

        info!("removing broken symlink {}", link.path.display());
        if !config.dry_run {
            fs::remove_file(&link.path).map_err(|e| Error::fs(&link.path, e))?;
        }
        removed.push(link.path);
    }

    Ok(removed)
}
