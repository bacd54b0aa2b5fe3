//! Discovery of managed links.
//!
//! A symlink under the target root is *managed* when its target lies under
//! the source root. There is no manifest of installed links: every command
//! finds its links again by walking the target tree, so manual edits to the
//! tree are picked up on the next run.

use std::path::{Path, PathBuf};

use log::{debug, warn};
use walkdir::WalkDir;

use crate::config::Config;
use crate::error::{Error, Result};
use crate::path::{is_under, resolve_link_target};
use crate::probe;

/// A symlink under the target root pointing into the source root.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ManagedLink {
    /// Location of the link itself.
    pub path: PathBuf,
    /// Normalized absolute target of the link.
    pub target: PathBuf,
}

impl ManagedLink {
    /// Name of the module this link belongs to.
    pub fn module(&self, source_root: &Path) -> Option<String> {
        crate::path::module_of(source_root, &self.target)
    }
}

/// Walk the target root and collect every managed link, in walk order.
///
/// Symlinks are not followed, and the source root is never descended into
/// when it lives inside the target root. Errors on individual entries are
/// logged and skipped; failing to read the target root itself is fatal.
pub fn managed_links(config: &Config) -> Result<Vec<ManagedLink>> {
    let target_root = &config.target_root;
    let source_root = &config.source_root;

    std::fs::read_dir(target_root).map_err(|e| Error::Walk {
        path: target_root.clone(),
        message: e.to_string(),
    })?;

    let mut links = Vec::new();
    let walker = WalkDir::new(target_root)
        .follow_links(false)
        .sort_by_file_name()
        .into_iter()
        .filter_entry(|e| e.depth() == 0 || e.path() != source_root.as_path());

    for entry in walker {
        let entry = match entry {
            Ok(entry) => entry,
            Err(e) => {
                debug!("error checking {}: {}", display_walk_path(&e), e);
                continue;
            }
        };

        if !entry.path_is_symlink() {
            continue;
        }

        let raw = match probe::read_link_target(entry.path()) {
            Ok(raw) => raw,
            Err(e) => {
                warn!("{}", e);
                continue;
            }
        };
        let target = resolve_link_target(entry.path(), &raw);
        if !is_under(source_root, &target) {
            continue;
        }

        links.push(ManagedLink {
            path: entry.into_path(),
            target,
        });
    }

    Ok(links)
}

fn display_walk_path(e: &walkdir::Error) -> String {
    e.path()
        .map(|p| p.display().to_string())
        .unwrap_or_else(|| "<unknown>".to_string())
}
