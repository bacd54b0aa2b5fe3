//! # Bundles
//!
//! A bundle is a module vendored from an external git repository. The list
//! of bundles is kept in `bundles.json` at the source root, the same file that
//! marks the source root during discovery:
//!
//! ```json
//! {
//!   "Bundles": [
//!     {
//!       "Source": "https://github.com/example/vim-config",
//!       "Ref": "master",
//!       "Dir": "vim"
//!     }
//!   ]
//! }
//! ```
//!
//! Vendoring itself is done with `git subtree` through
//! [`crate::git::GitOperations`].

use std::collections::HashSet;
use std::fs;
use std::io::ErrorKind;
use std::path::Path;

use log::{info, warn};
use serde::{Deserialize, Serialize};

use crate::config::Config;
use crate::defaults::MANIFEST_FILENAME;
use crate::error::{Error, Result};
use crate::git::GitOperations;
use crate::probe;

/// The contents of `bundles.json`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct BundleConfig {
    #[serde(default)]
    pub bundles: Vec<Bundle>,
}

/// One vendored repository.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct Bundle {
    /// Repository URL.
    #[serde(default)]
    pub source: String,
    /// Branch or tag to track.
    #[serde(default)]
    pub r#ref: String,
    /// Directory under the source root, relative.
    #[serde(default)]
    pub dir: String,
    /// Commit the bundle was imported at, if known.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub commit: Option<String>,
}

impl BundleConfig {
    /// Load the manifest from `source_root`. A missing file is an empty list.
    pub fn load(source_root: &Path) -> Result<Self> {
        let path = source_root.join(MANIFEST_FILENAME);
        let content = match fs::read_to_string(&path) {
            Ok(content) => content,
            Err(e) if e.kind() == ErrorKind::NotFound => return Ok(Self::default()),
            Err(e) => return Err(Error::fs(&path, e)),
        };
        if content.trim().is_empty() {
            return Ok(Self::default());
        }
        serde_json::from_str(&content).map_err(|e| Error::Bundle {
            message: format!("failed to parse {}: {}", path.display(), e),
        })
    }

    /// Write the manifest to `source_root`, two-space indented.
    pub fn save(&self, source_root: &Path) -> Result<()> {
        let path = source_root.join(MANIFEST_FILENAME);
        let content = serde_json::to_string_pretty(self)?;
        fs::write(&path, content).map_err(|e| Error::fs(&path, e))
    }

    /// Find a bundle by directory.
    pub fn find(&self, dir: &str) -> Option<&Bundle> {
        self.bundles.iter().find(|b| b.dir == dir)
    }
}

/// Commit message recorded when a bundle is added.
pub fn add_commit_message(bundle: &Bundle) -> String {
    format!(
        "Add bundle as {}\n\nSourced from {} ({})\n",
        bundle.dir, bundle.source, bundle.r#ref
    )
}

/// Vendor a new bundle, record it in the manifest and commit the manifest.
pub fn add(config: &Config, git: &dyn GitOperations, bundle: Bundle) -> Result<()> {
    let mut manifest = BundleConfig::load(&config.source_root)?;
    if manifest.find(&bundle.dir).is_some() {
        return Err(Error::Precondition {
            message: format!("bundle {} is already configured", bundle.dir),
        });
    }

    info!(
        "add bundle {} from {} ({})",
        bundle.dir, bundle.source, bundle.r#ref
    );
    if config.dry_run {
        return Ok(());
    }

    git.subtree_add(
        &config.source_root,
        &bundle.dir,
        &bundle.source,
        &bundle.r#ref,
    )?;

    let message = add_commit_message(&bundle);
    manifest.bundles.push(bundle);
    manifest.save(&config.source_root)?;
    git.commit_file(&config.source_root, MANIFEST_FILENAME, &message)
}

/// Fetch updates for the bundles whose directories are listed, or for all
/// bundles when `dirs` is empty. A bundle whose directory is missing is
/// added again instead. Returns the directories that were processed.
pub fn update(config: &Config, git: &dyn GitOperations, dirs: &[String]) -> Result<Vec<String>> {
    let manifest = BundleConfig::load(&config.source_root)?;
    let wanted: HashSet<&str> = dirs.iter().map(String::as_str).collect();

    for dir in &wanted {
        if manifest.find(dir).is_none() {
            warn!("bundle {} is not configured, skipping", dir);
        }
    }

    let mut processed = Vec::new();
    for bundle in &manifest.bundles {
        if !wanted.is_empty() && !wanted.contains(bundle.dir.as_str()) {
            continue;
        }

        let present = probe::exists(&config.source_root.join(&bundle.dir));
        info!(
            "{} bundle {} from {} ({})",
            if present { "update" } else { "add" },
            bundle.dir,
            bundle.source,
            bundle.r#ref
        );
        if !config.dry_run {
            if present {
                git.subtree_pull(
                    &config.source_root,
                    &bundle.dir,
                    &bundle.source,
                    &bundle.r#ref,
                )?;
            } else {
                git.subtree_add(
                    &config.source_root,
                    &bundle.dir,
                    &bundle.source,
                    &bundle.r#ref,
                )?;
            }
        }
        processed.push(bundle.dir.clone());
    }
    Ok(processed)
}
