//! # Import
//!
//! Moves an existing file or directory from the target tree into a module
//! and links it back into place. The moved item keeps its path relative to
//! the target root inside the module, so `~/.config/foo` imported into
//! `desktop` ends up at `<source root>/desktop/.config/foo`.
//!
//! An imported directory that is a git checkout is recorded as a bundle and
//! stripped of its `.git` directory, so later updates go through
//! `bundle update`.

use std::fs;
use std::path::{Path, PathBuf};

use log::info;

use crate::bundle::{Bundle, BundleConfig};
use crate::config::Config;
use crate::error::{Error, Result};
use crate::git::{preferred_remote, GitOperations};
use crate::linker::Linker;
use crate::path::{absolute, is_under, validate_module_name};
use crate::probe::{self, EntryKind};

/// What an import did.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImportOutcome {
    /// Where the item now lives inside the module.
    pub destination: PathBuf,
    /// The bundle recorded for an imported git checkout.
    pub bundle: Option<Bundle>,
}

/// Import `path` into `module`.
pub fn import(
    config: &Config,
    git: &dyn GitOperations,
    path: &Path,
    module: &str,
) -> Result<ImportOutcome> {
    validate_module_name(module)?;
    let src = absolute(path)?;

    match probe::classify(&src)? {
        EntryKind::Absent => {
            return Err(Error::Precondition {
                message: format!("{}: does not exist", src.display()),
            })
        }
        EntryKind::Symlink => {
            return Err(Error::Precondition {
                message: format!("{}: already a symlink, not importing", src.display()),
            })
        }
        EntryKind::Directory | EntryKind::Other => {}
    }

    let parent = src
        .parent()
        .ok_or_else(|| Error::InvalidName { path: src.clone() })?;
    if src == config.target_root || !is_under(&config.target_root, parent) {
        return Err(Error::Precondition {
            message: format!(
                "{} is not under {}",
                src.display(),
                config.target_root.display()
            ),
        });
    }

    if is_under(&config.source_root, &src) {
        return Err(Error::Precondition {
            message: format!("{} is already inside a module", src.display()),
        });
    }

    let module_dir = config.module_dir(module);
    let rel = src
        .strip_prefix(&config.target_root)
        .map_err(|_| Error::InvalidName { path: src.clone() })?;
    let dst = module_dir.join(rel);
    if probe::classify(&dst)? != EntryKind::Absent {
        return Err(Error::Precondition {
            message: format!("{} already exists", dst.display()),
        });
    }

    info!("moving {} to {}", src.display(), dst.display());
    let is_checkout = probe::is_dir(&src.join(".git"));
    if config.dry_run {
        return Ok(ImportOutcome {
            destination: dst,
            bundle: None,
        });
    }

    if let Some(dst_parent) = dst.parent() {
        if !module_dir.exists() {
            info!("creating directories for new module {:?}", module);
        }
        fs::create_dir_all(dst_parent).map_err(|e| Error::fs(dst_parent, e))?;
    }
    fs::rename(&src, &dst).map_err(|e| Error::fs(&src, e))?;

    info!("creating symlink to {} in {}", dst.display(), parent.display());
    let mut linker = Linker::new(config);
    linker.link_entry(&dst, parent)?;

    let bundle = if is_checkout {
        record_checkout(config, git, &dst)?
    } else {
        None
    };

    Ok(ImportOutcome {
        destination: dst,
        bundle,
    })
}

/// Record the checkout at `dir` as a bundle and drop its `.git` directory.
fn record_checkout(
    config: &Config,
    git: &dyn GitOperations,
    dir: &Path,
) -> Result<Option<Bundle>> {
    info!("{} seems to be a Git repository, adding it to bundles", dir.display());

    let remotes = git.remotes(dir)?;
    let Some(remote) = preferred_remote(&remotes) else {
        info!("no remote known for {}, not recording a bundle", dir.display());
        return Ok(None);
    };

    let rel_dir = dir
        .strip_prefix(&config.source_root)
        .unwrap_or(dir)
        .to_string_lossy()
        .into_owned();
    let bundle = Bundle {
        source: git.remote_url(dir, remote)?,
        r#ref: git.current_branch(dir)?,
        dir: rel_dir,
        commit: Some(git.head_commit(dir)?),
    };

    let mut manifest = BundleConfig::load(&config.source_root)?;
    manifest.bundles.push(bundle.clone());
    manifest.save(&config.source_root)?;

    let git_dir = dir.join(".git");
    fs::remove_dir_all(&git_dir).map_err(|e| Error::fs(&git_dir, e))?;
    Ok(Some(bundle))
}
