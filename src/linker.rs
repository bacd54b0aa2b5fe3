//! # Overlay Linker
//!
//! Places the tree of one module into the target tree as symlinks.
//!
//! For every entry of a module directory the linker looks at the matching
//! destination path (without following symlinks) and decides:
//!
//! - **absent**: link the destination to the source entry.
//! - **real directory**: descend and place the source entry's contents inside.
//! - **regular file**: leave it alone and warn. User data is never replaced.
//! - **symlink**:
//!   - already pointing at the source entry: nothing to do.
//!   - pointing into the source root at something that no longer exists:
//!     replace it with a link to the source entry.
//!   - pointing into the source root at another module's entry: a conflict,
//!     resolved by turning the destination into a real *merge directory* and
//!     placing the contents of both entries into it, one level deeper.
//!   - pointing anywhere else: not ours, left alone.
//!
//! ## Conflict order
//!
//! When a merge directory is materialized, the entries of the module that
//! held the link are replayed first and the incoming module's entries second.
//! Two modules supplying a same-named *file* at the same depth cannot be
//! merged; the link placed first stays and the second is reported as an
//! unresolved conflict.
//!
//! ## Dry run
//!
//! With [`Config::dry_run`] set no filesystem mutation happens, but the
//! decision logic runs unchanged against a shadow view of the planned changes,
//! so the reported actions are the ones a real run would perform.

use std::collections::HashMap;
use std::fmt;
use std::fs;
use std::os::unix::fs::{symlink, DirBuilderExt};
use std::path::{Path, PathBuf};

use log::{debug, info, warn};

use crate::config::Config;
use crate::error::{Error, Result};
use crate::path::{is_under, resolve_link_target};
use crate::probe::{self, EntryKind};

/// Why an entry was left untouched.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SkipReason {
    /// The source path has no file name.
    InvalidName,
    /// A regular file (or other non-directory) already occupies the destination.
    Occupied,
    /// The destination is a directory but the source entry is not.
    NotADirectory,
    /// The destination is a symlink that does not point into the source root.
    ForeignLink,
    /// Two modules claim the path and at least one side is not a directory.
    Unresolvable { existing: PathBuf },
}

impl fmt::Display for SkipReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SkipReason::InvalidName => write!(f, "invalid item name"),
            SkipReason::Occupied => write!(f, "neither symlink nor directory"),
            SkipReason::NotADirectory => write!(f, "destination is a directory, source is not"),
            SkipReason::ForeignLink => write!(f, "symlink not managed by dotlink"),
            SkipReason::Unresolvable { existing } => {
                write!(f, "conflicts with {}", existing.display())
            }
        }
    }
}

/// One decision taken while placing a module.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Action {
    /// `dst` was linked to `src`.
    Linked { src: PathBuf, dst: PathBuf },
    /// A dangling managed link at `dst` was replaced by a link to `src`.
    Relinked { src: PathBuf, dst: PathBuf },
    /// The link at `dst` became a merge directory shared by both sources.
    Merged {
        dst: PathBuf,
        existing: PathBuf,
        incoming: PathBuf,
    },
    /// The entry was left alone.
    Skipped { path: PathBuf, reason: SkipReason },
}

impl fmt::Display for Action {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Action::Linked { src, dst } => {
                write!(f, "link {} -> {}", dst.display(), src.display())
            }
            Action::Relinked { src, dst } => {
                write!(f, "relink {} -> {}", dst.display(), src.display())
            }
            Action::Merged { dst, .. } => write!(f, "merge directory {}", dst.display()),
            Action::Skipped { path, reason } => {
                write!(f, "skip {} ({})", path.display(), reason)
            }
        }
    }
}

/// Everything the linker did (or would do, in a dry run).
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Report {
    pub actions: Vec<Action>,
}

impl Report {
    /// Number of links created, including replaced dangling links.
    pub fn links_created(&self) -> usize {
        self.actions
            .iter()
            .filter(|a| matches!(a, Action::Linked { .. } | Action::Relinked { .. }))
            .count()
    }

    /// Number of merge directories materialized.
    pub fn merges(&self) -> usize {
        self.actions
            .iter()
            .filter(|a| matches!(a, Action::Merged { .. }))
            .count()
    }

    /// Entries that were left untouched.
    pub fn skipped(&self) -> impl Iterator<Item = (&Path, &SkipReason)> {
        self.actions.iter().filter_map(|a| match a {
            Action::Skipped { path, reason } => Some((path.as_path(), reason)),
            _ => None,
        })
    }

    /// True when the run changed (or would change) nothing.
    pub fn is_unchanged(&self) -> bool {
        self.links_created() == 0 && self.merges() == 0
    }

    /// Append the actions of another report.
    pub fn extend(&mut self, other: Report) {
        self.actions.extend(other.actions);
    }
}

/// Planned state of a path during a dry run.
#[derive(Debug, Clone)]
enum Planned {
    Link(PathBuf),
    Dir,
    Removed,
}

/// Places module trees into the target tree.
pub struct Linker<'a> {
    config: &'a Config,
    shadow: HashMap<PathBuf, Planned>,
    report: Report,
}

impl<'a> Linker<'a> {
    pub fn new(config: &'a Config) -> Self {
        Self {
            config,
            shadow: HashMap::new(),
            report: Report::default(),
        }
    }

    /// A linker that treats `removed` as already gone. A dry run passes the
    /// links the reconciler would have deleted.
    pub fn with_removed(config: &'a Config, removed: &[PathBuf]) -> Self {
        let mut linker = Self::new(config);
        if config.dry_run {
            for path in removed {
                linker.shadow.insert(path.clone(), Planned::Removed);
            }
        }
        linker
    }

    /// The actions recorded so far.
    pub fn report(&self) -> &Report {
        &self.report
    }

    pub fn into_report(self) -> Report {
        self.report
    }

    /// Place every entry of `source_dir` into `target_dir`.
    pub fn place_module(&mut self, source_dir: &Path, target_dir: &Path) -> Result<()> {
        for entry in probe::read_dir_sorted(source_dir)? {
            self.link_entry(&entry, target_dir)?;
        }
        Ok(())
    }

    /// Place a single source entry into `target_dir`.
    pub fn link_entry(&mut self, src: &Path, target_dir: &Path) -> Result<()> {
        let Some(base) = src.file_name() else {
            warn!("invalid item name {}, skipping", src.display());
            self.skip(src, SkipReason::InvalidName);
            return Ok(());
        };
        let dst = target_dir.join(base);

        match self.classify(&dst)? {
            EntryKind::Absent => self.create_link(src, &dst, false),
            EntryKind::Directory => {
                if !probe::is_dir(src) {
                    warn!(
                        "skipping {}: it is a directory but {} is not",
                        dst.display(),
                        src.display()
                    );
                    self.skip(&dst, SkipReason::NotADirectory);
                    return Ok(());
                }
                debug!("{} exists, descending into {}", dst.display(), src.display());
                self.place_module(src, &dst)
            }
            EntryKind::Other => {
                warn!(
                    "skipping already existing item {} (neither symlink nor directory)",
                    dst.display()
                );
                self.skip(&dst, SkipReason::Occupied);
                Ok(())
            }
            EntryKind::Symlink => {
                let raw = self.read_link(&dst)?;
                let target = resolve_link_target(&dst, &raw);
                self.handle_symlink(src, &dst, &target)
            }
        }
    }

    fn handle_symlink(&mut self, src: &Path, dst: &Path, target: &Path) -> Result<()> {
        if target == src {
            return Ok(());
        }

        if is_under(&self.config.source_root, target) {
            if !probe::exists(target) {
                info!("removing dangling symlink {}", dst.display());
                self.remove_link(dst)?;
                return self.create_link(src, dst, true);
            }
            return self.resolve_conflict(target, src, dst);
        }

        if !self.exists(dst) {
            warn!(
                "leaving dangling symlink {} alone, it does not point into {}",
                dst.display(),
                self.config.source_root.display()
            );
        } else if probe::is_dir(src) && probe::is_dir(target) {
            warn!(
                "not descending into {}: symlink to {} is not managed",
                dst.display(),
                target.display()
            );
        } else {
            debug!("symlink {} already exists, skipping", dst.display());
        }
        self.skip(dst, SkipReason::ForeignLink);
        Ok(())
    }

    /// Turn the managed link at `dst` into a merge directory holding the
    /// contents of both `existing` and `incoming`.
    fn resolve_conflict(&mut self, existing: &Path, incoming: &Path, dst: &Path) -> Result<()> {
        info!(
            "resolve conflict for {}:\n  {}\n  {}",
            dst.display(),
            existing.display(),
            incoming.display()
        );
        for side in [existing, incoming] {
            if !probe::is_dir(side) {
                warn!(
                    "unable to resolve conflict for {}: source {} is not a directory",
                    dst.display(),
                    side.display()
                );
                self.skip(
                    dst,
                    SkipReason::Unresolvable {
                        existing: existing.to_path_buf(),
                    },
                );
                return Ok(());
            }
        }

        self.remove_link(dst)?;
        self.create_dir(dst)?;
        self.report.actions.push(Action::Merged {
            dst: dst.to_path_buf(),
            existing: existing.to_path_buf(),
            incoming: incoming.to_path_buf(),
        });

        self.place_module(existing, dst)?;
        self.place_module(incoming, dst)?;

        info!("conflict for {} resolved", dst.display());
        Ok(())
    }

    fn skip(&mut self, path: &Path, reason: SkipReason) {
        self.report.actions.push(Action::Skipped {
            path: path.to_path_buf(),
            reason,
        });
    }

    fn create_link(&mut self, src: &Path, dst: &Path, replaced: bool) -> Result<()> {
        info!("link {} -> {}", src.display(), dst.display());
        if self.config.dry_run {
            self.shadow
                .insert(dst.to_path_buf(), Planned::Link(src.to_path_buf()));
        } else {
            symlink(src, dst).map_err(|e| Error::fs(dst, e))?;
        }

        let (src, dst) = (src.to_path_buf(), dst.to_path_buf());
        self.report.actions.push(if replaced {
            Action::Relinked { src, dst }
        } else {
            Action::Linked { src, dst }
        });
        Ok(())
    }

    fn remove_link(&mut self, dst: &Path) -> Result<()> {
        if self.config.dry_run {
            self.shadow.insert(dst.to_path_buf(), Planned::Removed);
            return Ok(());
        }
        fs::remove_file(dst).map_err(|e| Error::fs(dst, e))
    }

    fn create_dir(&mut self, dst: &Path) -> Result<()> {
        if self.config.dry_run {
            self.shadow.insert(dst.to_path_buf(), Planned::Dir);
            return Ok(());
        }
        fs::DirBuilder::new()
            .mode(0o755)
            .create(dst)
            .map_err(|e| Error::fs(dst, e))
    }

    /// Whether the parent of `path` only exists in the dry-run shadow.
    fn in_planned_dir(&self, path: &Path) -> bool {
        path.parent()
            .and_then(|parent| self.shadow.get(parent))
            .is_some_and(|planned| matches!(planned, Planned::Dir))
    }

    fn classify(&self, path: &Path) -> Result<EntryKind> {
        match self.shadow.get(path) {
            Some(Planned::Link(_)) => Ok(EntryKind::Symlink),
            Some(Planned::Dir) => Ok(EntryKind::Directory),
            Some(Planned::Removed) => Ok(EntryKind::Absent),
            None if self.in_planned_dir(path) => Ok(EntryKind::Absent),
            None => probe::classify(path),
        }
    }

    fn read_link(&self, path: &Path) -> Result<PathBuf> {
        match self.shadow.get(path) {
            Some(Planned::Link(target)) => Ok(target.clone()),
            _ => probe::read_link_target(path),
        }
    }

    fn exists(&self, path: &Path) -> bool {
        match self.shadow.get(path) {
            Some(Planned::Link(target)) => probe::exists(target),
            Some(Planned::Dir) => true,
            Some(Planned::Removed) => false,
            None if self.in_planned_dir(path) => false,
            None => probe::exists(path),
        }
    }
}

/// Place `source_dir` into `target_dir` with a fresh [`Linker`].
pub fn place_module(config: &Config, source_dir: &Path, target_dir: &Path) -> Result<Report> {
    let mut linker = Linker::new(config);
    linker.place_module(source_dir, target_dir)?;
    Ok(linker.into_report())
}
