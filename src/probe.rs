//! Filesystem probe primitives.
//!
//! [`classify`] uses link-stat semantics: a symlink is reported as
//! [`EntryKind::Symlink`] no matter what it points to. [`exists`] and
//! [`is_dir`] follow links, matching how the link *targets* are judged.

use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use crate::error::{Error, Result};

/// What occupies a path, judged without following symlinks.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EntryKind {
    /// Nothing is there.
    Absent,
    /// A symbolic link, dangling or not.
    Symlink,
    /// A real directory.
    Directory,
    /// A regular file or anything else (fifo, socket, device).
    Other,
}

/// Classify `path` without following a final symlink.
pub fn classify(path: &Path) -> Result<EntryKind> {
    match fs::symlink_metadata(path) {
        Ok(meta) => {
            let file_type = meta.file_type();
            Ok(if file_type.is_symlink() {
                EntryKind::Symlink
            } else if file_type.is_dir() {
                EntryKind::Directory
            } else {
                EntryKind::Other
            })
        }
        Err(e) if e.kind() == ErrorKind::NotFound => Ok(EntryKind::Absent),
        Err(e) => Err(Error::fs(path, e)),
    }
}

/// Read the literal target of the symlink at `path`.
pub fn read_link_target(path: &Path) -> Result<PathBuf> {
    fs::read_link(path).map_err(|e| Error::fs(path, e))
}

/// Whether `path` resolves to something, following symlinks.
pub fn exists(path: &Path) -> bool {
    fs::metadata(path).is_ok()
}

/// Whether `path` resolves to a directory, following symlinks.
pub fn is_dir(path: &Path) -> bool {
    fs::metadata(path).map(|m| m.is_dir()).unwrap_or(false)
}

/// List the entries of `dir`, sorted by file name for a stable placement order.
pub fn read_dir_sorted(dir: &Path) -> Result<Vec<PathBuf>> {
    let mut entries = Vec::new();
    for entry in fs::read_dir(dir).map_err(|e| Error::fs(dir, e))? {
        let entry = entry.map_err(|e| Error::fs(dir, e))?;
        entries.push(entry.path());
    }
    entries.sort();
    Ok(entries)
}
