//! # Run Configuration
//!
//! [`Config`] carries everything an operation needs to know about the current
//! invocation: where modules live, where links go, whether to touch the
//! filesystem at all, and which hostname selects host-specific variants.
//!
//! The value is passed explicitly into every operation. Nothing is stored in
//! process-wide state, so several configurations (for example a dry run and a
//! real run) can be exercised side by side in the same process.
//!
//! ## Source root discovery
//!
//! When no source root is given, [`find_source_root`] walks upwards from a
//! starting directory (normally the one holding the executable) until it
//! finds a directory containing the bundle manifest, `bundles.json`.

use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use log::debug;

use crate::defaults::MANIFEST_FILENAME;
use crate::error::{Error, Result};
use crate::path::{absolute, resolve_link_target};

/// Configuration shared by install, remove, status and import.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    /// Directory holding one subdirectory per module.
    pub source_root: PathBuf,
    /// Directory links are installed into.
    pub target_root: PathBuf,
    /// Log actions without changing the filesystem.
    pub dry_run: bool,
    /// Hostname used to find `<module>_<hostname>` variants. `None` means
    /// "ask the operating system".
    pub hostname: Option<String>,
}

impl Config {
    /// Create a configuration, normalizing both roots to absolute paths.
    pub fn new(source_root: impl AsRef<Path>, target_root: impl AsRef<Path>) -> Result<Self> {
        Ok(Self {
            source_root: absolute(source_root.as_ref())?,
            target_root: absolute(target_root.as_ref())?,
            dry_run: false,
            hostname: None,
        })
    }

    /// Enable or disable dry-run mode.
    pub fn with_dry_run(mut self, dry_run: bool) -> Self {
        self.dry_run = dry_run;
        self
    }

    /// Pin the hostname used for host-specific variants.
    pub fn with_hostname(mut self, hostname: impl Into<String>) -> Self {
        self.hostname = Some(hostname.into());
        self
    }

    /// Path of a module directory.
    pub fn module_dir(&self, module: &str) -> PathBuf {
        self.source_root.join(module)
    }

    /// Path of the bundle manifest.
    pub fn manifest_path(&self) -> PathBuf {
        self.source_root.join(MANIFEST_FILENAME)
    }

    /// The hostname to use for host-specific variants.
    pub fn resolve_hostname(&self) -> Result<String> {
        if let Some(hostname) = &self.hostname {
            return Ok(hostname.clone());
        }
        let hostname = nix::unistd::gethostname()
            .map_err(|e| Error::Io(std::io::Error::from(e)))?;
        Ok(hostname.to_string_lossy().into_owned())
    }
}

/// Find the source root by searching `start` and its ancestors for the
/// bundle manifest.
pub fn find_source_root(start: &Path) -> Result<PathBuf> {
    let start = absolute(start)?;
    let mut dir = start.as_path();
    loop {
        let manifest = dir.join(MANIFEST_FILENAME);
        match fs::metadata(&manifest) {
            Ok(_) => {
                debug!("found source root: {}", dir.display());
                return Ok(dir.to_path_buf());
            }
            Err(e) if e.kind() == ErrorKind::NotFound => {}
            Err(e) => return Err(Error::fs(manifest, e)),
        }
        match dir.parent() {
            Some(parent) => dir = parent,
            None => {
                return Err(Error::SourceRootNotFound {
                    start: start.clone(),
                })
            }
        }
    }
}

/// Directory to start the source root search from for the given executable.
///
/// If the executable is itself a symlink (the usual case when the tool is
/// linked into `~/bin` by itself), the search starts next to its target.
pub fn executable_search_start(exe: &Path) -> Result<PathBuf> {
    let exe = absolute(exe)?;
    let meta = fs::symlink_metadata(&exe).map_err(|e| Error::fs(&exe, e))?;
    let resolved = if meta.file_type().is_symlink() {
        let target = fs::read_link(&exe).map_err(|e| Error::fs(&exe, e))?;
        resolve_link_target(&exe, &target)
    } else {
        exe
    };
    Ok(resolved
        .parent()
        .map(Path::to_path_buf)
        .unwrap_or_else(|| PathBuf::from("/")))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::os::unix::fs::symlink;
    use tempfile::TempDir;

    #[test]
    fn test_new_normalizes_roots() {
        let config = Config::new("/src/./dots", "/home/user/../user").unwrap();
        assert_eq!(config.source_root, PathBuf::from("/src/dots"));
        assert_eq!(config.target_root, PathBuf::from("/home/user"));
        assert!(!config.dry_run);
    }

    #[test]
    fn test_builders() {
        let config = Config::new("/s", "/t")
            .unwrap()
            .with_dry_run(true)
            .with_hostname("laptop");
        assert!(config.dry_run);
        assert_eq!(config.resolve_hostname().unwrap(), "laptop");
        assert_eq!(config.module_dir("vim"), PathBuf::from("/s/vim"));
        assert_eq!(config.manifest_path(), PathBuf::from("/s/bundles.json"));
    }

    #[test]
    fn test_resolve_hostname_from_system() {
        let config = Config::new("/s", "/t").unwrap();
        assert!(!config.resolve_hostname().unwrap().is_empty());
    }

    #[test]
    fn test_find_source_root_in_ancestor() {
        let temp = TempDir::new().unwrap();
        fs::write(temp.path().join(MANIFEST_FILENAME), "{}").unwrap();
        let nested = temp.path().join("manage").join("bin");
        fs::create_dir_all(&nested).unwrap();

        let found = find_source_root(&nested).unwrap();
        assert_eq!(found, absolute(temp.path()).unwrap());
    }

    #[test]
    fn test_find_source_root_missing() {
        let temp = TempDir::new().unwrap();
        // Only succeeds if no ancestor of the temp dir carries a manifest,
        // which holds for the system temp directory.
        let result = find_source_root(temp.path());
        assert!(matches!(result, Err(Error::SourceRootNotFound { .. })));
    }

    #[test]
    fn test_executable_search_start_follows_symlink() {
        let temp = TempDir::new().unwrap();
        let real_dir = temp.path().join("dots").join("manage");
        fs::create_dir_all(&real_dir).unwrap();
        let exe = real_dir.join("dotlink");
        fs::write(&exe, "").unwrap();
        let bin = temp.path().join("bin");
        fs::create_dir(&bin).unwrap();
        let link = bin.join("dotlink");
        symlink(&exe, &link).unwrap();

        assert_eq!(
            executable_search_start(&link).unwrap(),
            absolute(&real_dir).unwrap()
        );
        assert_eq!(
            executable_search_start(&exe).unwrap(),
            absolute(&real_dir).unwrap()
        );
    }
}
