//! Path manipulation utilities for dotlink
//!
//! Everything here is purely lexical. No function in this module touches the
//! filesystem, so link targets are compared exactly as they were read.

use std::path::{Component, Path, PathBuf};

use crate::error::{Error, Result};

/// Lexically normalize a path: drop `.` components and fold `..` into the
/// preceding component. A `..` at the root is dropped.
pub fn normalize(path: &Path) -> PathBuf {
    let mut out = PathBuf::new();
    for component in path.components() {
        match component {
            Component::CurDir => {}
            Component::ParentDir => {
                let popped = match out.components().next_back() {
                    Some(Component::Normal(_)) => out.pop(),
                    Some(Component::RootDir) | Some(Component::Prefix(_)) => true,
                    _ => false,
                };
                if !popped {
                    out.push("..");
                }
            }
            other => out.push(other.as_os_str()),
        }
    }
    if out.as_os_str().is_empty() {
        out.push(".");
    }
    out
}

/// Turn `path` into a normalized absolute path, resolving relative paths
/// against the current directory.
pub fn absolute(path: &Path) -> Result<PathBuf> {
    let abs = std::path::absolute(path).map_err(|e| Error::fs(path, e))?;
    Ok(normalize(&abs))
}

/// Returns true iff `candidate` is `root` or lies below it.
///
/// Walks up from `candidate` one parent at a time until the remaining path is
/// no longer than `root`, then compares for equality. Both paths are expected
/// to be normalized.
pub fn is_under(root: &Path, candidate: &Path) -> bool {
    let root_len = root.as_os_str().len();
    let mut current = candidate;
    loop {
        if current.as_os_str().len() <= root_len {
            return current == root;
        }
        match current.parent() {
            Some(parent) => current = parent,
            None => return false,
        }
    }
}

/// Resolve a link target read from `link` into a normalized path.
///
/// Absolute targets are only normalized. Relative targets are interpreted
/// against the directory containing the link.
pub fn resolve_link_target(link: &Path, target: &Path) -> PathBuf {
    if target.is_absolute() {
        return normalize(target);
    }
    let base = link.parent().unwrap_or_else(|| Path::new("/"));
    normalize(&base.join(target))
}

/// Name of the module owning `target`: the first component of `target`
/// relative to `source_root`.
pub fn module_of(source_root: &Path, target: &Path) -> Option<String> {
    let rel = target.strip_prefix(source_root).ok()?;
    match rel.components().next()? {
        Component::Normal(name) => Some(name.to_string_lossy().into_owned()),
        _ => None,
    }
}

/// Check that a module name is a single plain directory name.
pub fn validate_module_name(name: &str) -> Result<()> {
    let invalid = |message: &str| Error::InvalidModule {
        name: name.to_string(),
        message: message.to_string(),
    };

    if name.is_empty() {
        return Err(invalid("module name is empty"));
    }
    let mut components = Path::new(name).components();
    match (components.next(), components.next()) {
        (Some(Component::Normal(_)), None) => Ok(()),
        _ => Err(invalid("must be a single directory name")),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_normalize() {
        assert_eq!(normalize(Path::new("/a/./b/../c")), PathBuf::from("/a/c"));
        assert_eq!(normalize(Path::new("/../a")), PathBuf::from("/a"));
        assert_eq!(normalize(Path::new("a/../../b")), PathBuf::from("../b"));
        assert_eq!(normalize(Path::new("./")), PathBuf::from("."));
        assert_eq!(normalize(Path::new("/a/b/")), PathBuf::from("/a/b"));
    }

    #[test]
    fn test_is_under() {
        let root = Path::new("/home/user/dotfiles");
        assert!(is_under(root, Path::new("/home/user/dotfiles")));
        assert!(is_under(root, Path::new("/home/user/dotfiles/base/.bashrc")));
        assert!(!is_under(root, Path::new("/home/user/dotfiles-old/base")));
        assert!(!is_under(root, Path::new("/home/user")));
        assert!(!is_under(root, Path::new("/etc/passwd")));
    }

    #[test]
    fn test_is_under_relative_candidate() {
        assert!(!is_under(Path::new("/src"), Path::new("some/long/relative/path")));
    }

    #[test]
    fn test_resolve_link_target() {
        let link = Path::new("/home/user/.vimrc");
        assert_eq!(
            resolve_link_target(link, Path::new("dotfiles/vim/.vimrc")),
            PathBuf::from("/home/user/dotfiles/vim/.vimrc")
        );
        assert_eq!(
            resolve_link_target(link, Path::new("/opt/../srv/x")),
            PathBuf::from("/srv/x")
        );
    }

    #[test]
    fn test_module_of() {
        let root = Path::new("/d");
        assert_eq!(module_of(root, Path::new("/d/vim/bin/x")), Some("vim".into()));
        assert_eq!(module_of(root, Path::new("/d/base")), Some("base".into()));
        assert_eq!(module_of(root, Path::new("/d")), None);
        assert_eq!(module_of(root, Path::new("/elsewhere/x")), None);
    }

    #[test]
    fn test_validate_module_name() {
        assert!(validate_module_name("base").is_ok());
        assert!(validate_module_name("base_host").is_ok());
        assert!(validate_module_name("").is_err());
        assert!(validate_module_name("..").is_err());
        assert!(validate_module_name("a/b").is_err());
        assert!(validate_module_name("/abs").is_err());
    }
}
