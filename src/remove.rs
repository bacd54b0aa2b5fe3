//! Removal of managed links.

use std::fs;
use std::path::PathBuf;

use log::info;

use crate::config::Config;
use crate::error::{Error, Result};
use crate::managed::managed_links;
use crate::path::{is_under, validate_module_name};

/// Remove the managed links belonging to `modules`, or every managed link
/// when `modules` is empty.
///
/// Merge directories are left in place. Returns the removed link paths (the
/// ones that would be removed, in a dry run).
pub fn remove(config: &Config, modules: &[String]) -> Result<Vec<PathBuf>> {
    for module in modules {
        validate_module_name(module)?;
    }

    let roots: Vec<PathBuf> = if modules.is_empty() {
        vec![config.source_root.clone()]
    } else {
        modules.iter().map(|m| config.module_dir(m)).collect()
    };
    info!("removing links into {:?}", roots);

    let mut removed = Vec::new();
    for link in managed_links(config)? {
        if !roots.iter().any(|root| is_under(root, &link.target)) {
            continue;
        }
        if !config.dry_run {
            fs::remove_file(&link.path).map_err(|e| Error::fs(&link.path, e))?;
        }
        info!("removed {}", link.path.display());
        removed.push(link.path);
    }
    Ok(removed)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::install::{install, InstallOptions, Selection};
    use tempfile::TempDir;

    fn installed_fixture() -> (TempDir, Config) {
        let temp = TempDir::new().unwrap();
        let source = temp.path().join("src");
        let target = temp.path().join("home");
        for file in ["base/.bashrc", "base/bin/ls-wrapper", "base_laptop/.x", "vim/bin/helper"] {
            let path = source.join(file);
            fs::create_dir_all(path.parent().unwrap()).unwrap();
            fs::write(&path, "").unwrap();
        }
        fs::create_dir_all(&target).unwrap();
        let config = Config::new(&source, &target)
            .unwrap()
            .with_hostname("laptop");
        install(&config, &Selection::All, InstallOptions::default()).unwrap();
        (temp, config)
    }

    #[test]
    fn test_remove_single_module() {
        let (_temp, config) = installed_fixture();

        let removed = remove(&config, &["vim".to_string()]).unwrap();

        assert_eq!(removed, vec![config.target_root.join("bin/helper")]);
        assert!(config.target_root.join("bin/ls-wrapper").exists());
        // The host variant shares a name prefix but is a different module.
        assert!(config.target_root.join(".x").exists());
    }

    #[test]
    fn test_remove_does_not_match_name_prefix() {
        let (_temp, config) = installed_fixture();

        remove(&config, &["base".to_string()]).unwrap();

        assert!(fs::symlink_metadata(config.target_root.join(".x")).is_ok());
        assert!(fs::symlink_metadata(config.target_root.join(".bashrc")).is_err());
    }

    #[test]
    fn test_remove_everything() {
        let (_temp, config) = installed_fixture();

        let removed = remove(&config, &[]).unwrap();

        assert_eq!(removed.len(), 4);
        assert!(crate::state::installed_modules(&config).unwrap().is_empty());
        // The merge directory stays behind.
        assert!(config.target_root.join("bin").is_dir());
    }

    #[test]
    fn test_remove_keeps_foreign_links() {
        let (temp, config) = installed_fixture();
        let foreign = config.target_root.join(".foreign");
        std::os::unix::fs::symlink(temp.path(), &foreign).unwrap();

        remove(&config, &[]).unwrap();

        assert!(fs::symlink_metadata(&foreign).is_ok());
    }

    #[test]
    fn test_remove_dry_run() {
        let (_temp, config) = installed_fixture();

        let removed = remove(&config.clone().with_dry_run(true), &[]).unwrap();

        assert_eq!(removed.len(), 4);
        assert!(config.target_root.join(".bashrc").exists());
    }

    #[test]
    fn test_remove_rejects_bad_names() {
        let (_temp, config) = installed_fixture();
        assert!(remove(&config, &["../x".to_string()]).is_err());
    }
}
