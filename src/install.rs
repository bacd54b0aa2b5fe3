//! # Install
//!
//! Runs an install request: broken-link cleanup first (unless disabled), then
//! the overlay linker once per selected module, each followed by its
//! host-specific variant when one exists.

use std::collections::HashSet;
use std::path::PathBuf;

use log::{info, warn};

use crate::config::Config;
use crate::defaults::{ALL_MODULES, DEFAULT_MODULE};
use crate::error::Result;
use crate::linker::{Linker, Report};
use crate::modules::{enumerate_modules, host_variant, host_variant_name};
use crate::path::validate_module_name;
use crate::probe;
use crate::reconcile::cleanup_broken_links;

/// Which modules an install request covers.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Selection {
    /// Only the default module.
    Default,
    /// Every module under the source root.
    All,
    /// The listed modules, in order.
    Named(Vec<String>),
}

impl Selection {
    /// Build a selection from command-line arguments.
    ///
    /// No arguments selects the default module, a leading `all` selects
    /// everything. Module names are validated before anything is touched.
    pub fn from_args(args: &[String]) -> Result<Self> {
        match args.first().map(String::as_str) {
            None => Ok(Selection::Default),
            Some(ALL_MODULES) => Ok(Selection::All),
            Some(_) => {
                for name in args {
                    validate_module_name(name)?;
                }
                Ok(Selection::Named(args.to_vec()))
            }
        }
    }
}

/// Options of an install request beyond the shared [`Config`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct InstallOptions {
    /// Skip the broken link cleanup that normally runs first.
    pub disable_check: bool,
}

/// Result of an install request.
#[derive(Debug, Clone, Default)]
pub struct InstallOutcome {
    /// Broken links removed before installing.
    pub removed_broken: Vec<PathBuf>,
    /// Modules that were placed, in order.
    pub installed: Vec<String>,
    /// Requested modules that do not exist.
    pub missing: Vec<String>,
    /// Linker actions across all modules.
    pub report: Report,
}

/// Install the selected modules into the target root.
pub fn install(
    config: &Config,
    selection: &Selection,
    options: InstallOptions,
) -> Result<InstallOutcome> {
    if let Selection::Named(names) = selection {
        for name in names {
            validate_module_name(name)?;
        }
    }

    let hostname = config.resolve_hostname()?;
    let mut outcome = InstallOutcome::default();

    if !options.disable_check {
        outcome.removed_broken = cleanup_broken_links(config)?;
    }

    let requested = match selection {
        Selection::Default => vec![DEFAULT_MODULE.to_string()],
        Selection::All => enumerate_modules(&config.source_root)?,
        Selection::Named(names) => names.clone(),
    };

    let mut linker = Linker::with_removed(config, &outcome.removed_broken);
    let mut seen = HashSet::new();
    for module in requested {
        install_one(config, &mut linker, &module, &mut seen, &mut outcome)?;
        if host_variant(&config.source_root, &module, &hostname).is_some() {
            let variant = host_variant_name(&module, &hostname);
            install_one(config, &mut linker, &variant, &mut seen, &mut outcome)?;
        }
    }

    outcome.report = linker.into_report();
    Ok(outcome)
}

fn install_one(
    config: &Config,
    linker: &mut Linker<'_>,
    module: &str,
    seen: &mut HashSet<String>,
    outcome: &mut InstallOutcome,
) -> Result<()> {
    if module.is_empty() || !seen.insert(module.to_string()) {
        return Ok(());
    }

    let module_dir = config.module_dir(module);
    if !probe::is_dir(&module_dir) {
        warn!("module {} does not exist, skipping", module);
        outcome.missing.push(module.to_string());
        return Ok(());
    }

    info!("install {}", module);
    linker.place_module(&module_dir, &config.target_root)?;
    outcome.installed.push(module.to_string());
    Ok(())
}
