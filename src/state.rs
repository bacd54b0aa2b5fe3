//! Installed-state computation.
//!
//! A module counts as installed when at least one managed link anywhere under
//! the target root (at any merge depth) points into it. The state is derived
//! from a fresh walk every time and never persisted.

use std::collections::BTreeMap;

use log::debug;

use crate::config::Config;
use crate::error::Result;
use crate::managed::managed_links;
use crate::modules::enumerate_modules;

/// Module name to installed flag, ordered by name.
pub type InstallState = BTreeMap<String, bool>;

/// Modules with at least one managed link under the target root.
pub fn installed_modules(config: &Config) -> Result<InstallState> {
    let mut state = InstallState::new();
    for link in managed_links(config)? {
        if let Some(module) = link.module(&config.source_root) {
            debug!("module {}, target {}", module, link.target.display());
            state.insert(module, true);
        }
    }
    Ok(state)
}

/// Installed modules plus every other known module marked as not installed.
pub fn current_state(config: &Config) -> Result<InstallState> {
    let mut state = installed_modules(config)?;
    for module in enumerate_modules(&config.source_root)? {
        state.entry(module).or_insert(false);
    }
    Ok(state)
}

/// [`current_state`] as an ordered list of `(module, installed)` pairs.
pub fn status(config: &Config) -> Result<Vec<(String, bool)>> {
    Ok(current_state(config)?.into_iter().collect())
}
