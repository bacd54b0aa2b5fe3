//! # Error Suggestions
//!
//! Helper functions for error messages that say what went wrong AND how to
//! fix it.
//!
//! ## Usage
//!
//! ```rust,ignore
//! use dotlink::suggestions;
//!
//! return Err(suggestions::source_root_not_found(&start));
//! ```

use std::path::Path;

/// Generate an error for when no source root could be discovered.
///
/// Includes hints about:
/// - Creating the bundle manifest
/// - Using the --base flag
/// - Using the DOTLINK_BASE environment variable
pub fn source_root_not_found(start: &Path) -> anyhow::Error {
    anyhow::anyhow!(
        "Unable to find bundles.json in {start} or any parent directory\n\n\
         hint: Create an empty bundles.json at the root of your modules directory\n\
         hint: Use --base to point at the modules directory\n\
         hint: Set the DOTLINK_BASE environment variable",
        start = start.display()
    )
}

/// Generate a hint listing known modules when requested ones were missing.
pub fn unknown_modules(missing: &[String], known: &[String]) -> String {
    let mut message = format!("module(s) not found: {}", missing.join(", "));
    if known.is_empty() {
        message.push_str("\nhint: the modules directory has no modules yet");
    } else {
        message.push_str(&format!("\nhint: available modules: {}", known.join(", ")));
    }
    message
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_source_root_not_found_has_hints() {
        let err = source_root_not_found(Path::new("/opt/bin"));
        let msg = err.to_string();
        assert!(msg.contains("/opt/bin"));
        assert!(msg.contains("hint: Use --base"));
        assert!(msg.contains("DOTLINK_BASE"));
    }

    #[test]
    fn test_unknown_modules_lists_known() {
        let msg = unknown_modules(&["vmi".to_string()], &["base".to_string(), "vim".to_string()]);
        assert!(msg.contains("vmi"));
        assert!(msg.contains("available modules: base, vim"));
    }

    #[test]
    fn test_unknown_modules_without_known() {
        let msg = unknown_modules(&["vim".to_string()], &[]);
        assert!(msg.contains("no modules yet"));
    }
}
