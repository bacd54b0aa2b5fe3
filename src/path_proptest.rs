//! Property-based tests for path manipulation functions.
//!
//! These tests use proptest to generate random inputs and verify that
//! invariants hold for all possible inputs.

#[cfg(test)]
mod proptest_tests {
    use crate::path::{is_under, module_of, normalize};
    use proptest::prelude::*;
    use std::path::{Path, PathBuf};

    fn segment() -> impl Strategy<Value = String> {
        "[a-z_.][a-z0-9_.-]{0,7}".prop_filter("not a dot component", |s| s != "." && s != "..")
    }

    fn abs_path(max: usize) -> impl Strategy<Value = PathBuf> {
        prop::collection::vec(segment(), 0..max).prop_map(|segments| {
            let mut path = PathBuf::from("/");
            for s in segments {
                path.push(s);
            }
            path
        })
    }

    // ============================================================================
    // is_under property tests
    // ============================================================================

    proptest! {
        /// Property: every path is under itself
        #[test]
        fn is_under_is_reflexive(path in abs_path(6)) {
            prop_assert!(is_under(&path, &path));
        }

        /// Property: appending components keeps a path under its root
        #[test]
        fn is_under_accepts_descendants(root in abs_path(4), tail in prop::collection::vec(segment(), 1..4)) {
            let mut candidate = root.clone();
            for s in &tail {
                candidate.push(s);
            }
            prop_assert!(is_under(&root, &candidate));
        }

        /// Property: is_under agrees with component-wise prefix matching
        #[test]
        fn is_under_matches_starts_with(root in abs_path(4), candidate in abs_path(6)) {
            prop_assert_eq!(is_under(&root, &candidate), candidate.starts_with(&root));
        }

        /// Property: a sibling sharing a textual prefix is never under the root
        #[test]
        fn is_under_rejects_textual_prefix(root in abs_path(4), suffix in "[a-z0-9]{1,4}") {
            prop_assume!(root != Path::new("/"));
            let sibling = PathBuf::from(format!("{}{}", root.display(), suffix));
            prop_assert!(!is_under(&root, &sibling));
        }
    }

    // ============================================================================
    // normalize property tests
    // ============================================================================

    proptest! {
        /// Property: normalize is idempotent
        #[test]
        fn normalize_is_idempotent(path in "(/?)([a-z.]{1,3}/){0,6}[a-z.]{0,3}") {
            let once = normalize(Path::new(&path));
            let twice = normalize(&once);
            prop_assert_eq!(once, twice);
        }

        /// Property: normalized absolute paths contain no `.` or `..` components
        #[test]
        fn normalize_absolute_has_no_dot_components(path in "/([a-z.]{1,3}/){0,6}[a-z.]{0,3}") {
            let normalized = normalize(Path::new(&path));
            prop_assert!(normalized.is_absolute());
            for component in normalized.components() {
                prop_assert!(!matches!(
                    component,
                    std::path::Component::CurDir | std::path::Component::ParentDir
                ));
            }
        }

        /// Property: the owning module is the first component below the root
        #[test]
        fn module_of_returns_first_component(root in abs_path(3), module in segment(), rest in prop::collection::vec(segment(), 0..3)) {
            let mut target = root.join(&module);
            for s in &rest {
                target.push(s);
            }
            prop_assert_eq!(module_of(&root, &target), Some(module));
        }
    }
}
