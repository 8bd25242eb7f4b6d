//! Property-based tests for package strings and designator resolution.
//!
//! These tests use proptest to generate random inputs and verify that
//! invariants hold for all possible inputs.

#[cfg(test)]
mod proptest_tests {
    use crate::designator::{
        find_repo_designator, replace_all_repo_designators, replace_repo_designators,
    };
    use crate::error::Error;
    use crate::package::{build_package_string, parse_package_string, PackageReference};
    use crate::project::{ProjectConfig, RepoSpec};
    use proptest::prelude::*;

    fn project() -> ProjectConfig {
        ProjectConfig::new("proj", "/proj")
            .unwrap()
            .with_repo("core", RepoSpec::default())
    }

    // ============================================================================
    // package string property tests
    // ============================================================================

    proptest! {
        /// Property: building then parsing yields the original pair
        #[test]
        fn build_parse_round_trip(
            repo in "([a-zA-Z0-9_.@-]{1,12})?",
            path in "[a-zA-Z0-9_.-]{1,8}(/[a-zA-Z0-9_.@-]{1,8}){0,3}",
        ) {
            // A local path starting with '@' would read back as a designator
            prop_assume!(!repo.is_empty() || !path.starts_with('@'));

            let built = build_package_string(&repo, &path);
            let parsed = parse_package_string(&built).unwrap();
            prop_assert_eq!(parsed, PackageReference::new(repo, path));
        }

        /// Property: a designator with no package name is always rejected
        #[test]
        fn designator_without_package_fails(repo in "[a-zA-Z0-9_.-]*", slash in prop::bool::ANY) {
            let input = format!("@{}{}", repo, if slash { "/" } else { "" });
            let is_invalid = matches!(
                parse_package_string(&input),
                Err(Error::InvalidPackageString { .. })
            );
            prop_assert!(is_invalid);
        }

        /// Property: strings without a leading '@' always parse as local
        #[test]
        fn non_designator_strings_are_local(input in "[^@].*") {
            let parsed = parse_package_string(&input).unwrap();
            prop_assert!(parsed.is_local());
            prop_assert_eq!(parsed.path.as_str(), input.strip_suffix('/').unwrap_or(&input));
        }
    }

    // ============================================================================
    // designator property tests
    // ============================================================================

    proptest! {
        /// Property: a found designator starts at '@' and ends at '/'
        #[test]
        fn designator_span_is_well_formed(s in ".*") {
            if let Some(d) = find_repo_designator(&s) {
                prop_assert_eq!(&s[d.start..d.start + 1], "@");
                prop_assert_eq!(&s[d.end()..d.end() + 1], "/");
                prop_assert!(!d.repo_name(&s).contains('/'));
            } else {
                let no_slash_after_at = s.find('@').map_or(true, |at| !s[at..].contains('/'));
                prop_assert!(no_slash_after_at);
            }
        }

        /// Property: strings without '@' are never changed
        #[test]
        fn replace_without_at_is_identity(s in "[^@]*") {
            let project = project();
            prop_assert_eq!(replace_repo_designators(&s, &project), (s.clone(), false));
            prop_assert_eq!(replace_all_repo_designators(&s, &project), (s.clone(), false));
        }

        /// Property: unknown repositories are never changed
        #[test]
        fn replace_unknown_repo_is_identity(prefix in "[a-z/]{0,8}", suffix in "[a-z/]{0,8}") {
            let input = format!("{}@unknown/{}", prefix, suffix);
            let project = project();
            prop_assert_eq!(replace_repo_designators(&input, &project), (input.clone(), false));
        }

        /// Property: a known repository is replaced by its relative path
        #[test]
        fn replace_known_repo(prefix in "[a-z/]{0,8}", suffix in "[a-z/]{0,8}") {
            let input = format!("{}@core/{}", prefix, suffix);
            let (resolved, replaced) = replace_repo_designators(&input, &project());
            prop_assert!(replaced);
            prop_assert_eq!(resolved, format!("{}repos/core/{}", prefix, suffix));
        }
    }
}
