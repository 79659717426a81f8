//! Run configuration, resolved once at the process boundary.
//!
//! Collaborators never read the environment themselves; the token is looked
//! up here and passed explicitly into the GitHub-facing components.

use std::env;
use std::path::PathBuf;

/// Configuration for a single release run, derived from CLI flags.
///
/// Supplied once at invocation and never mutated.
#[derive(Debug, Clone)]
pub struct ReleaseOptions {
    /// Preview everything; suppress manifest writes, tags, publishes and
    /// remote release creation. PR comments are still posted when an
    /// explicit `pr_number` is supplied.
    pub dry_run: bool,
    /// Prerelease identifier (e.g. `beta`), producing `X.Y.Z-beta.0`
    /// versions published under a matching npm dist-tag.
    pub prerelease: Option<String>,
    /// Directory containing the package to build and publish.
    pub plugin_path: PathBuf,
    /// Target a single PR with status comments instead of scanning commit
    /// subjects for `#123` references.
    pub pr_number: Option<u64>,
}

/// Resolve the GitHub token from the environment.
///
/// Checks `GITHUB_TOKEN` then `GH_TOKEN`; the first non-empty value wins.
pub fn github_token() -> Option<String> {
    for name in ["GITHUB_TOKEN", "GH_TOKEN"] {
        if let Ok(token) = env::var(name) {
            if !token.is_empty() {
                return Some(token);
            }
        }
    }
    None
}

#[cfg(test)]
mod tests {
    use serial_test::serial;

    use super::*;

    #[test]
    #[serial]
    fn github_token_prefers_github_token_var() {
        temp_env::with_vars(
            [
                ("GITHUB_TOKEN", Some("primary")),
                ("GH_TOKEN", Some("secondary")),
            ],
            || {
                assert_eq!(github_token().as_deref(), Some("primary"));
            },
        );
    }

    #[test]
    #[serial]
    fn github_token_falls_back_to_gh_token() {
        temp_env::with_vars(
            [("GITHUB_TOKEN", None), ("GH_TOKEN", Some("secondary"))],
            || {
                assert_eq!(github_token().as_deref(), Some("secondary"));
            },
        );
    }

    #[test]
    #[serial]
    fn github_token_ignores_empty_values() {
        temp_env::with_vars(
            [("GITHUB_TOKEN", Some("")), ("GH_TOKEN", None)],
            || {
                assert_eq!(github_token(), None);
            },
        );
    }
}
