//! GitHub API operations using octocrab.

pub mod comments;
pub mod release;
pub mod remote;

use octocrab::Octocrab;

use crate::error::GitHubError;

pub use comments::{BOT_MARKER, CommentResult, PrNotifier, extract_referenced_prs};
pub use release::{GitHubReleaseResult, ReleaseNotary};
pub use remote::{parse_github_remote, resolve_target};

/// Build an authenticated client from a token resolved at the process
/// boundary. `None` token yields `None`: GitHub-facing steps then fail
/// cleanly at call time instead of attempting unauthenticated calls.
pub fn build_client(token: Option<&str>) -> Result<Option<Octocrab>, GitHubError> {
    match token {
        Some(token) => Octocrab::builder()
            .personal_token(token.to_string())
            .build()
            .map(Some)
            .map_err(|e| GitHubError::ClientBuild(Box::new(e))),
        None => Ok(None),
    }
}
