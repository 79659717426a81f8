//! PR-title validation against the commits in range.

use git2::Repository;

use crate::error::VersionError;
use crate::git::{commits_since, latest_release_tag};
use crate::version::{classify, classify_text};

/// Result of comparing a PR title's implied bump with the commit range's.
#[derive(Debug)]
pub struct ValidationOutcome {
    pub ok: bool,
    pub message: String,
}

/// Check that the PR title's implied bump matches the bump implied by the
/// commits since the latest release tag. Both implying no release also
/// counts as a match.
pub fn validate_pr_title(repo: &Repository, title: &str) -> Result<ValidationOutcome, VersionError> {
    let title_bump = classify_text(title);

    let latest_tag = latest_release_tag(repo)?;
    let tag_display = latest_tag
        .as_ref()
        .map(|t| t.name.clone())
        .unwrap_or_else(|| "the repository root".to_string());
    let commits = commits_since(repo, latest_tag.as_ref().map(|t| t.oid))?;
    let commits_bump = classify(&commits);

    if title_bump.release_type == commits_bump.release_type {
        let message = format!(
            "PR title and commits since {} agree on a '{}' release.",
            tag_display, title_bump.release_type
        );
        return Ok(ValidationOutcome { ok: true, message });
    }

    let message = format!(
        "PR title implies a '{}' release ({}) but the commits since {} imply '{}' ({}).",
        title_bump.release_type,
        title_bump.reason,
        tag_display,
        commits_bump.release_type,
        commits_bump.reason
    );
    Ok(ValidationOutcome { ok: false, message })
}
