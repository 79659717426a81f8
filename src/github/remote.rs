//! Owner/repo resolution from git remote URLs.

use git2::Repository;

use crate::error::GitHubError;

/// Extract owner and repo from a git remote URL.
/// Accepts both SSH (`git@github.com:owner/repo.git`) and HTTPS forms.
pub fn parse_github_remote(url: &str) -> Result<(String, String), GitHubError> {
    if url.starts_with("git@github.com:") {
        let path = url
            .strip_prefix("git@github.com:")
            .ok_or(GitHubError::InvalidRepositoryUrl)?;
        return parse_owner_repo_path(path);
    }

    if url.contains("github.com/") {
        let path = url
            .split("github.com/")
            .nth(1)
            .ok_or(GitHubError::InvalidRepositoryUrl)?;
        return parse_owner_repo_path(path);
    }

    Err(GitHubError::InvalidRepositoryUrl)
}

fn parse_owner_repo_path(path: &str) -> Result<(String, String), GitHubError> {
    let path = path.strip_suffix(".git").unwrap_or(path);
    let parts: Vec<&str> = path.split('/').collect();

    if parts.len() >= 2 && !parts[0].is_empty() && !parts[1].is_empty() {
        Ok((parts[0].to_string(), parts[1].to_string()))
    } else {
        Err(GitHubError::InvalidRepositoryUrl)
    }
}

/// Resolve the `(owner, repo)` target from the repository's `origin` remote.
pub fn resolve_target(repo: &Repository) -> Result<(String, String), GitHubError> {
    let remote = repo
        .find_remote("origin")
        .map_err(|_| GitHubError::NoOriginRemote)?;
    let url = remote.url().ok_or(GitHubError::NoOriginRemote)?;
    parse_github_remote(url)
}
