//! Release notarization: tag, push, remote release record, asset upload.

use std::path::{Path, PathBuf};

use octocrab::Octocrab;
use semver::Version;
use tracing::debug;

use crate::changelog::strip_release_header;
use crate::git::{create_annotated_tag, push_tag};

/// Outcome of one notarization attempt. Failures here are reported, never
/// thrown; the orchestrator treats them as non-fatal after a successful
/// publish.
#[derive(Debug)]
pub struct GitHubReleaseResult {
    pub success: bool,
    pub tag_name: String,
    pub release_url: Option<String>,
    pub error: Option<String>,
}

impl GitHubReleaseResult {
    fn failure(tag_name: String, error: impl Into<String>) -> Self {
        Self {
            success: false,
            tag_name,
            release_url: None,
            error: Some(error.into()),
        }
    }
}

/// Creates the version tag, pushes it, and records the release on GitHub.
pub struct ReleaseNotary {
    client: Option<Octocrab>,
    target: Option<(String, String)>,
    workdir: PathBuf,
    remote: String,
}

impl ReleaseNotary {
    /// `client` is `None` when no token was found; `target` is `None` when
    /// the origin remote is missing or not a GitHub URL. Both cases produce
    /// clean structured failures at call time, before any mutation.
    pub fn new(client: Option<Octocrab>, target: Option<(String, String)>, workdir: &Path) -> Self {
        Self {
            client,
            target,
            workdir: workdir.to_path_buf(),
            remote: "origin".to_string(),
        }
    }

    /// Tag `v<version>`, push the tag, create the release record, and upload
    /// the tarball as a release asset. In dry-run mode nothing is mutated;
    /// the planned actions are logged as a preview.
    pub async fn create_release(
        &self,
        version: &Version,
        changelog: &str,
        tarball_path: Option<&Path>,
        dry_run: bool,
        prerelease: bool,
    ) -> GitHubReleaseResult {
        let tag_name = format!("v{}", version);

        if dry_run {
            println!("  [DRY RUN] Would create tag {} and push it", tag_name);
            println!("  [DRY RUN] Would create GitHub release {}", tag_name);
            if let Some(path) = tarball_path {
                println!("  [DRY RUN] Would upload asset {}", path.display());
            }
            return GitHubReleaseResult {
                success: true,
                tag_name,
                release_url: None,
                error: None,
            };
        }

        // All preconditions before the first mutation
        let Some((owner, repo)) = self.target.clone() else {
            return GitHubReleaseResult::failure(
                tag_name,
                "could not resolve GitHub owner/repo from the origin remote",
            );
        };
        let Some(client) = self.client.as_ref() else {
            return GitHubReleaseResult::failure(
                tag_name,
                "GitHub token not found: set GITHUB_TOKEN or GH_TOKEN",
            );
        };

        if let Err(e) = create_annotated_tag(&self.workdir, &tag_name) {
            return GitHubReleaseResult::failure(tag_name, e.to_string());
        }
        println!("  [DONE] Created tag {}", tag_name);

        if let Err(e) = push_tag(&self.workdir, &self.remote, &tag_name) {
            return GitHubReleaseResult::failure(tag_name, e.to_string());
        }
        println!("  [DONE] Pushed tag to {}", self.remote);

        let body = strip_release_header(changelog);
        let release = match client
            .repos(&owner, &repo)
            .releases()
            .create(&tag_name)
            .name(&tag_name)
            .body(body)
            .prerelease(prerelease)
            .send()
            .await
        {
            Ok(release) => release,
            Err(e) => {
                return GitHubReleaseResult::failure(
                    tag_name,
                    format!("failed to create GitHub release: {}", e),
                );
            }
        };

        let release_url = release.html_url.to_string();
        println!("  [DONE] Created GitHub release {}", release_url);

        if let Some(path) = tarball_path {
            if let Err(e) = self
                .upload_asset(client, &owner, &repo, release.id.into_inner(), path)
                .await
            {
                return GitHubReleaseResult {
                    success: false,
                    tag_name,
                    release_url: Some(release_url),
                    error: Some(e),
                };
            }
        }

        GitHubReleaseResult {
            success: true,
            tag_name,
            release_url: Some(release_url),
            error: None,
        }
    }

    async fn upload_asset(
        &self,
        client: &Octocrab,
        owner: &str,
        repo: &str,
        release_id: u64,
        path: &Path,
    ) -> Result<(), String> {
        let name = path
            .file_name()
            .and_then(|n| n.to_str())
            .ok_or_else(|| format!("invalid tarball path: {}", path.display()))?
            .to_string();

        let data = std::fs::read(path)
            .map_err(|e| format!("failed to read tarball {}: {}", path.display(), e))?;

        debug!(asset = %name, bytes = data.len(), "Uploading release asset");
        client
            .repos(owner, repo)
            .releases()
            .upload_asset(release_id, &name, data.into())
            .send()
            .await
            .map_err(|e| format!("failed to upload release asset: {}", e))?;

        println!("  [DONE] Uploaded asset {}", name);
        Ok(())
    }
}
