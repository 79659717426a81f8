//! Tag enumeration and current-version detection.

use std::collections::HashMap;

use git2::Repository;
use semver::Version;
use tracing::{debug, warn};

use crate::error::GitError;

/// A git tag with optional semver version.
#[derive(Debug, Clone)]
pub struct TagInfo {
    pub name: String,
    pub oid: git2::Oid,
    pub version: Option<Version>,
}

fn is_stable_release_tag(name: &str) -> bool {
    let raw = name.strip_prefix('v').unwrap_or(name);
    let mut parts = raw.split('.');
    let major = parts.next();
    let minor = parts.next();
    let patch = parts.next();
    let extra = parts.next();

    extra.is_none()
        && major.is_some_and(|p| !p.is_empty() && p.chars().all(|c| c.is_ascii_digit()))
        && minor.is_some_and(|p| !p.is_empty() && p.chars().all(|c| c.is_ascii_digit()))
        && patch.is_some_and(|p| !p.is_empty() && p.chars().all(|c| c.is_ascii_digit()))
}

/// Get the latest stable semver tag reachable from HEAD.
///
/// Walks commits reachable from `HEAD` and returns the first commit that has
/// a strict stable release tag (`vX.Y.Z` or `X.Y.Z`) attached. Reachability
/// matters: a newer tag on another branch must not become the release base.
pub fn latest_release_tag(repo: &Repository) -> Result<Option<TagInfo>, GitError> {
    let head_oid = match repo.head().ok().and_then(|head| head.target()) {
        Some(oid) => oid,
        None => return Ok(None),
    };

    let mut tags_by_commit: HashMap<git2::Oid, Vec<TagInfo>> = HashMap::new();
    for tag in all_tags(repo)?
        .into_iter()
        .filter(|tag| tag.version.is_some() && is_stable_release_tag(&tag.name))
    {
        tags_by_commit.entry(tag.oid).or_default().push(tag);
    }

    if tags_by_commit.is_empty() {
        debug!("No stable semver tags found in repository");
        return Ok(None);
    }

    let mut revwalk = repo.revwalk().map_err(GitError::RevwalkError)?;
    revwalk.push(head_oid).map_err(GitError::RevwalkError)?;
    revwalk
        .set_sorting(git2::Sort::TOPOLOGICAL | git2::Sort::TIME)
        .map_err(GitError::RevwalkError)?;

    for oid in revwalk {
        let oid = oid.map_err(GitError::RevwalkError)?;
        if let Some(candidates) = tags_by_commit.get(&oid) {
            let latest = candidates
                .iter()
                .max_by(|a, b| a.version.cmp(&b.version))
                .cloned();
            if let Some(tag) = latest {
                debug!(tag = %tag.name, "Found latest reachable stable semver tag");
                return Ok(Some(tag));
            }
        }
    }

    Ok(None)
}

/// Get all tags from the repository.
pub fn all_tags(repo: &Repository) -> Result<Vec<TagInfo>, GitError> {
    let mut tags = Vec::new();

    repo.tag_foreach(|oid, name_bytes| {
        if let Ok(name_str) = std::str::from_utf8(name_bytes) {
            let name = name_str
                .strip_prefix("refs/tags/")
                .unwrap_or(name_str)
                .to_string();

            let version = version_from_tag(&name);

            // Annotated tags point at a tag object, not the commit
            let resolved_oid = match repo.find_tag(oid) {
                Ok(tag_obj) => tag_obj.target_id(),
                Err(e) => {
                    debug!(
                        tag = %name,
                        error = %e,
                        "Could not resolve annotated tag, using raw OID. \
                         This is normal for lightweight tags."
                    );
                    oid
                }
            };

            tags.push(TagInfo {
                name,
                oid: resolved_oid,
                version,
            });
        } else {
            warn!("Skipping tag with OID {} - name is not valid UTF-8", oid);
        }
        true
    })
    .map_err(GitError::RevwalkError)?;

    Ok(tags)
}

/// Extract a semver version from a tag name.
/// Handles both "v1.2.3" and "1.2.3" formats.
pub fn version_from_tag(tag_name: &str) -> Option<Version> {
    let version_str = tag_name.strip_prefix('v').unwrap_or(tag_name);
    Version::parse(version_str).ok()
}
