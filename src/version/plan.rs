//! Version planning: latest tag + classification -> next version.

use git2::Repository;
use semver::{Prerelease, Version};
use tracing::debug;

use crate::error::VersionError;
use crate::git::{commits_since, latest_release_tag};

use super::bump::{BumpType, classify};

/// The planned version transition for one run. Created once, immutable
/// thereafter.
#[derive(Debug, Clone)]
pub struct VersionInfo {
    pub current_version: Version,
    pub new_version: Version,
    pub release_type: BumpType,
    pub reason: String,
}

/// Plan the next version from the latest reachable tag and the commits since.
///
/// Returns `Ok(None)` when the classifier finds nothing releasable. The
/// orchestrator checks changelog emptiness before calling this, so the
/// `None` path is a secondary guard rather than the primary skip signal.
pub fn plan(repo: &Repository, prerelease: Option<&str>) -> Result<Option<VersionInfo>, VersionError> {
    let latest_tag = latest_release_tag(repo)?;
    let current_version = latest_tag
        .as_ref()
        .and_then(|t| t.version.clone())
        .unwrap_or_else(|| Version::new(0, 0, 0));

    let commits = commits_since(repo, latest_tag.as_ref().map(|t| t.oid))?;
    let bump = classify(&commits);

    if bump.release_type == BumpType::None {
        debug!(reason = %bump.reason, "No releasable commits, nothing to plan");
        return Ok(None);
    }

    let new_version = next_version(&current_version, bump.release_type, prerelease)?;

    Ok(Some(VersionInfo {
        current_version,
        new_version,
        release_type: bump.release_type,
        reason: bump.reason,
    }))
}

/// Compute the next version for a given bump.
///
/// With a prerelease identifier, the ordinary increment is qualified as
/// `<base>-<id>.0` (pre-major/pre-minor/pre-patch semantics). Any existing
/// prerelease on `current` is discarded before incrementing.
pub fn next_version(
    current: &Version,
    bump: BumpType,
    prerelease: Option<&str>,
) -> Result<Version, VersionError> {
    let mut next = match bump {
        BumpType::Major => Version::new(current.major + 1, 0, 0),
        BumpType::Minor => Version::new(current.major, current.minor + 1, 0),
        BumpType::Patch => Version::new(current.major, current.minor, current.patch + 1),
        BumpType::None => return Err(VersionError::NoReleasableChange),
    };

    if let Some(id) = prerelease {
        next.pre = Prerelease::new(&format!("{}.0", id))
            .map_err(|e| VersionError::InvalidPrerelease(id.to_string(), e))?;
    }

    Ok(next)
}
