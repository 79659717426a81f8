//! Comment bodies posted on pull requests.

use semver::Version;

use crate::version::VersionInfo;

/// Body for the `no-commits` skip, posted when an explicit PR was targeted.
pub fn no_commits_body() -> String {
    "**No release**\n\nThere are no commits since the last release tag, so no new version \
     will be published."
        .to_string()
}

/// Body for the `no-conventional-commits` skip.
pub fn no_conventional_commits_body() -> String {
    "**No release**\n\nNone of the commits since the last release tag are release-worthy \
     (`feat:` or `fix:` conventional commits), so no new version will be published."
        .to_string()
}

/// Before/after summary for an explicitly targeted PR, in dry-run or real
/// mode.
pub fn version_summary_body(info: &VersionInfo, dry_run: bool, release_url: Option<&str>) -> String {
    let heading = if dry_run {
        "**Release preview (dry run)**"
    } else {
        "**Released**"
    };

    let mut body = format!(
        "{}\n\n| Current version | New version | Bump |\n| --- | --- | --- |\n| {} | {} | {} |\n",
        heading, info.current_version, info.new_version, info.release_type
    );

    if let Some(url) = release_url {
        body.push_str(&format!("\nRelease notes: {}\n", url));
    }

    body
}

/// Notice posted on every PR referenced by the released commit range.
pub fn released_body(version: &Version, release_url: Option<&str>) -> String {
    let mut body = format!("🚀 This change was released as part of **v{}**.", version);
    if let Some(url) = release_url {
        body.push_str(&format!("\n\nRelease notes: {}", url));
    }
    body
}
