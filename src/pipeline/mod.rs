//! Release pipeline: sequence classification, versioning, build, publish,
//! notarization, and PR notification into one run.

pub mod messages;
pub mod validate;

use git2::Repository;
use tracing::warn;

use crate::changelog;
use crate::config::ReleaseOptions;
use crate::github::{PrNotifier, ReleaseNotary, extract_referenced_prs};
use crate::registry::PackageRegistry;
use crate::version::{BumpType, persist_version, plan};

pub use validate::{ValidationOutcome, validate_pr_title};

/// Why a run ended without a release. Skips are successful outcomes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SkipReason {
    NoCommits,
    NoConventionalCommits,
}

impl SkipReason {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::NoCommits => "no-commits",
            Self::NoConventionalCommits => "no-conventional-commits",
        }
    }
}

impl std::fmt::Display for SkipReason {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// The single terminal output of one orchestration run.
///
/// Exactly one of `skipped` or a completed release outcome holds; a run is
/// never both skipped and successful-with-a-version. Fields computed before
/// an early exit are carried in the result regardless.
#[derive(Debug, Default)]
pub struct ReleaseResult {
    pub success: bool,
    pub skipped: bool,
    pub skip_reason: Option<SkipReason>,
    pub version: Option<String>,
    pub release_type: Option<BumpType>,
    pub changelog: Option<String>,
    pub error: Option<String>,
}

impl ReleaseResult {
    fn skip(reason: SkipReason) -> Self {
        Self {
            success: true,
            skipped: true,
            skip_reason: Some(reason),
            ..Self::default()
        }
    }
}

/// Run the full release pipeline.
///
/// Plan, build, pack, and publish failures are fatal; notarization failure
/// after a successful publish is a logged warning (the registry publish is
/// the source of truth for "did the release happen"); notification never
/// affects the reported outcome.
pub async fn run_release(
    repo: &Repository,
    options: &ReleaseOptions,
    registry: &dyn PackageRegistry,
    notary: &ReleaseNotary,
    notifier: &PrNotifier,
) -> ReleaseResult {
    let mut result = ReleaseResult::default();

    // ── Stage 1: commits since the latest release tag ──
    let latest_tag = match crate::git::latest_release_tag(repo) {
        Ok(tag) => tag,
        Err(e) => {
            result.error = Some(e.to_string());
            return result;
        }
    };
    let tag_display = latest_tag
        .as_ref()
        .map(|t| t.name.clone())
        .unwrap_or_else(|| "(none)".to_string());

    let commits = match crate::git::commits_since(repo, latest_tag.as_ref().map(|t| t.oid)) {
        Ok(commits) => commits,
        Err(e) => {
            result.error = Some(e.to_string());
            return result;
        }
    };
    println!("Found {} commits since {}", commits.len(), tag_display);

    if commits.is_empty() {
        println!("  [SKIP] No commits since {}; nothing to release", tag_display);
        if let Some(pr) = options.pr_number {
            notify_one(notifier, pr, &messages::no_commits_body()).await;
        }
        return ReleaseResult::skip(SkipReason::NoCommits);
    }

    // ── Stage 2: changelog check ──
    // Emptiness here is the authoritative skip signal; it runs before
    // version planning because the classifier can disagree with it on
    // ranges with no releasable commits.
    let changelog_body = changelog::render(&commits);
    if changelog_body.trim().is_empty() {
        println!(
            "  [SKIP] No releasable (feat/fix) commits since {}; nothing to release",
            tag_display
        );
        if let Some(pr) = options.pr_number {
            notify_one(notifier, pr, &messages::no_conventional_commits_body()).await;
        }
        return ReleaseResult::skip(SkipReason::NoConventionalCommits);
    }

    // ── Stage 3: version planning ──
    let info = match plan(repo, options.prerelease.as_deref()) {
        Ok(Some(info)) => info,
        Ok(None) => {
            // Secondary guard; the changelog check above normally catches
            // this case first.
            if let Some(pr) = options.pr_number {
                notify_one(notifier, pr, &messages::no_conventional_commits_body()).await;
            }
            return ReleaseResult::skip(SkipReason::NoConventionalCommits);
        }
        Err(e) => {
            result.error = Some(e.to_string());
            return result;
        }
    };

    println!(
        "Version: {} -> {} ({}: {})",
        info.current_version, info.new_version, info.release_type, info.reason
    );

    let changelog_full = changelog::render_with_header(&info.new_version, &commits);
    result.version = Some(info.new_version.to_string());
    result.release_type = Some(info.release_type);
    result.changelog = Some(changelog_full.clone());

    // ── Stage 4: manifest update ──
    let manifest_path = options.plugin_path.join("package.json");
    if options.dry_run {
        println!(
            "  [DRY RUN] Would set version {} in {}",
            info.new_version,
            manifest_path.display()
        );
    } else if let Err(e) = persist_version(&manifest_path, &info.new_version) {
        result.error = Some(e.to_string());
        return result;
    } else {
        println!(
            "  [DONE] Set version {} in {}",
            info.new_version,
            manifest_path.display()
        );
    }

    // ── Stage 5: build (real even in dry-run) ──
    let build = registry.build(&options.plugin_path);
    if !build.success {
        eprintln!("  [FAIL] Build failed:\n{}", build.output);
        result.error = Some(format!("build failed: {}", build.output));
        return result;
    }
    println!("  [DONE] Built package");

    // ── Stage 6: pack ──
    let pack = registry.pack(&options.plugin_path, &info.new_version, options.dry_run);
    if !pack.success {
        let detail = pack.error.unwrap_or_else(|| "unknown pack failure".to_string());
        eprintln!("  [FAIL] Pack failed: {}", detail);
        result.error = Some(format!("pack failed: {}", detail));
        return result;
    }
    match (&pack.tarball_name, options.dry_run) {
        (Some(name), true) => println!("  [DRY RUN] Would pack {}", name),
        (Some(name), false) => println!("  [DONE] Packed {}", name),
        (None, _) => {}
    }

    // ── Stage 7: publish ──
    let publish = registry.publish(
        &options.plugin_path,
        options.dry_run,
        options.prerelease.as_deref(),
    );
    if !publish.success {
        eprintln!("  [FAIL] Publish failed:\n{}", publish.output);
        result.error = Some(format!("publish failed: {}", publish.output));
        return result;
    }
    if options.dry_run {
        println!("  [DRY RUN] Previewed publish (no package was uploaded)");
    } else {
        println!("  [DONE] Published to registry");
    }

    // ── Stage 8: notarize (non-fatal) ──
    let release = notary
        .create_release(
            &info.new_version,
            &changelog_full,
            pack.tarball_path.as_deref(),
            options.dry_run,
            options.prerelease.is_some(),
        )
        .await;
    if !release.success {
        let detail = release
            .error
            .as_deref()
            .unwrap_or("unknown notarization failure");
        warn!(error = %detail, "GitHub release failed after a successful publish");
        println!(
            "  [WARN] GitHub release failed ({}); the registry publish still succeeded",
            detail
        );
    }

    // ── Stage 9: notify (never affects the outcome) ──
    if let Some(pr) = options.pr_number {
        let body = messages::version_summary_body(&info, options.dry_run, release.release_url.as_deref());
        notify_one(notifier, pr, &body).await;
    } else if !options.dry_run {
        let subjects = commits.iter().map(|c| c.summary.as_str());
        let body = messages::released_body(&info.new_version, release.release_url.as_deref());
        for pr in extract_referenced_prs(subjects) {
            notify_one(notifier, pr, &body).await;
        }
    }

    result.success = true;
    result
}

/// Post one comment, logging the outcome without failing the run.
async fn notify_one(notifier: &PrNotifier, pr_number: u64, body: &str) {
    let outcome = notifier.notify(pr_number, body).await;
    if outcome.success {
        let verb = if outcome.created { "Posted" } else { "Updated" };
        println!("  [DONE] {} status comment on #{}", verb, pr_number);
    } else {
        let detail = outcome.error.as_deref().unwrap_or("unknown comment failure");
        warn!(pr = pr_number, error = %detail, "PR comment failed");
        println!("  [WARN] Could not comment on #{}: {}", pr_number, detail);
    }
}
