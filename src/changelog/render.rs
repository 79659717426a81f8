//! Release-note rendering from conventional commits.

use chrono::Utc;
use semver::Version;

use crate::git::{CommitType, ParsedCommit};

/// Render release-note text for a set of commits.
///
/// Output groups breaking changes, features, and fixes into sections, each
/// line carrying the scope and an abbreviated hash. Returns an empty string
/// when nothing release-worthy exists; the orchestrator treats that
/// emptiness as the authoritative "no releasable commits" signal.
pub fn render(commits: &[ParsedCommit]) -> String {
    let mut breaking: Vec<&ParsedCommit> = Vec::new();
    let mut features: Vec<&ParsedCommit> = Vec::new();
    let mut fixes: Vec<&ParsedCommit> = Vec::new();

    for commit in commits {
        if commit.breaking {
            breaking.push(commit);
        }
        match commit.commit_type {
            Some(CommitType::Feat) if !commit.breaking => features.push(commit),
            Some(CommitType::Fix) if !commit.breaking => fixes.push(commit),
            _ => {}
        }
    }

    let mut out = String::new();
    append_section(&mut out, "⚠ Breaking Changes", &breaking);
    append_section(&mut out, "Features", &features);
    append_section(&mut out, "Bug Fixes", &fixes);

    out.trim_end().to_string()
}

/// Render the full changelog with a `## vX.Y.Z (date)` header line.
pub fn render_with_header(version: &Version, commits: &[ParsedCommit]) -> String {
    let body = render(commits);
    if body.is_empty() {
        return body;
    }

    let date = Utc::now().format("%Y-%m-%d");
    format!("## v{} ({})\n\n{}", version, date, body)
}

/// Strip a leading `# `/`## ` header line and following blank lines.
///
/// The hosting UI already shows the tag name on a release page, so the
/// release body must not repeat it.
pub fn strip_release_header(text: &str) -> &str {
    let trimmed = text.trim_start_matches(['\n', '\r']);
    if !trimmed.starts_with("# ") && !trimmed.starts_with("## ") {
        return trimmed;
    }

    match trimmed.find('\n') {
        Some(pos) => trimmed[pos + 1..].trim_start_matches(['\n', '\r']),
        None => "",
    }
}

fn append_section(out: &mut String, title: &str, commits: &[&ParsedCommit]) {
    if commits.is_empty() {
        return;
    }

    out.push_str(&format!("### {}\n\n", title));
    for commit in commits {
        match &commit.scope {
            Some(scope) => out.push_str(&format!(
                "- **{}:** {} ({})\n",
                scope,
                commit.description,
                commit.short_hash()
            )),
            None => out.push_str(&format!(
                "- {} ({})\n",
                commit.description,
                commit.short_hash()
            )),
        }
    }
    out.push('\n');
}
