//! Conventional-commit classification into semver bump recommendations.

use serde::{Deserialize, Serialize};

use crate::git::{CommitType, ParsedCommit, parse_commit_message};

/// The semver component to increment, or `None` when no releasable commit
/// was found. `None` is a sentinel, not an error.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BumpType {
    None,
    Patch,
    Minor,
    Major,
}

impl std::fmt::Display for BumpType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            Self::None => "none",
            Self::Patch => "patch",
            Self::Minor => "minor",
            Self::Major => "major",
        };
        f.write_str(s)
    }
}

/// Classifier output: the recommended bump plus a human-readable reason.
#[derive(Debug, Clone)]
pub struct BumpResult {
    pub release_type: BumpType,
    pub reason: String,
}

/// Classify a set of commits into a single bump recommendation.
///
/// The result is the maximum severity found across the set: one breaking
/// commit among many patches yields `major`, and multiple `fix` commits
/// collapse to a single `patch`. Only `feat` and `fix` are release-worthy;
/// everything else contributes nothing.
pub fn classify(commits: &[ParsedCommit]) -> BumpResult {
    let mut highest = BumpType::None;
    let mut reason = "no releasable conventional commits found".to_string();

    for commit in commits {
        let (bump, why) = classify_commit(commit);
        if bump > highest {
            highest = bump;
            reason = why;
        }
        if highest == BumpType::Major {
            break;
        }
    }

    BumpResult {
        release_type: highest,
        reason,
    }
}

/// Classify a single text line (e.g. a PR title) without a commit body.
///
/// Never fails on malformed input; a non-conventional string or a type
/// outside `{feat, fix}` yields `BumpType::None` with an explanation.
pub fn classify_text(text: &str) -> BumpResult {
    let (commit_type, scope, description, breaking) = parse_commit_message(text);
    let commit = ParsedCommit {
        hash: String::new(),
        summary: text.lines().next().unwrap_or("").to_string(),
        commit_type,
        scope,
        description,
        breaking,
    };

    let (release_type, reason) = classify_commit(&commit);
    BumpResult {
        release_type,
        reason,
    }
}

fn classify_commit(commit: &ParsedCommit) -> (BumpType, String) {
    if commit.breaking {
        return (
            BumpType::Major,
            format!("breaking change: {}", commit.summary),
        );
    }

    match commit.commit_type {
        Some(CommitType::Feat) => (BumpType::Minor, format!("feature: {}", commit.summary)),
        Some(CommitType::Fix) => (BumpType::Patch, format!("fix: {}", commit.summary)),
        Some(other) => (
            BumpType::None,
            format!("commit type '{}' does not trigger a release", other),
        ),
        None => (
            BumpType::None,
            "not a conventional commit".to_string(),
        ),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn commit(message: &str) -> ParsedCommit {
        ParsedCommit::from_message("abc123def".to_string(), message)
    }

    #[test]
    fn test_fix_yields_patch() {
        let result = classify(&[commit("fix: resolve null pointer exception")]);
        assert_eq!(result.release_type, BumpType::Patch);
    }

    #[test]
    fn test_multiple_fixes_collapse_to_single_patch() {
        let result = classify(&[
            commit("fix: one"),
            commit("fix: two"),
            commit("fix: three"),
        ]);
        assert_eq!(result.release_type, BumpType::Patch);
    }

    #[test]
    fn test_feat_wins_over_fix() {
        let result = classify(&[commit("fix: one"), commit("feat: two"), commit("fix: three")]);
        assert_eq!(result.release_type, BumpType::Minor);
        assert!(result.reason.contains("feat: two"));
    }

    #[test]
    fn test_breaking_marker_wins_over_everything() {
        let result = classify(&[
            commit("fix: one"),
            commit("feat!: redesign entire API"),
            commit("feat: two"),
        ]);
        assert_eq!(result.release_type, BumpType::Major);
    }

    #[test]
    fn test_breaking_footer_wins() {
        let result = classify(&[commit(
            "fix: small thing\n\nBREAKING CHANGE: behavior differs",
        )]);
        assert_eq!(result.release_type, BumpType::Major);
    }

    #[test]
    fn test_hyphenated_breaking_footer_wins() {
        let result = classify(&[commit(
            "fix: small thing\n\nBREAKING-CHANGE: behavior differs",
        )]);
        assert_eq!(result.release_type, BumpType::Major);
    }

    #[test]
    fn test_non_releasable_types_yield_none() {
        let result = classify(&[
            commit("chore: bump deps"),
            commit("docs: update README"),
            commit("refactor: tidy"),
            commit("style: fmt"),
            commit("test: add coverage"),
        ]);
        assert_eq!(result.release_type, BumpType::None);
    }

    #[test]
    fn test_empty_set_yields_none() {
        let result = classify(&[]);
        assert_eq!(result.release_type, BumpType::None);
    }

    #[test]
    fn test_classify_text_feat() {
        let result = classify_text("feat(ui): add dark mode");
        assert_eq!(result.release_type, BumpType::Minor);
    }

    #[test]
    fn test_classify_text_non_conventional_never_errors() {
        let result = classify_text("Update the readme again");
        assert_eq!(result.release_type, BumpType::None);
        assert!(result.reason.contains("not a conventional commit"));
    }

    #[test]
    fn test_classify_text_chore_is_none_with_reason() {
        let result = classify_text("chore: bump dependencies");
        assert_eq!(result.release_type, BumpType::None);
        assert!(result.reason.contains("chore"));
    }

    #[test]
    fn test_bump_type_ordering() {
        assert!(BumpType::Major > BumpType::Minor);
        assert!(BumpType::Minor > BumpType::Patch);
        assert!(BumpType::Patch > BumpType::None);
    }
}
