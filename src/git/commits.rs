//! Commit fetching and conventional commit parsing.

use git2::{Commit, Oid, Repository};
use serde::{Deserialize, Serialize};

use crate::error::GitError;

/// Conventional commit types.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CommitType {
    Feat,
    Fix,
    Docs,
    Style,
    Refactor,
    Perf,
    Test,
    Build,
    Ci,
    Chore,
}

impl std::str::FromStr for CommitType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "feat" => Ok(Self::Feat),
            "fix" => Ok(Self::Fix),
            "docs" => Ok(Self::Docs),
            "style" => Ok(Self::Style),
            "refactor" => Ok(Self::Refactor),
            "perf" => Ok(Self::Perf),
            "test" => Ok(Self::Test),
            "build" => Ok(Self::Build),
            "ci" => Ok(Self::Ci),
            "chore" => Ok(Self::Chore),
            _ => Err(format!("Unknown commit type: {}", s)),
        }
    }
}

impl std::fmt::Display for CommitType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            Self::Feat => "feat",
            Self::Fix => "fix",
            Self::Docs => "docs",
            Self::Style => "style",
            Self::Refactor => "refactor",
            Self::Perf => "perf",
            Self::Test => "test",
            Self::Build => "build",
            Self::Ci => "ci",
            Self::Chore => "chore",
        };
        f.write_str(s)
    }
}

/// A commit with its conventional-commit interpretation.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ParsedCommit {
    pub hash: String,
    /// First line of the commit message.
    pub summary: String,
    pub commit_type: Option<CommitType>,
    pub scope: Option<String>,
    /// Text after `type(scope): `, or the full summary when the commit is
    /// not conventional.
    pub description: String,
    pub breaking: bool,
}

impl ParsedCommit {
    /// Create a ParsedCommit from a git2 Commit.
    pub fn from_git2_commit(commit: &Commit) -> Self {
        let hash = commit.id().to_string();
        let message = commit.message().unwrap_or("");
        Self::from_message(hash, message)
    }

    /// Parse a full commit message (subject plus optional body).
    pub fn from_message(hash: String, message: &str) -> Self {
        let summary = message.lines().next().unwrap_or("").to_string();
        let (commit_type, scope, description, breaking) = parse_commit_message(message);

        Self {
            hash,
            summary,
            commit_type,
            scope,
            description,
            breaking,
        }
    }

    /// Abbreviated hash for changelog lines.
    pub fn short_hash(&self) -> &str {
        let end = self.hash.len().min(7);
        &self.hash[..end]
    }
}

/// Parse a conventional commit message.
/// Returns (commit_type, scope, description, breaking).
pub fn parse_commit_message(message: &str) -> (Option<CommitType>, Option<String>, String, bool) {
    let first_line = message.lines().next().unwrap_or("");

    // BREAKING CHANGE footers may appear anywhere in the body
    let breaking_in_footer =
        message.contains("BREAKING CHANGE:") || message.contains("BREAKING-CHANGE:");

    // Pattern: type(scope)!: description, with scope and ! both optional
    let re = regex_lite::Regex::new(r"^(\w+)(?:\(([^)]+)\))?(!)?\s*:\s*(.*)$")
        .expect("commit pattern is valid");

    if let Some(caps) = re.captures(first_line) {
        let type_str = caps.get(1).map(|m| m.as_str()).unwrap_or("");
        let scope = caps.get(2).map(|m| m.as_str().to_string());
        let breaking_mark = caps.get(3).is_some();
        let description = caps
            .get(4)
            .map(|m| m.as_str().trim().to_string())
            .unwrap_or_default();

        if let Ok(commit_type) = type_str.parse::<CommitType>() {
            let breaking = breaking_mark || breaking_in_footer;
            return (Some(commit_type), scope, description, breaking);
        }
    }

    (None, None, first_line.to_string(), breaking_in_footer)
}

/// Fetch all commits reachable from HEAD but not from `since`.
///
/// When `since` is `None` (no release tag exists yet), the full history is
/// returned. An unborn HEAD yields an empty list rather than an error.
pub fn commits_since(repo: &Repository, since: Option<Oid>) -> Result<Vec<ParsedCommit>, GitError> {
    let head_oid = match repo.head().ok().and_then(|head| head.target()) {
        Some(oid) => oid,
        None => return Ok(Vec::new()),
    };

    let mut revwalk = repo.revwalk().map_err(GitError::RevwalkError)?;
    revwalk.push(head_oid).map_err(GitError::RevwalkError)?;
    if let Some(since_oid) = since {
        revwalk.hide(since_oid).map_err(GitError::RevwalkError)?;
    }

    let mut commits = Vec::new();
    for oid_result in revwalk {
        let oid = oid_result.map_err(GitError::RevwalkError)?;
        let commit = repo.find_commit(oid).map_err(GitError::ParseCommit)?;
        commits.push(ParsedCommit::from_git2_commit(&commit));
    }

    Ok(commits)
}
