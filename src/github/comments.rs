//! PR status comments with edit-or-create semantics.

use std::collections::BTreeSet;

use octocrab::Octocrab;
use tracing::debug;

/// Hidden marker appended to every comment this tool posts, used to locate
/// the prior status comment instead of duplicating it.
pub const BOT_MARKER: &str = "<!-- relkit-release-status -->";

/// Outcome of posting or updating one PR comment. Never fatal to a run.
#[derive(Debug)]
pub struct CommentResult {
    pub success: bool,
    /// True when a new comment was created, false when an existing one was
    /// updated.
    pub created: bool,
    pub comment_id: Option<u64>,
    pub error: Option<String>,
}

impl CommentResult {
    fn failure(error: impl Into<String>) -> Self {
        Self {
            success: false,
            created: false,
            comment_id: None,
            error: Some(error.into()),
        }
    }
}

/// Posts and edits release status comments on pull requests.
pub struct PrNotifier {
    client: Option<Octocrab>,
    target: Option<(String, String)>,
}

impl PrNotifier {
    pub fn new(client: Option<Octocrab>, target: Option<(String, String)>) -> Self {
        Self { client, target }
    }

    /// Post `body` as the status comment on `pr_number`.
    ///
    /// Lists existing comments, finds the most recent one carrying the bot
    /// marker, and updates it in place; otherwise creates a new comment.
    /// Repeated invocations therefore leave at most one visible status
    /// comment per PR.
    pub async fn notify(&self, pr_number: u64, body: &str) -> CommentResult {
        let Some((owner, repo)) = self.target.clone() else {
            return CommentResult::failure(
                "could not resolve GitHub owner/repo from the origin remote",
            );
        };
        let Some(client) = self.client.as_ref() else {
            return CommentResult::failure("GitHub token not found: set GITHUB_TOKEN or GH_TOKEN");
        };

        let marked_body = format!("{}\n\n{}", body, BOT_MARKER);
        let issues = client.issues(&owner, &repo);

        let existing = match issues.list_comments(pr_number).per_page(100).send().await {
            Ok(page) => page.items,
            Err(e) => {
                return CommentResult::failure(format!(
                    "failed to list comments on #{}: {}",
                    pr_number, e
                ));
            }
        };

        // Comments arrive oldest-first; the last marked one is the current
        // status comment.
        let previous = existing
            .iter()
            .rev()
            .find(|c| c.body.as_deref().is_some_and(|b| b.contains(BOT_MARKER)));

        if let Some(previous) = previous {
            debug!(comment_id = %previous.id, pr = pr_number, "Updating existing status comment");
            return match issues.update_comment(previous.id, &marked_body).await {
                Ok(updated) => CommentResult {
                    success: true,
                    created: false,
                    comment_id: Some(updated.id.into_inner()),
                    error: None,
                },
                Err(e) => CommentResult::failure(format!(
                    "failed to update comment on #{}: {}",
                    pr_number, e
                )),
            };
        }

        debug!(pr = pr_number, "Creating new status comment");
        match issues.create_comment(pr_number, &marked_body).await {
            Ok(created) => CommentResult {
                success: true,
                created: true,
                comment_id: Some(created.id.into_inner()),
                error: None,
            },
            Err(e) => CommentResult::failure(format!(
                "failed to create comment on #{}: {}",
                pr_number, e
            )),
        }
    }
}

/// Parse unique `#<digits>` PR references out of commit subjects, sorted
/// ascending.
pub fn extract_referenced_prs<'a>(subjects: impl IntoIterator<Item = &'a str>) -> Vec<u64> {
    let re = regex_lite::Regex::new(r"#(\d+)").expect("PR reference pattern is valid");
    let mut numbers = BTreeSet::new();

    for subject in subjects {
        for caps in re.captures_iter(subject) {
            if let Some(m) = caps.get(1) {
                if let Ok(n) = m.as_str().parse::<u64>() {
                    numbers.insert(n);
                }
            }
        }
    }

    numbers.into_iter().collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_extract_single_reference() {
        let prs = extract_referenced_prs(["feat: add feature one (#123)"]);
        assert_eq!(prs, vec![123]);
    }

    #[test]
    fn test_extract_multiple_subjects() {
        let prs = extract_referenced_prs([
            "feat: add feature one (#123)",
            "fix: fix bug two (#124)",
            "feat: add feature three (#125)",
        ]);
        assert_eq!(prs, vec![123, 124, 125]);
    }

    #[test]
    fn test_extract_deduplicates() {
        let prs = extract_referenced_prs(["fix: follow-up (#42)", "fix: more follow-up (#42)"]);
        assert_eq!(prs, vec![42]);
    }

    #[test]
    fn test_extract_ignores_subjects_without_references() {
        let prs = extract_referenced_prs(["chore: bump deps", "docs: update README"]);
        assert!(prs.is_empty());
    }

    #[test]
    fn test_extract_multiple_references_in_one_subject() {
        let prs = extract_referenced_prs(["fix: merge fixes (#7) (#9)"]);
        assert_eq!(prs, vec![7, 9]);
    }
}
