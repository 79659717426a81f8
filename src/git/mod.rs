//! Git history reads and tag/push primitives.

pub mod commits;
pub mod exec;
pub mod tags;

pub use commits::{CommitType, ParsedCommit, commits_since, parse_commit_message};
pub use exec::{create_annotated_tag, push_tag};
pub use tags::{TagInfo, all_tags, latest_release_tag, version_from_tag};
