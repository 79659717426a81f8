//! relkit - release automation for conventional-commit plugin packages.
//!
//! # Overview
//!
//! relkit inspects git history since the latest release tag, classifies
//! conventional commits into a semver bump, renders a changelog, updates the
//! package manifest, builds and publishes the package, tags and creates a
//! GitHub release, and posts idempotent status comments on referenced PRs.

pub mod changelog;
pub mod config;
pub mod error;
pub mod git;
pub mod github;
pub mod pipeline;
pub mod registry;
pub mod version;

// Re-export commonly used types
pub use config::ReleaseOptions;
pub use error::{GitError, GitHubError, ManifestError, RegistryError, VersionError};
pub use git::{CommitType, ParsedCommit};
pub use github::{CommentResult, GitHubReleaseResult, PrNotifier, ReleaseNotary};
pub use pipeline::{ReleaseResult, SkipReason};
pub use version::{BumpResult, BumpType, VersionInfo};
