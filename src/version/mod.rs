//! Commit classification, version planning, and manifest persistence.

pub mod bump;
pub mod manifest;
pub mod plan;

pub use bump::{BumpResult, BumpType, classify, classify_text};
pub use manifest::{ManifestInfo, persist_version, read_manifest};
pub use plan::{VersionInfo, next_version, plan};
