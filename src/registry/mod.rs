//! Package registry collaborator: build, pack, publish.
//!
//! The orchestrator talks to the registry through [`PackageRegistry`] so
//! pipeline tests can substitute a fake without npm installed.

pub mod build;
pub mod npm;
pub mod publish;

use std::path::Path;

use semver::Version;

pub use build::{BuildOutcome, build_package};
pub use npm::check_npm_installed;
pub use publish::{
    DEV_DIST_TAG, PackOutcome, PublishOutcome, dist_tag_for, pack_package, publish_package,
    tarball_name_for,
};

/// External registry operations. Every method reports failure in its result
/// struct; none return `Err` for registry-command failures.
pub trait PackageRegistry {
    fn build(&self, dir: &Path) -> BuildOutcome;
    fn pack(&self, dir: &Path, version: &Version, dry_run: bool) -> PackOutcome;
    fn publish(&self, dir: &Path, dry_run: bool, prerelease_tag: Option<&str>) -> PublishOutcome;
}

/// The real registry, shelling out to npm.
pub struct NpmRegistry;

impl PackageRegistry for NpmRegistry {
    fn build(&self, dir: &Path) -> BuildOutcome {
        build_package(dir)
    }

    fn pack(&self, dir: &Path, version: &Version, dry_run: bool) -> PackOutcome {
        pack_package(dir, version, dry_run)
    }

    fn publish(&self, dir: &Path, dry_run: bool, prerelease_tag: Option<&str>) -> PublishOutcome {
        publish_package(dir, dry_run, prerelease_tag)
    }
}
