//! Tarball packing and registry publishing.

use std::path::{Path, PathBuf};

use semver::Version;
use tracing::debug;

use crate::version::read_manifest;

use super::npm::run_npm;

/// Dist-tag used when dry-running without an explicit prerelease tag, so a
/// placeholder version can never become the default-installed one.
pub const DEV_DIST_TAG: &str = "development";

/// Outcome of `npm pack`.
#[derive(Debug)]
pub struct PackOutcome {
    pub success: bool,
    /// `None` in dry-run mode: a name is derived but no file is produced.
    pub tarball_path: Option<PathBuf>,
    pub tarball_name: Option<String>,
    pub error: Option<String>,
}

/// Outcome of `npm publish`.
#[derive(Debug)]
pub struct PublishOutcome {
    pub success: bool,
    pub output: String,
}

/// The tarball filename npm derives from a package name and version:
/// `@scope/name` becomes `scope-name-<version>.tgz`.
pub fn tarball_name_for(package_name: &str, version: &str) -> String {
    let flattened = package_name.trim_start_matches('@').replace('/', "-");
    format!("{}-{}.tgz", flattened, version)
}

/// Produce the distributable tarball for the package in `dir`.
///
/// The tarball name is derived from the planned `version`, not the manifest's
/// version field: in dry-run mode the manifest was deliberately left
/// untouched, and the preview must still name the tarball a real run would
/// produce.
pub fn pack_package(dir: &Path, version: &Version, dry_run: bool) -> PackOutcome {
    let manifest = match read_manifest(&dir.join("package.json")) {
        Ok(info) => info,
        Err(e) => {
            return PackOutcome {
                success: false,
                tarball_path: None,
                tarball_name: None,
                error: Some(e.to_string()),
            };
        }
    };

    let name = tarball_name_for(&manifest.name, &version.to_string());

    if dry_run {
        debug!(tarball = %name, "Dry run: skipping npm pack");
        return PackOutcome {
            success: true,
            tarball_path: None,
            tarball_name: Some(name),
            error: None,
        };
    }

    let output = run_npm(dir, &["pack"]);
    if !output.success {
        return PackOutcome {
            success: false,
            tarball_path: None,
            tarball_name: Some(name),
            error: Some(output.combined()),
        };
    }

    PackOutcome {
        success: true,
        tarball_path: Some(dir.join(&name)),
        tarball_name: Some(name),
        error: None,
    }
}

/// Select the npm dist-tag for a publish.
///
/// A prerelease always publishes under its identifier; a dry run without one
/// publishes under `development`. Only a real stable publish gets the default
/// tag, so a placeholder version can never become the default install.
pub fn dist_tag_for(dry_run: bool, prerelease_tag: Option<&str>) -> Option<&str> {
    match prerelease_tag {
        Some(tag) => Some(tag),
        None if dry_run => Some(DEV_DIST_TAG),
        None => None,
    }
}

/// Publish the package in `dir` to the registry.
pub fn publish_package(dir: &Path, dry_run: bool, prerelease_tag: Option<&str>) -> PublishOutcome {
    let mut args = vec!["publish"];

    if let Some(tag) = dist_tag_for(dry_run, prerelease_tag) {
        args.push("--tag");
        args.push(tag);
    }
    if dry_run {
        args.push("--dry-run");
    }

    debug!(args = ?args, "Publishing package");
    let output = run_npm(dir, &args);

    PublishOutcome {
        success: output.success,
        output: output.combined(),
    }
}
