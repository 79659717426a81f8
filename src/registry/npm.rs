//! npm subprocess plumbing.

use std::path::Path;
use std::process::Command;

use crate::error::RegistryError;

/// Captured result of one npm invocation. Spawn failures are folded in as
/// unsuccessful runs so callers can treat every outcome uniformly.
#[derive(Debug)]
pub(crate) struct NpmOutput {
    pub success: bool,
    pub stdout: String,
    pub stderr: String,
}

impl NpmOutput {
    /// stdout and stderr combined for reporting.
    pub fn combined(&self) -> String {
        let mut out = self.stdout.trim().to_string();
        let err = self.stderr.trim();
        if !err.is_empty() {
            if !out.is_empty() {
                out.push('\n');
            }
            out.push_str(err);
        }
        out
    }
}

/// Run an npm command in `dir`, capturing output.
pub(crate) fn run_npm(dir: &Path, args: &[&str]) -> NpmOutput {
    match Command::new("npm").current_dir(dir).args(args).output() {
        Ok(output) => NpmOutput {
            success: output.status.success(),
            stdout: String::from_utf8_lossy(&output.stdout).into_owned(),
            stderr: String::from_utf8_lossy(&output.stderr).into_owned(),
        },
        Err(e) => NpmOutput {
            success: false,
            stdout: String::new(),
            stderr: format!("failed to run npm {}: {}", args.join(" "), e),
        },
    }
}

/// Verify npm is installed before the pipeline mutates anything.
pub fn check_npm_installed() -> Result<(), RegistryError> {
    which::which("npm")
        .map(|_| ())
        .map_err(|_| RegistryError::NpmNotInstalled)
}
