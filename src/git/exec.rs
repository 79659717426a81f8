//! Tag and push operations via the system `git` binary.
//!
//! Shelling out instead of using libgit2 inherits the user's existing git
//! config, SSH agent, and credential store, which CI runners already have
//! set up for the checkout.

use std::path::Path;
use std::process::Command;

use crate::error::GitError;

/// Create an annotated tag on HEAD.
pub fn create_annotated_tag(workdir: &Path, tag_name: &str) -> Result<(), GitError> {
    let message = format!("Release {}", tag_name);
    run_git(workdir, &["tag", "-a", tag_name, "-m", &message], "tag")
}

/// Push a single tag to the given remote.
pub fn push_tag(workdir: &Path, remote: &str, tag_name: &str) -> Result<(), GitError> {
    run_git(workdir, &["push", remote, tag_name], "push")
}

/// Run a git command in `workdir` and return success or a descriptive error.
fn run_git(workdir: &Path, args: &[&str], operation: &str) -> Result<(), GitError> {
    let output = Command::new("git")
        .current_dir(workdir)
        .args(args)
        .output()
        .map_err(|e| GitError::CommandFailed {
            operation: operation.to_string(),
            detail: e.to_string(),
        })?;

    if !output.status.success() {
        let stderr = String::from_utf8_lossy(&output.stderr);
        return Err(GitError::CommandFailed {
            operation: operation.to_string(),
            detail: stderr.trim().to_string(),
        });
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_run_git_version_succeeds() {
        let cwd = std::env::current_dir().expect("cwd");
        assert!(run_git(&cwd, &["--version"], "version check").is_ok());
    }

    #[test]
    fn test_run_git_invalid_command_fails() {
        let cwd = std::env::current_dir().expect("cwd");
        let result = run_git(&cwd, &["not-a-real-command"], "invalid");
        assert!(result.is_err());
    }
}
