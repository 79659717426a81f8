//! Error types for relkit modules using thiserror.

use thiserror::Error;

/// Errors from git operations.
#[derive(Error, Debug)]
pub enum GitError {
    #[error("Failed to parse commit: {0}")]
    ParseCommit(#[source] git2::Error),

    #[error("Failed to walk commit history: {0}")]
    RevwalkError(#[source] git2::Error),

    #[error("git {operation} failed: {detail}")]
    CommandFailed { operation: String, detail: String },
}

/// Errors from GitHub API operations.
#[derive(Error, Debug)]
pub enum GitHubError {
    #[error("Failed to build GitHub client: {0}")]
    ClientBuild(#[source] Box<octocrab::Error>),

    #[error("Repository has no 'origin' remote to resolve owner/repo from")]
    NoOriginRemote,

    #[error("Failed to parse repository URL")]
    InvalidRepositoryUrl,
}

/// Errors from the package manifest (package.json).
#[derive(Error, Debug)]
pub enum ManifestError {
    #[error("Failed to read manifest {path}: {source}")]
    ReadFailed {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to parse manifest {path}: {source}")]
    ParseFailed {
        path: String,
        #[source]
        source: serde_json::Error,
    },

    #[error("Manifest {0} is not a JSON object")]
    NotAnObject(String),

    #[error("Manifest {0} has no usable '{1}' field")]
    MissingField(String, &'static str),

    #[error("Failed to write manifest {path}: {source}")]
    WriteFailed {
        path: String,
        #[source]
        source: std::io::Error,
    },
}

/// Errors from version planning.
#[derive(Error, Debug)]
pub enum VersionError {
    #[error("Invalid prerelease identifier '{0}': {1}")]
    InvalidPrerelease(String, #[source] semver::Error),

    #[error("No releasable change to compute a version increment from")]
    NoReleasableChange,

    #[error(transparent)]
    Git(#[from] GitError),
}

/// Errors from registry tooling preconditions.
#[derive(Error, Debug)]
pub enum RegistryError {
    #[error("npm not found in PATH. Install Node.js/npm before releasing.")]
    NpmNotInstalled,
}
