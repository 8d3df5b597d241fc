//! Error types shared by every git operation.
//!
//! Git failures fall into a small number of categories that callers may want
//! to tell apart: unexpected output, a git process that exited non-zero,
//! invalid constructor input, missing refs, and missing configuration.

use std::path::PathBuf;

use thiserror::Error;

/// Result alias used throughout the library.
pub type Result<T> = std::result::Result<T, GitError>;

/// Errors from git operations.
#[derive(Debug, Error)]
pub enum GitError {
    /// Git printed a line that does not have the expected shape.
    #[error("invalid line format in {what}: {line:?}")]
    Parse {
        /// What was being parsed (e.g. "branch list")
        what: &'static str,
        /// The offending line
        line: String,
    },

    /// Git ran but exited with a non-zero status.
    #[error("{operation} (exit status {}): {stderr}", status.map_or_else(|| "unknown".to_string(), |s| s.to_string()))]
    Command {
        /// Description of what was attempted
        operation: String,
        /// Exit code, if the process was not killed by a signal
        status: Option<i32>,
        /// Trimmed stderr of the process
        stderr: String,
    },

    /// The git process could not be started.
    #[error("failed to run {command}")]
    Spawn {
        /// The command line that failed to start
        command: String,
        #[source]
        source: std::io::Error,
    },

    /// A commit hash that is not 5 to 40 lowercase hex characters.
    #[error("invalid hash upon commit creation: {hash:?}")]
    InvalidHash {
        /// The rejected hash
        hash: String,
    },

    /// An author date that git printed in an unexpected format.
    #[error("could not parse author date {value:?}")]
    InvalidDate {
        /// The raw date string
        value: String,
        #[source]
        source: chrono::ParseError,
    },

    /// A requested branch, remote or upstream does not exist.
    #[error("could not find {kind} {name}")]
    NotFound {
        /// Kind of object ("local branch", "remote", ...)
        kind: &'static str,
        /// Name that was looked up
        name: String,
    },

    /// None of the main-branch candidates exist.
    #[error("no main branch found in {scope} (tried: {})", candidates.join(", "))]
    NoMainBranch {
        /// Where the lookup happened ("repository" or "remote origin")
        scope: String,
        /// Candidates in the order they were tried
        candidates: Vec<String>,
    },

    /// The repository was bound to an empty path.
    #[error("repository path not set")]
    MissingWorkingDirectory,

    /// `git version` printed something without a version number.
    #[error("could not parse git version from {output:?}")]
    Version {
        /// Raw output of `git version`
        output: String,
    },

    /// The configured version requirement is not a valid semver requirement.
    #[error("invalid git version requirement {requirement:?}")]
    VersionRequirement {
        /// The rejected requirement string
        requirement: String,
        #[source]
        source: semver::Error,
    },

    /// A configuration file could not be read or is invalid.
    #[error("invalid configuration {}: {message}", path.as_ref().map_or_else(|| "<inline>".to_string(), |p| p.display().to_string()))]
    Config {
        /// File the configuration came from, if any
        path: Option<PathBuf>,
        /// What went wrong
        message: String,
    },
}

impl GitError {
    /// Whether this error means the requested object does not exist.
    pub fn is_not_found(&self) -> bool {
        matches!(
            self,
            GitError::NotFound { .. } | GitError::NoMainBranch { .. }
        )
    }
}
