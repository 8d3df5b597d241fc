//! # gitwrap - git repositories as Rust objects
//!
//! gitwrap wraps the `git` command-line tool. Repositories, remotes, branches
//! and commits are plain structs whose methods run one git command each and
//! parse its text output.
//!
//! ## Core Concepts
//!
//! - **Repository**: bound to a working-copy path; entry point to everything else
//! - **Branches**: [`LocalBranch`] and [`RemoteBranch`], both implementing [`Branch`]
//! - **Remotes**: enumerate and look up remote branches
//! - **Commits**: validated hashes with accessors for message, author and patch id
//!
//! Handles borrow the repository they came from, and every git process is
//! started with that repository's path as its working directory.
//!
//! ## Modules
//!
//! - [`repository`] - Repository handle, current and main branch resolution
//! - [`branch`] - The [`Branch`] trait with local and remote implementations
//! - [`remote`] - Remotes
//! - [`commit`] - Commits and their metadata
//! - [`runner`] - Spawning git processes
//! - [`parse`] - Parsers for git's line-oriented output
//! - [`config`] - YAML configuration
//! - [`error`] - Error taxonomy
//!
//! ## Example
//!
//! ```no_run
//! use gitwrap::{Branch, Repository};
//!
//! let repo = Repository::open(".");
//! let current = repo.current_branch()?;
//! println!("{} at {}", current, current.head_commit()?.hash());
//!
//! if let Ok(origin) = repo.remote("origin") {
//!     for branch in origin.branches()? {
//!         println!("{}", branch.full_name());
//!     }
//! }
//! # Ok::<(), gitwrap::GitError>(())
//! ```

pub mod branch;
pub mod commit;
pub mod config;
pub mod error;
pub mod parse;
pub mod remote;
pub mod repository;
pub mod runner;

pub use branch::{Branch, LocalBranch, RemoteBranch};
pub use commit::{is_valid_commit_hash, Commit, CommitInfo};
pub use config::Config;
pub use error::{GitError, Result};
pub use remote::Remote;
pub use repository::Repository;
