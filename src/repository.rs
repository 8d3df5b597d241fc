//! Repository handle, the entry point to every other git object.
//!
//! A [`Repository`] is bound to a path and never validates it up front: a
//! wrong path surfaces as an error from the first git command that runs.
//!
//! ```no_run
//! use gitwrap::{Branch, Repository};
//!
//! let repo = Repository::open("/path/to/checkout");
//! let main = repo.main_branch()?;
//! for branch in repo.branches()? {
//!     if branch != main && branch.is_merged_to(&main)? {
//!         println!("{} can be deleted", branch);
//!     }
//! }
//! # Ok::<(), gitwrap::GitError>(())
//! ```

use std::fmt;
use std::path::{Path, PathBuf};
use std::sync::OnceLock;

use semver::Version;
use tracing::debug;

use crate::branch::LocalBranch;
use crate::commit::Commit;
use crate::config::Config;
use crate::error::{GitError, Result};
use crate::parse::parse_branch_list;
use crate::remote::Remote;
use crate::runner::{ProcessResult, Runner};

#[derive(Debug)]
pub struct Repository {
    path: PathBuf,
    config: Config,
    runner: Runner,

    // cached, never invalidated
    main_branch_name: OnceLock<String>,
}

impl Repository {
    /// Bind to the working copy at `path` with the default configuration.
    pub fn open(path: impl Into<PathBuf>) -> Self {
        Self::with_config(path, Config::default())
    }

    /// Bind to the working copy at `path` with an explicit configuration.
    pub fn with_config(path: impl Into<PathBuf>, config: Config) -> Self {
        let runner = Runner::new(config.git.binary.clone());
        Self {
            path: path.into(),
            config,
            runner,
            main_branch_name: OnceLock::new(),
        }
    }

    /// Bind to `path` using the global config merged with `<path>/.gitwrap.yaml`.
    pub fn discover(path: impl Into<PathBuf>) -> Result<Self> {
        let path = path.into();
        let config = Config::load_for(&path)?;
        Ok(Self::with_config(path, config))
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    pub fn runner(&self) -> &Runner {
        &self.runner
    }

    /// Run git inside this repository. Non-zero exits are not errors here.
    pub fn execute(&self, args: &[&str]) -> Result<ProcessResult> {
        self.runner.run(&self.path, args)
    }

    /// Run git inside this repository and fail on a non-zero exit.
    pub(crate) fn execute_checked(
        &self,
        args: &[&str],
        operation: impl FnOnce() -> String,
    ) -> Result<ProcessResult> {
        self.execute(args)?.check(operation)
    }

    /// Version of the git binary this repository runs.
    pub fn git_version(&self) -> Result<Version> {
        self.runner.version(&self.path)
    }

    /// Read a git config value. Unset or empty keys yield `None`.
    ///
    /// Any other failure, such as an unreadable config file, is an error.
    pub fn config_value(&self, key: &str) -> Result<Option<String>> {
        let result = self.execute(&["config", key])?;

        // `git config` exits 1 for unset keys
        if result.status_code() == Some(1) {
            return Ok(None);
        }
        let result = result.check(|| format!("could not read git config {}", key))?;

        let value = result.trimmed_output();
        if value.is_empty() {
            return Ok(None);
        }
        Ok(Some(value.to_string()))
    }

    /// Build a commit handle after validating the hash format.
    pub fn commit(&self, hash: &str) -> Result<Commit<'_>> {
        Commit::new(self, hash)
    }

    /// Resolve any revision (branch, tag, `HEAD~2`, ...) to its commit.
    ///
    /// Annotated tags are peeled to the commit they point at.
    pub fn resolve_commit(&self, rev: &str) -> Result<Commit<'_>> {
        let peeled = format!("{}^{{commit}}", rev);
        let result = self.execute_checked(&["rev-parse", "--verify", &peeled], || {
            format!("could not resolve revision {}", rev)
        })?;
        Commit::new(self, result.trimmed_output())
    }

    pub(crate) fn rev_parse_commit(
        &self,
        rev: &str,
        operation: impl FnOnce() -> String,
    ) -> Result<Commit<'_>> {
        let result = self.execute_checked(&["rev-parse", rev], operation)?;
        Commit::new(self, result.trimmed_output())
    }

    /// Nearest common ancestor of two commits.
    pub fn merge_base(&self, a: &str, b: &str) -> Result<String> {
        let result = self.execute_checked(&["merge-base", a, b], || {
            format!("could not find merge-base between {} and {}", a, b)
        })?;
        Ok(result.trimmed_output().to_string())
    }

    /// Whether a remote called `name` is configured.
    ///
    /// Checked with `git remote get-url <name>` rather than
    /// `git remote show <name>`: the former reads local config only, the
    /// latter contacts the remote.
    pub fn has_remote(&self, name: &str) -> Result<bool> {
        Ok(self.execute(&["remote", "get-url", name])?.successful())
    }

    pub fn remote(&self, name: &str) -> Result<Remote<'_>> {
        if !self.has_remote(name)? {
            return Err(GitError::NotFound {
                kind: "remote",
                name: name.to_string(),
            });
        }
        Ok(Remote::new(self, name))
    }

    pub fn remotes(&self) -> Result<Vec<Remote<'_>>> {
        let result =
            self.execute_checked(&["remote", "show"], || "could not list remotes".to_string())?;

        Ok(result
            .trimmed_output()
            .lines()
            .map(str::trim)
            .filter(|line| !line.is_empty())
            .map(|name| Remote::new(self, name))
            .collect())
    }

    pub fn has_branch(&self, name: &str) -> Result<bool> {
        let reference = format!("refs/heads/{}", name);
        Ok(self
            .execute(&["show-ref", "--verify", "--quiet", &reference])?
            .successful())
    }

    pub fn branch(&self, name: &str) -> Result<LocalBranch<'_>> {
        if !self.has_branch(name)? {
            return Err(GitError::NotFound {
                kind: "local branch",
                name: name.to_string(),
            });
        }
        Ok(LocalBranch::new(self, name))
    }

    pub fn branches(&self) -> Result<Vec<LocalBranch<'_>>> {
        let result = self.execute(&["show-ref", "--heads"])?;

        // show-ref exits 1 without output when there is nothing to show
        if result.status_code() == Some(1) && result.trimmed_output().is_empty() {
            return Ok(Vec::new());
        }
        let result = result.check(|| "could not list local branches".to_string())?;

        Ok(parse_branch_list(result.output())?
            .into_iter()
            .map(|name| LocalBranch::new(self, &name))
            .collect())
    }

    /// The checked-out branch.
    ///
    /// Uses `git branch --show-current` when the installed git satisfies the
    /// configured requirement, `git rev-parse --abbrev-ref HEAD` otherwise.
    pub fn current_branch(&self) -> Result<LocalBranch<'_>> {
        let requirement = self.config.current_branch.requirement()?;
        let version = self.git_version()?;

        let args: &[&str] = if requirement.matches(&version) {
            &["branch", "--show-current"]
        } else {
            &["rev-parse", "--abbrev-ref", "HEAD"]
        };

        // both commands print a bare branch name
        let result =
            self.execute_checked(args, || "failed getting current local branch".to_string())?;
        let name = result.trimmed_output();

        // detached: --show-current prints nothing, rev-parse prints HEAD
        if name.is_empty() || name == "HEAD" {
            return Err(GitError::NotFound {
                kind: "current branch",
                name: "HEAD (detached)".to_string(),
            });
        }

        Ok(LocalBranch::new(self, name))
    }

    /// The repository's main branch, memoized for the lifetime of `self`.
    pub fn main_branch(&self) -> Result<LocalBranch<'_>> {
        let name = resolve_main_branch(
            self,
            &self.main_branch_name,
            || "repository".to_string(),
            |candidate| self.has_branch(candidate),
        )?;
        Ok(LocalBranch::new(self, &name))
    }

    /// Configured default branch first, then the fixed fallbacks.
    pub(crate) fn main_branch_candidates(&self) -> Result<Vec<String>> {
        let fallbacks = &self.config.main_branch.candidates;
        let mut candidates = Vec::with_capacity(fallbacks.len() + 1);

        if let Some(configured) = self.config_value(&self.config.main_branch.config_key)? {
            candidates.push(configured);
        }
        candidates.extend(fallbacks.iter().cloned());

        Ok(candidates)
    }
}

/// Return the first candidate for which `exists` holds, caching it in `cache`.
pub(crate) fn resolve_main_branch(
    repository: &Repository,
    cache: &OnceLock<String>,
    scope: impl FnOnce() -> String,
    mut exists: impl FnMut(&str) -> Result<bool>,
) -> Result<String> {
    if let Some(name) = cache.get() {
        return Ok(name.clone());
    }

    let candidates = repository.main_branch_candidates()?;
    for candidate in &candidates {
        if !exists(candidate)? {
            continue;
        }

        let name = cache.get_or_init(|| candidate.clone());
        debug!(main_branch = %name, "resolved main branch");
        return Ok(name.clone());
    }

    Err(GitError::NoMainBranch {
        scope: scope(),
        candidates,
    })
}

impl fmt::Display for Repository {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Repository at {}", self.path.display())
    }
}
