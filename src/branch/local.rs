//! Local branches (`refs/heads/*`).

use std::fmt;
use std::sync::OnceLock;

use tracing::debug;

use super::{Branch, RemoteBranch};
use crate::commit::Commit;
use crate::error::{GitError, Result};
use crate::remote::Remote;
use crate::repository::Repository;

#[derive(Debug, Clone)]
pub struct LocalBranch<'r> {
    name: String,
    repository: &'r Repository,

    // `<remote>/<branch>` of the upstream, cached once resolved
    tracking_remote_name: OnceLock<String>,
}

impl<'r> LocalBranch<'r> {
    pub(crate) fn new(repository: &'r Repository, name: &str) -> Self {
        Self {
            name: name.to_string(),
            repository,
            tracking_remote_name: OnceLock::new(),
        }
    }

    /// Name of the upstream branch including its remote, e.g. `origin/main`.
    ///
    /// Resolved through `<branch>@{u}` and cached after the first non-empty
    /// answer.
    pub fn tracking_name(&self) -> Result<String> {
        if let Some(name) = self.tracking_remote_name.get() {
            return Ok(name.clone());
        }

        let upstream = format!("{}@{{u}}", self.name);
        let result = self.repository.execute_checked(
            &["rev-parse", "--symbolic-full-name", &upstream],
            || format!("could not find tracking branch for {}", self.name),
        )?;

        let tracking = result
            .trimmed_output()
            .replacen("refs/remotes/", "", 1)
            .trim()
            .to_string();
        if tracking.is_empty() {
            return Err(GitError::NotFound {
                kind: "tracking branch for",
                name: self.name.clone(),
            });
        }

        debug!(branch = %self.name, tracking = %tracking, "resolved tracking branch");
        Ok(self.tracking_remote_name.get_or_init(|| tracking).clone())
    }

    /// The upstream of this branch as a branch of `remote`.
    ///
    /// Fails with [`GitError::NotFound`] when the upstream lives on a
    /// different remote.
    pub fn tracking_branch<'a>(&self, remote: &'a Remote<'a>) -> Result<RemoteBranch<'a>> {
        let tracking = self.tracking_name()?;
        let prefix = format!("{}/", remote.name());

        match tracking.strip_prefix(&prefix) {
            Some(name) if !name.is_empty() => Ok(RemoteBranch::new(remote, name)),
            _ => Err(GitError::NotFound {
                kind: "tracking branch on",
                name: format!("{} for {} (upstream is {})", remote.name(), self.name, tracking),
            }),
        }
    }

    /// Non-merge commits on this branch whose message contains `message`.
    ///
    /// The message is matched literally, not as a pattern.
    pub fn commits_by_message(&self, message: &str) -> Result<Vec<Commit<'r>>> {
        let result = self.repository.execute_checked(
            &[
                "log",
                "--pretty=%h",
                "--no-merges",
                "--fixed-strings",
                &self.name,
                "--grep",
                message,
            ],
            || {
                format!(
                    "could not execute search for commit message \"{}\" on branch {}",
                    message, self.name
                )
            },
        )?;

        result
            .trimmed_output()
            .lines()
            .map(|hash| Commit::new(self.repository, hash.trim()))
            .collect()
    }

    fn delete_internal(&self, force: bool) -> Result<()> {
        let mut args = vec!["branch", "--delete"];
        if force {
            args.push("--force");
        }
        args.push(&self.name);

        self.repository
            .execute_checked(&args, || format!("could not delete local branch {}", self.name))?;
        Ok(())
    }

    /// Delete the branch even if it is not merged (`git branch --delete --force`).
    pub fn force_delete(&self) -> Result<()> {
        self.delete_internal(true)
    }
}

impl<'r> Branch<'r> for LocalBranch<'r> {
    fn name(&self) -> &str {
        &self.name
    }

    fn full_name(&self) -> String {
        self.name.clone()
    }

    fn repository(&self) -> &'r Repository {
        self.repository
    }

    /// Resolved through `refs/heads/<name>`, so a tag of the same name is ignored.
    fn head_commit(&self) -> Result<Commit<'r>> {
        let reference = format!("refs/heads/{}", self.name);
        self.repository.rev_parse_commit(&reference, || {
            format!("getting HEAD commit failed for local branch {}", self.name)
        })
    }

    fn is_main_branch(&self) -> Result<bool> {
        Ok(self.repository.main_branch()? == *self)
    }

    /// Delete with `git branch --delete`, which refuses unmerged branches.
    fn delete(&self) -> Result<()> {
        self.delete_internal(false)
    }
}

impl PartialEq for LocalBranch<'_> {
    fn eq(&self, other: &Self) -> bool {
        self.name == other.name
    }
}

impl Eq for LocalBranch<'_> {}

impl fmt::Display for LocalBranch<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Local branch {}", self.name)
    }
}
