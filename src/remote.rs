//! Remotes and their branches.

use std::fmt;
use std::sync::OnceLock;

use crate::branch::RemoteBranch;
use crate::error::{GitError, Result};
use crate::parse::parse_branch_list;
use crate::repository::{resolve_main_branch, Repository};

#[derive(Debug, Clone)]
pub struct Remote<'r> {
    name: String,
    repository: &'r Repository,

    // cached, never invalidated
    main_branch_name: OnceLock<String>,
}

impl<'r> Remote<'r> {
    pub(crate) fn new(repository: &'r Repository, name: &str) -> Self {
        Self {
            name: name.to_string(),
            repository,
            main_branch_name: OnceLock::new(),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn repository(&self) -> &'r Repository {
        self.repository
    }

    /// Whether a remote-tracking ref `refs/remotes/<remote>/<name>` exists locally.
    pub fn has_branch(&self, name: &str) -> Result<bool> {
        let reference = format!("refs/remotes/{}/{}", self.name, name);
        Ok(self
            .repository
            .execute(&["show-ref", "--verify", "--quiet", &reference])?
            .successful())
    }

    pub fn branch(&self, name: &str) -> Result<RemoteBranch<'_>> {
        if !self.has_branch(name)? {
            return Err(GitError::NotFound {
                kind: "remote branch",
                name: format!("{}/{}", self.name, name),
            });
        }
        Ok(RemoteBranch::new(self, name))
    }

    /// Branches as reported by the remote itself (`git ls-remote --heads`).
    ///
    /// This contacts the remote.
    pub fn branches(&self) -> Result<Vec<RemoteBranch<'_>>> {
        let result = self
            .repository
            .execute_checked(&["ls-remote", "--heads", &self.name], || {
                format!("could not list remote branches on {}", self.name)
            })?;

        Ok(parse_branch_list(result.output())?
            .into_iter()
            .map(|name| RemoteBranch::new(self, &name))
            .collect())
    }

    /// The remote's main branch, memoized for the lifetime of `self`.
    pub fn main_branch(&self) -> Result<RemoteBranch<'_>> {
        let name = resolve_main_branch(
            self.repository,
            &self.main_branch_name,
            || format!("remote {}", self.name),
            |candidate| self.has_branch(candidate),
        )?;
        Ok(RemoteBranch::new(self, &name))
    }
}

impl PartialEq for Remote<'_> {
    fn eq(&self, other: &Self) -> bool {
        self.name == other.name
    }
}

impl Eq for Remote<'_> {}

impl fmt::Display for Remote<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Remote {}", self.name)
    }
}
