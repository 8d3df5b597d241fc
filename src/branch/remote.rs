//! Branches of a remote (`refs/remotes/<remote>/*`).

use std::fmt;

use super::Branch;
use crate::commit::Commit;
use crate::error::Result;
use crate::remote::Remote;
use crate::repository::Repository;

#[derive(Debug, Clone)]
pub struct RemoteBranch<'a> {
    name: String,
    remote: &'a Remote<'a>,
}

impl<'a> RemoteBranch<'a> {
    pub(crate) fn new(remote: &'a Remote<'a>, name: &str) -> Self {
        Self {
            name: name.to_string(),
            remote,
        }
    }

    pub fn remote(&self) -> &'a Remote<'a> {
        self.remote
    }
}

impl<'a> Branch<'a> for RemoteBranch<'a> {
    fn name(&self) -> &str {
        &self.name
    }

    fn full_name(&self) -> String {
        format!("{}/{}", self.remote.name(), self.name)
    }

    fn repository(&self) -> &'a Repository {
        self.remote.repository()
    }

    fn head_commit(&self) -> Result<Commit<'a>> {
        let reference = format!("refs/remotes/{}/{}", self.remote.name(), self.name);
        self.remote.repository().rev_parse_commit(&reference, || {
            format!("getting HEAD commit failed for remote branch {}", self.full_name())
        })
    }

    fn is_main_branch(&self) -> Result<bool> {
        Ok(self.remote.main_branch()? == *self)
    }

    /// Delete the branch on the remote with `git push <remote> --delete <branch>`.
    ///
    /// This talks to the remote and removes the branch for everyone using it.
    /// Running it twice fails the second time.
    fn delete(&self) -> Result<()> {
        self.remote
            .repository()
            .execute_checked(&["push", self.remote.name(), "--delete", &self.name], || {
                format!(
                    "could not delete remote branch {} on {}",
                    self.name,
                    self.remote.name()
                )
            })?;
        Ok(())
    }
}

impl PartialEq for RemoteBranch<'_> {
    fn eq(&self, other: &Self) -> bool {
        self.full_name() == other.full_name()
    }
}

impl Eq for RemoteBranch<'_> {}

impl fmt::Display for RemoteBranch<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Remote branch {} @ {}", self.name, self.remote.name())
    }
}
