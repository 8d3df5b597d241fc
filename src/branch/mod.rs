//! Branches, local and remote, behind one trait.
//!
//! [`LocalBranch`] and [`RemoteBranch`] answer the same questions (head
//! commit, main-branch check, merge status) and can be deleted. Code that only
//! needs those capabilities takes `&dyn Branch<'_>`.

use std::fmt;

use crate::commit::Commit;
use crate::error::Result;
use crate::repository::Repository;

pub mod local;
pub mod remote;

pub use local::LocalBranch;
pub use remote::RemoteBranch;

/// Capabilities shared by local and remote branches.
///
/// `'r` is the lifetime of the repository the branch belongs to; commits
/// returned by a branch may outlive the branch handle itself.
pub trait Branch<'r>: fmt::Display {
    /// Short name, without any remote prefix.
    fn name(&self) -> &str;

    /// Name including the remote, if there is one (`origin/feature`).
    fn full_name(&self) -> String;

    fn repository(&self) -> &'r Repository;

    /// Commit the branch currently points at.
    fn head_commit(&self) -> Result<Commit<'r>>;

    /// Whether this is the main branch of its repository or remote.
    fn is_main_branch(&self) -> Result<bool>;

    /// Delete the branch.
    fn delete(&self) -> Result<()>;

    /// Whether every commit of this branch is reachable from `target`.
    ///
    /// Branches pointing at the same commit are merged by definition and no
    /// merge-base is computed for them.
    fn is_merged_to(&self, target: &dyn Branch<'_>) -> Result<bool> {
        let head = self.head_commit()?;
        let target_head = target.head_commit()?;

        if head == target_head {
            return Ok(true);
        }

        let merge_base = self
            .repository()
            .merge_base(head.hash(), target_head.hash())?;
        Ok(merge_base == head.hash())
    }
}
