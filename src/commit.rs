//! Commits and their metadata.
//!
//! A [`Commit`] is only a validated hash plus the repository it belongs to.
//! Every accessor runs `git show` again, so results always reflect the
//! current state of the repository.

use std::fmt;
use std::hash::{Hash, Hasher};

use chrono::{DateTime, FixedOffset};
use once_cell::sync::Lazy;
use regex::Regex;
use serde::Serialize;
use tracing::warn;

use crate::branch::{LocalBranch, RemoteBranch};
use crate::error::{GitError, Result};
use crate::parse::parse_starred_branch_list;
use crate::remote::Remote;
use crate::repository::Repository;

static COMMIT_HASH: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[0-9a-f]{5,40}$").expect("valid regex"));

static PATCH_ID: Lazy<Regex> = Lazy::new(|| Regex::new(r"^[^ ]+").expect("valid regex"));

/// Whether `hash` looks like an (abbreviated) SHA-1 commit hash.
pub fn is_valid_commit_hash(hash: &str) -> bool {
    COMMIT_HASH.is_match(hash)
}

/// Every formatted field of a commit, read in one go.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CommitInfo {
    pub hash: String,
    pub short_hash: String,
    pub message: String,
    pub body: String,
    pub author_name: String,
    pub author_email: String,
    /// RFC 3339
    pub author_date: String,
    pub author_date_relative: String,
}

#[derive(Debug, Clone)]
pub struct Commit<'r> {
    hash: String,
    repository: &'r Repository,
}

impl<'r> Commit<'r> {
    pub(crate) fn new(repository: &'r Repository, hash: &str) -> Result<Self> {
        if !is_valid_commit_hash(hash) {
            return Err(GitError::InvalidHash {
                hash: hash.to_string(),
            });
        }

        Ok(Self {
            hash: hash.to_string(),
            repository,
        })
    }

    /// The hash this handle was created with, possibly abbreviated.
    pub fn hash(&self) -> &str {
        &self.hash
    }

    pub fn full_hash(&self) -> Result<String> {
        self.value("%H")
    }

    pub fn short_hash(&self) -> Result<String> {
        self.value("%h")
    }

    /// Subject line.
    pub fn message(&self) -> Result<String> {
        self.value("%s")
    }

    pub fn body(&self) -> Result<String> {
        self.value("%b")
    }

    /// Author name, respecting `.mailmap`.
    pub fn author_name(&self) -> Result<String> {
        self.value("%aN")
    }

    /// Author email, respecting `.mailmap`.
    pub fn author_email(&self) -> Result<String> {
        self.value("%aE")
    }

    pub fn author_date(&self) -> Result<DateTime<FixedOffset>> {
        let value = self.value("%aD")?;
        DateTime::parse_from_rfc2822(&value).map_err(|source| GitError::InvalidDate { value, source })
    }

    /// Author date as git words it, e.g. "3 days ago".
    pub fn author_date_relative(&self) -> Result<String> {
        self.value("%ar")
    }

    /// Content-derived identifier of this commit's diff (`git patch-id`).
    ///
    /// Commits without a diff, such as merges, have no patch id.
    pub fn patch_id(&self) -> Result<String> {
        let result = self
            .repository
            .runner()
            .pipe(self.repository.path(), &["show", &self.hash], &["patch-id"])?
            .check(|| format!("could not get patch-id for commit {}", self.hash))?;

        PATCH_ID
            .find(result.output())
            .map(|m| m.as_str().to_string())
            .ok_or_else(|| GitError::Parse {
                what: "patch-id output",
                line: result.trimmed_output().to_string(),
            })
    }

    /// Whether both commits introduce the same change, e.g. before and after a rebase.
    ///
    /// Returns `false` when either patch id cannot be computed.
    pub fn equals_by_patch_id(&self, other: &Commit<'_>) -> bool {
        let ours = match self.patch_id() {
            Ok(id) => id,
            Err(e) => {
                warn!(commit = %self.hash, error = %e, "patch-id unavailable");
                return false;
            }
        };
        match other.patch_id() {
            Ok(theirs) => ours == theirs,
            Err(e) => {
                warn!(commit = %other.hash, error = %e, "patch-id unavailable");
                false
            }
        }
    }

    /// Local branches whose history contains this commit.
    pub fn local_branches_containing(&self) -> Result<Vec<LocalBranch<'r>>> {
        let hash = self.full_hash()?;
        let result = self
            .repository
            .execute_checked(&["branch", "--contains", &hash], || {
                format!("could not list local branches containing commit {}", hash)
            })?;

        Ok(parse_starred_branch_list(result.output())?
            .into_iter()
            // "(HEAD detached at ...)" is not a branch
            .filter(|name| !name.starts_with('('))
            .map(|name| LocalBranch::new(self.repository, &name))
            .collect())
    }

    /// Branches of `remote` whose history contains this commit.
    ///
    /// Only remote-tracking refs already fetched are considered.
    pub fn remote_branches_containing<'a>(
        &self,
        remote: &'a Remote<'a>,
    ) -> Result<Vec<RemoteBranch<'a>>> {
        let hash = self.full_hash()?;
        let result = self
            .repository
            .execute_checked(&["branch", "--all", "--contains", &hash], || {
                format!("could not list remote branches containing commit {}", hash)
            })?;

        let marker = format!("remotes/{}/", remote.name());
        Ok(parse_starred_branch_list(result.output())?
            .iter()
            .filter_map(|name| name.strip_prefix(&marker))
            .filter(|name| *name != "HEAD")
            .map(|name| RemoteBranch::new(remote, name))
            .collect())
    }

    /// Read all formatted fields.
    pub fn info(&self) -> Result<CommitInfo> {
        Ok(CommitInfo {
            hash: self.full_hash()?,
            short_hash: self.short_hash()?,
            message: self.message()?,
            body: self.body()?,
            author_name: self.author_name()?,
            author_email: self.author_email()?,
            author_date: self.author_date()?.to_rfc3339(),
            author_date_relative: self.author_date_relative()?,
        })
    }

    fn value(&self, format: &str) -> Result<String> {
        let pretty = format!("--pretty=format:{}", format);
        let result = self
            .repository
            .execute_checked(&["show", &self.hash, &pretty, "--no-patch"], || {
                format!("could not get log data for commit {}", self.hash)
            })?;
        Ok(result.trimmed_output().to_string())
    }
}

/// Commits are equal when their hashes are, regardless of content.
impl PartialEq<Commit<'_>> for Commit<'_> {
    fn eq(&self, other: &Commit<'_>) -> bool {
        self.hash == other.hash
    }
}

impl Eq for Commit<'_> {}

impl Hash for Commit<'_> {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.hash.hash(state);
    }
}

impl fmt::Display for Commit<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Commit {}", self.hash)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_valid_hashes() {
        assert!(is_valid_commit_hash("abcde"));
        assert!(is_valid_commit_hash("0123456789abcdef0123456789abcdef01234567"));
        assert!(is_valid_commit_hash("3f78685"));
    }

    #[test]
    fn test_invalid_hashes() {
        assert!(!is_valid_commit_hash(""));
        assert!(!is_valid_commit_hash("abcd"));
        assert!(!is_valid_commit_hash(
            "0123456789abcdef0123456789abcdef012345678"
        ));
        assert!(!is_valid_commit_hash("ABCDEF1"));
        assert!(!is_valid_commit_hash("abcdefg"));
        assert!(!is_valid_commit_hash(" abcdef"));
        assert!(!is_valid_commit_hash("abcdef\n"));
    }

    #[test]
    fn test_construction_rejects_invalid_hash() {
        let repo = Repository::open("/tmp");
        let err = repo.commit("xyz12").unwrap_err();
        assert!(matches!(err, GitError::InvalidHash { .. }));
        // nothing was executed
        assert_eq!(repo.runner().invocation_count(), 0);
    }

    #[test]
    fn test_equality_is_by_hash() {
        let repo = Repository::open("/tmp");
        let a = repo.commit("abc1234").unwrap();
        let b = repo.commit("abc1234").unwrap();
        let c = repo.commit("abc1235").unwrap();
        assert_eq!(a, b);
        assert_ne!(a, c);
    }

    #[test]
    fn test_equality_ignores_repository() {
        let first = Repository::open("/tmp/one");
        let second = Repository::open("/tmp/two");
        assert_eq!(
            first.commit("abc1234").unwrap(),
            second.commit("abc1234").unwrap()
        );
    }

    #[test]
    fn test_display() {
        let repo = Repository::open("/tmp");
        assert_eq!(repo.commit("abc1234").unwrap().to_string(), "Commit abc1234");
    }
}
