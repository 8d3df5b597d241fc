//! Parsers for line-oriented git output.

use once_cell::sync::Lazy;
use regex::Regex;
use semver::Version;

use crate::error::{GitError, Result};

static BRANCH_LIST_LINE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[0-9a-f]{5,40}\s+(.*)$").expect("valid regex"));

// `*` marks the checked-out branch, `+` a branch checked out in another worktree
static STARRED_BRANCH_LINE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^\s*([*+]?)\s*([^ ]*)").expect("valid regex"));

static VERSION_NUMBER: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(\d+)\.(\d+)(?:\.(\d+))?").expect("valid regex"));

/// One entry of `git branch` style output.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ListedBranch {
    pub name: String,
    /// The line was prefixed with `*`.
    pub current: bool,
}

// An empty listing has no lines at all, so it parses to an empty list.
fn lines(input: &str) -> std::str::Lines<'_> {
    input.trim().lines()
}

/// Parse `<hash> <ref>` lines as printed by `git show-ref` and `git ls-remote`.
///
/// A leading `refs/heads/` is removed from each ref.
pub fn parse_branch_list(input: &str) -> Result<Vec<String>> {
    lines(input)
        .map(|line| {
            let captures = BRANCH_LIST_LINE
                .captures(line)
                .filter(|c| !c[1].is_empty())
                .ok_or_else(|| GitError::Parse {
                    what: "branch list",
                    line: line.to_string(),
                })?;
            Ok(captures[1].replacen("refs/heads/", "", 1).trim().to_string())
        })
        .collect()
}

/// Parse `git branch` output, keeping the `*` marker of the current branch.
pub fn parse_starred_branch_entries(input: &str) -> Result<Vec<ListedBranch>> {
    lines(input)
        .map(|line| {
            let captures = STARRED_BRANCH_LINE
                .captures(line)
                .filter(|c| !c[2].is_empty())
                .ok_or_else(|| GitError::Parse {
                    what: "starred branch list",
                    line: line.to_string(),
                })?;
            Ok(ListedBranch {
                name: captures[2].to_string(),
                current: &captures[1] == "*",
            })
        })
        .collect()
}

/// Parse `git branch` output into plain branch names.
pub fn parse_starred_branch_list(input: &str) -> Result<Vec<String>> {
    Ok(parse_starred_branch_entries(input)?
        .into_iter()
        .map(|entry| entry.name)
        .collect())
}

/// Extract the version number from `git version` output.
///
/// Vendor suffixes such as `.windows.1` or `(Apple Git-143)` are ignored.
pub fn parse_git_version(output: &str) -> Result<Version> {
    let text = output.trim().trim_start_matches("git version").trim();
    let captures = VERSION_NUMBER
        .captures(text)
        .ok_or_else(|| GitError::Version {
            output: output.trim().to_string(),
        })?;

    let component = |i: usize| -> Result<u64> {
        captures
            .get(i)
            .map_or(Ok(0), |m| m.as_str().parse::<u64>())
            .map_err(|_| GitError::Version {
                output: output.trim().to_string(),
            })
    };

    Ok(Version::new(component(1)?, component(2)?, component(3)?))
}
