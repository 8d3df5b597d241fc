//! Branch command handlers: listing, main/current lookup, merge status, deletion.

use anyhow::{Context, Result};
use colored::Colorize;

use gitwrap::{Branch, LocalBranch, Repository};

/// List local branches, branches of a remote, or branches containing a commit.
pub fn cmd_branches(repo: &Repository, remote: Option<&str>, contains: Option<&str>) -> Result<()> {
    if let Some(rev) = contains {
        let commit = repo
            .resolve_commit(rev)
            .with_context(|| format!("Failed to resolve {}", rev))?;

        match remote {
            Some(name) => {
                let remote = repo.remote(name)?;
                for branch in commit.remote_branches_containing(&remote)? {
                    println!("{}", branch.full_name());
                }
            }
            None => {
                for branch in commit.local_branches_containing()? {
                    println!("{}", branch.name());
                }
            }
        }
        return Ok(());
    }

    if let Some(name) = remote {
        let remote = repo.remote(name)?;
        for branch in remote.branches()? {
            println!("{}", branch.full_name());
        }
        return Ok(());
    }

    // Detached HEAD simply means no branch gets the marker
    let current = repo.current_branch().ok();
    for branch in repo.branches()? {
        if current.as_ref() == Some(&branch) {
            println!("{} {}", "*".green(), branch.name().green());
        } else {
            println!("  {}", branch.name());
        }
    }
    Ok(())
}

/// Print the checked-out branch.
pub fn cmd_current(repo: &Repository) -> Result<()> {
    let branch = repo.current_branch()?;
    println!("{}", branch.name());
    Ok(())
}

/// Print the main branch of the repository or of a remote.
pub fn cmd_main(repo: &Repository, remote: Option<&str>) -> Result<()> {
    match remote {
        Some(name) => {
            let remote = repo.remote(name)?;
            println!("{}", remote.main_branch()?.full_name());
        }
        None => println!("{}", repo.main_branch()?.name()),
    }
    Ok(())
}

/// List branches whose history is contained in the target branch.
pub fn cmd_merged(repo: &Repository, into: Option<&str>, remote: Option<&str>) -> Result<()> {
    let mut merged = Vec::new();

    match remote {
        Some(name) => {
            let remote = repo.remote(name)?;
            let target = match into {
                Some(branch) => remote.branch(branch)?,
                None => remote.main_branch()?,
            };
            for branch in remote.branches()? {
                // ls-remote may report branches that were never fetched
                if branch == target || !remote.has_branch(branch.name())? {
                    continue;
                }
                if branch.is_merged_to(&target)? {
                    merged.push(branch.full_name());
                }
            }
        }
        None => {
            let target = match into {
                Some(branch) => repo.branch(branch)?,
                None => repo.main_branch()?,
            };
            for branch in repo.branches()? {
                if branch == target {
                    continue;
                }
                if branch.is_merged_to(&target)? {
                    merged.push(branch.full_name());
                }
            }
        }
    }

    if merged.is_empty() {
        eprintln!("{}", "No merged branches.".yellow());
    }
    for name in merged {
        println!("{}", name);
    }
    Ok(())
}

/// Delete a local branch, or push the deletion of a remote branch.
pub fn cmd_delete(repo: &Repository, branch: &str, force: bool, remote: Option<&str>) -> Result<()> {
    if let Some(name) = remote {
        let remote = repo.remote(name)?;
        let target = remote.branch(branch)?;
        eprintln!(
            "{} deleting {} on the remote",
            "Warning:".yellow(),
            target.full_name()
        );
        target.delete()?;
        println!("{} {}", "Deleted".green(), target);
        return Ok(());
    }

    let target = repo.branch(branch)?;
    if force {
        target.force_delete()?;
    } else {
        target.delete().with_context(|| {
            format!("Failed to delete {} (use --force if it is not merged)", branch)
        })?;
    }
    println!("{} {}", "Deleted".green(), target);
    Ok(())
}

/// Print the upstream of a branch.
pub fn cmd_tracking(repo: &Repository, branch: Option<&str>, remote: Option<&str>) -> Result<()> {
    let local: LocalBranch<'_> = match branch {
        Some(name) => repo.branch(name)?,
        None => repo.current_branch()?,
    };

    match remote {
        Some(name) => {
            let remote = repo.remote(name)?;
            println!("{}", local.tracking_branch(&remote)?.full_name());
        }
        None => println!("{}", local.tracking_name()?),
    }
    Ok(())
}
