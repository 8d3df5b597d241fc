//! Remote command handlers.

use anyhow::Result;
use colored::Colorize;

use gitwrap::Repository;

/// List configured remotes.
pub fn cmd_remotes(repo: &Repository) -> Result<()> {
    let remotes = repo.remotes()?;
    if remotes.is_empty() {
        eprintln!("{}", "No remotes configured.".yellow());
    }
    for remote in remotes {
        println!("{}", remote.name());
    }
    Ok(())
}
