//! Commit command handlers.

use anyhow::{Context, Result};
use colored::Colorize;

use gitwrap::{CommitInfo, Repository};

/// Show metadata for a commit.
pub fn cmd_show(repo: &Repository, rev: &str, json: bool) -> Result<()> {
    let commit = repo
        .resolve_commit(rev)
        .with_context(|| format!("Failed to resolve {}", rev))?;
    let info = commit.info()?;

    if json {
        println!("{}", serde_json::to_string_pretty(&info)?);
    } else {
        print!("{}", render_commit(&info));
    }
    Ok(())
}

/// List commits on `branch` whose message contains `message`.
pub fn cmd_grep(repo: &Repository, branch: &str, message: &str) -> Result<()> {
    let branch = repo.branch(branch)?;
    let commits = branch.commits_by_message(message)?;

    if commits.is_empty() {
        eprintln!("{}", "No matching commits.".yellow());
    }
    for commit in commits {
        println!("{} {}", commit.hash().yellow(), commit.message()?);
    }
    Ok(())
}

fn render_commit(info: &CommitInfo) -> String {
    let mut output = format!(
        "{} {}\nAuthor: {} <{}>\nDate:   {} ({})\n\n    {}\n",
        "commit".yellow(),
        info.hash.yellow(),
        info.author_name,
        info.author_email,
        info.author_date,
        info.author_date_relative,
        info.message
    );
    if !info.body.is_empty() {
        output.push('\n');
        for line in info.body.lines() {
            output.push_str(&format!("    {}\n", line));
        }
    }
    output
}
