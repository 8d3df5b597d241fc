//! CLI argument definitions for gitwrap.

use clap::{Parser, Subcommand};
use clap_complete::Shell;
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "gitwrap")]
#[command(version)]
#[command(about = "Query and tidy git branches, remotes and commits", long_about = None)]
pub struct Cli {
    /// Repository to operate on
    #[arg(short = 'C', long = "repo", global = true, default_value = ".")]
    pub repo: PathBuf,

    /// Use this config file instead of the global and repository configs
    #[arg(long, global = true, value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Log every git invocation to stderr
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// List branches
    Branches {
        /// List branches of this remote instead of local branches
        #[arg(long, value_name = "REMOTE")]
        remote: Option<String>,
        /// Only branches containing this commit
        #[arg(long, value_name = "COMMIT")]
        contains: Option<String>,
    },
    /// List remotes
    Remotes,
    /// Show the checked-out branch
    Current,
    /// Show the main branch
    Main {
        /// Resolve the main branch of this remote
        #[arg(long, value_name = "REMOTE")]
        remote: Option<String>,
    },
    /// List branches fully merged into a target branch
    Merged {
        /// Target branch (defaults to the main branch)
        #[arg(long, value_name = "BRANCH")]
        into: Option<String>,
        /// Check branches of this remote instead of local branches
        #[arg(long, value_name = "REMOTE")]
        remote: Option<String>,
    },
    /// Show commit metadata
    Show {
        /// Commit hash or any revision git understands
        rev: String,
        /// Print as JSON
        #[arg(long)]
        json: bool,
    },
    /// Delete a branch
    Delete {
        /// Branch to delete
        branch: String,
        /// Delete even if not merged (local branches only)
        #[arg(long, short)]
        force: bool,
        /// Delete the branch on this remote (pushes the deletion)
        #[arg(long, value_name = "REMOTE")]
        remote: Option<String>,
    },
    /// Show the upstream of a local branch
    Tracking {
        /// Local branch (defaults to the current branch)
        branch: Option<String>,
        /// Expected remote of the upstream
        #[arg(long, value_name = "REMOTE")]
        remote: Option<String>,
    },
    /// Find non-merge commits on a branch by message
    Grep {
        /// Local branch to search
        branch: String,
        /// Text the commit message must contain
        message: String,
    },
    /// Show version information
    Version {
        /// Show build and git information
        #[arg(long, short)]
        verbose: bool,
    },
    /// Generate shell completions
    Completion {
        /// Shell to generate completions for (bash, zsh, fish, powershell)
        #[arg(value_enum)]
        shell: Shell,
    },
}
