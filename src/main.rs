//! CLI entry point for gitwrap.

mod cli;
mod cmd;

use anyhow::Result;
use clap::Parser;
use colored::Colorize;
use tracing_subscriber::EnvFilter;

use cli::{Cli, Commands};

fn init_tracing(verbose: bool) {
    let default = if verbose { "gitwrap=debug" } else { "warn" };
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default)),
        )
        .with_writer(std::io::stderr)
        .init();
}

fn main() {
    if let Err(e) = run() {
        eprintln!("{} {:#}", "Error:".red(), e);
        std::process::exit(1);
    }
}

fn run() -> Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    let open = || cmd::open_repository(&cli.repo, cli.config.as_deref());

    match cli.command {
        Commands::Branches { remote, contains } => {
            cmd::branches::cmd_branches(&open()?, remote.as_deref(), contains.as_deref())
        }
        Commands::Remotes => cmd::remotes::cmd_remotes(&open()?),
        Commands::Current => cmd::branches::cmd_current(&open()?),
        Commands::Main { remote } => cmd::branches::cmd_main(&open()?, remote.as_deref()),
        Commands::Merged { into, remote } => {
            cmd::branches::cmd_merged(&open()?, into.as_deref(), remote.as_deref())
        }
        Commands::Show { rev, json } => cmd::commit::cmd_show(&open()?, &rev, json),
        Commands::Delete {
            branch,
            force,
            remote,
        } => cmd::branches::cmd_delete(&open()?, &branch, force, remote.as_deref()),
        Commands::Tracking { branch, remote } => {
            cmd::branches::cmd_tracking(&open()?, branch.as_deref(), remote.as_deref())
        }
        Commands::Grep { branch, message } => cmd::commit::cmd_grep(&open()?, &branch, &message),
        Commands::Version { verbose } => cmd::util::cmd_version(verbose, &cli.repo),
        Commands::Completion { shell } => cmd::util::cmd_completion(shell),
    }
}
