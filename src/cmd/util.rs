//! Utility commands (version, completion).

use anyhow::Result;
use clap::CommandFactory;
use clap_complete::{generate, Shell};
use std::io;
use std::path::Path;

use gitwrap::runner::Runner;

use crate::cli::Cli;

/// Show version information
pub fn cmd_version(verbose: bool, repo: &Path) -> Result<()> {
    const VERSION: &str = env!("CARGO_PKG_VERSION");
    println!("gitwrap {}", VERSION);

    if verbose {
        const GIT_SHA: &str = env!("GIT_SHA");
        const BUILD_DATE: &str = env!("BUILD_DATE");
        println!("commit: {}", GIT_SHA);
        println!("built: {}", BUILD_DATE);

        match Runner::default().version(repo) {
            Ok(version) => println!("git: {}", version),
            Err(e) => println!("git: unavailable ({})", e),
        }
    }

    Ok(())
}

/// Generate shell completion script
pub fn cmd_completion(shell: Shell) -> Result<()> {
    let mut cmd = Cli::command();
    generate(shell, &mut cmd, "gitwrap", &mut io::stdout());
    Ok(())
}
