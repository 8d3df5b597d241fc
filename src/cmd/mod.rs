//! Command handlers for the gitwrap CLI.

use anyhow::{Context, Result};
use std::path::Path;

use gitwrap::{Config, Repository};

pub mod branches;
pub mod commit;
pub mod remotes;
pub mod util;

/// Open the repository at `path`.
///
/// An explicit config file replaces the merged global and repository configs.
pub fn open_repository(path: &Path, config: Option<&Path>) -> Result<Repository> {
    match config {
        Some(config_path) => {
            let config = Config::load_from(config_path)
                .with_context(|| format!("Failed to load config {}", config_path.display()))?;
            Ok(Repository::with_config(path, config))
        }
        None => Repository::discover(path)
            .with_context(|| format!("Failed to load config for {}", path.display())),
    }
}
