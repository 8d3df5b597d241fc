//! Configuration for git invocation and branch resolution.
//!
//! Settings come from YAML files. A global file under
//! `~/.config/gitwrap/config.yaml` is merged with a per-repository
//! `.gitwrap.yaml`; repository values override global ones. Every field has a
//! default, so an absent file is the same as an empty one.

use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

use crate::error::{GitError, Result};

pub mod defaults;
pub mod validation;

pub use defaults::*;

/// File name of the per-repository config, relative to the repository root
pub const PROJECT_CONFIG_FILE: &str = ".gitwrap.yaml";

#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize, Serialize)]
pub struct Config {
    #[serde(default)]
    pub git: GitConfig,
    #[serde(default)]
    pub main_branch: MainBranchConfig,
    #[serde(default)]
    pub current_branch: CurrentBranchConfig,
}

impl Config {
    /// Load the merged configuration that applies to the repository at `repo_path`.
    /// Merge order (later overrides earlier):
    /// 1. Global config (~/.config/gitwrap/config.yaml)
    /// 2. Project config (<repo>/.gitwrap.yaml)
    pub fn load_for(repo_path: &Path) -> Result<Self> {
        Self::load_merged_from(
            global_config_path().as_deref(),
            Some(&repo_path.join(PROJECT_CONFIG_FILE)),
        )
    }

    pub fn load_from(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path).map_err(|e| GitError::Config {
            path: Some(path.to_path_buf()),
            message: e.to_string(),
        })?;

        Self::parse(&content).map_err(|e| with_path(e, path))
    }

    pub fn parse(content: &str) -> Result<Self> {
        if content.trim().is_empty() {
            return Ok(Self::default());
        }

        let config: Config = serde_yaml::from_str(content).map_err(|e| GitError::Config {
            path: None,
            message: format!("failed to parse config: {}", e),
        })?;

        config.validate()?;

        Ok(config)
    }

    /// Load merged configuration from optional global and project config paths.
    /// Missing files are skipped.
    pub fn load_merged_from(global_path: Option<&Path>, project_path: Option<&Path>) -> Result<Self> {
        let global_config = global_path
            .filter(|p| p.exists())
            .map(PartialConfig::load_from)
            .transpose()?
            .unwrap_or_default();

        let project_config = project_path
            .filter(|p| p.exists())
            .map(PartialConfig::load_from)
            .transpose()?
            .unwrap_or_default();

        let config = global_config.merge_with(project_config);
        config.validate()?;

        Ok(config)
    }
}

/// Returns the path to the global config file at ~/.config/gitwrap/config.yaml
pub fn global_config_path() -> Option<PathBuf> {
    std::env::var("HOME")
        .ok()
        .map(|home| PathBuf::from(home).join(".config/gitwrap/config.yaml"))
}

fn with_path(err: GitError, path: &Path) -> GitError {
    match err {
        GitError::Config { path: None, message } => GitError::Config {
            path: Some(path.to_path_buf()),
            message,
        },
        other => other,
    }
}

/// Config where every field is optional, used for merging
#[derive(Debug, Deserialize, Default)]
struct PartialConfig {
    pub git: Option<PartialGitConfig>,
    pub main_branch: Option<PartialMainBranchConfig>,
    pub current_branch: Option<PartialCurrentBranchConfig>,
}

#[derive(Debug, Deserialize, Default)]
struct PartialGitConfig {
    pub binary: Option<String>,
}

#[derive(Debug, Deserialize, Default)]
struct PartialMainBranchConfig {
    pub config_key: Option<String>,
    pub candidates: Option<Vec<String>>,
}

#[derive(Debug, Deserialize, Default)]
struct PartialCurrentBranchConfig {
    pub show_current_requirement: Option<String>,
}

impl PartialConfig {
    fn load_from(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path).map_err(|e| GitError::Config {
            path: Some(path.to_path_buf()),
            message: e.to_string(),
        })?;

        if content.trim().is_empty() {
            return Ok(Self::default());
        }

        serde_yaml::from_str(&content).map_err(|e| GitError::Config {
            path: Some(path.to_path_buf()),
            message: format!("failed to parse config: {}", e),
        })
    }

    /// Merge this global config with a project config, returning the merged result.
    /// Values from the project config take precedence over global.
    fn merge_with(self, project: PartialConfig) -> Config {
        let global_git = self.git.unwrap_or_default();
        let global_main = self.main_branch.unwrap_or_default();
        let global_current = self.current_branch.unwrap_or_default();
        let project_git = project.git.unwrap_or_default();
        let project_main = project.main_branch.unwrap_or_default();
        let project_current = project.current_branch.unwrap_or_default();

        Config {
            git: GitConfig {
                binary: project_git
                    .binary
                    .or(global_git.binary)
                    .unwrap_or_else(defaults::default_git_binary),
            },
            main_branch: MainBranchConfig {
                config_key: project_main
                    .config_key
                    .or(global_main.config_key)
                    .unwrap_or_else(defaults::default_branch_config_key),
                // Candidate lists replace each other, they are not concatenated
                candidates: project_main
                    .candidates
                    .or(global_main.candidates)
                    .unwrap_or_else(defaults::default_main_branch_candidates),
            },
            current_branch: CurrentBranchConfig {
                show_current_requirement: project_current
                    .show_current_requirement
                    .or(global_current.show_current_requirement)
                    .unwrap_or_else(defaults::default_show_current_requirement),
            },
        }
    }
}

#[cfg(test)]
mod tests;
