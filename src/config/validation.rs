//! Validation logic for configuration values.

use semver::VersionReq;

use super::defaults::{CurrentBranchConfig, GitConfig, MainBranchConfig};
use super::Config;
use crate::error::{GitError, Result};

fn invalid(message: impl Into<String>) -> GitError {
    GitError::Config {
        path: None,
        message: message.into(),
    }
}

impl Config {
    /// Validate every section.
    pub fn validate(&self) -> Result<()> {
        self.git.validate()?;
        self.main_branch.validate()?;
        self.current_branch.validate()
    }
}

impl GitConfig {
    /// Validate git invocation settings
    pub fn validate(&self) -> Result<()> {
        if self.binary.trim().is_empty() {
            return Err(invalid("git.binary must not be empty"));
        }
        Ok(())
    }
}

impl MainBranchConfig {
    /// Validate main-branch settings
    pub fn validate(&self) -> Result<()> {
        if self.candidates.is_empty() {
            return Err(invalid("main_branch.candidates must not be empty"));
        }
        if let Some(blank) = self.candidates.iter().position(|c| c.trim().is_empty()) {
            return Err(invalid(format!(
                "main_branch.candidates[{}] must not be empty",
                blank
            )));
        }
        Ok(())
    }
}

impl CurrentBranchConfig {
    /// Parse the configured requirement.
    pub fn requirement(&self) -> Result<VersionReq> {
        VersionReq::parse(&self.show_current_requirement).map_err(|source| {
            GitError::VersionRequirement {
                requirement: self.show_current_requirement.clone(),
                source,
            }
        })
    }

    /// Validate current-branch settings
    pub fn validate(&self) -> Result<()> {
        self.requirement().map(|_| ())
    }
}
