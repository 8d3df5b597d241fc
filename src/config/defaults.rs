//! Default values and configuration structs with default implementations.

use serde::{Deserialize, Serialize};

/// Macro to generate default functions for serde attributes
macro_rules! default_fn {
    ($name:ident, $type:ty, $value:expr) => {
        pub(crate) fn $name() -> $type {
            $value
        }
    };
}

// =========================================================================
// DEFAULT VALUE FUNCTIONS
// =========================================================================

default_fn!(default_git_binary, String, "git".to_string());
default_fn!(
    default_branch_config_key,
    String,
    "init.defaultBranch".to_string()
);
default_fn!(
    default_main_branch_candidates,
    Vec<String>,
    vec![
        "master".to_string(),
        "main".to_string(),
        "primary".to_string(),
    ]
);
// `git branch --show-current` first shipped in git 2.22
default_fn!(
    default_show_current_requirement,
    String,
    ">=2.22".to_string()
);

// =========================================================================
// CONFIG STRUCTS WITH DEFAULTS
// =========================================================================

/// How the git executable is invoked
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct GitConfig {
    /// Executable to spawn (default: "git")
    #[serde(default = "default_git_binary")]
    pub binary: String,
}

impl Default for GitConfig {
    fn default() -> Self {
        Self {
            binary: default_git_binary(),
        }
    }
}

/// Main-branch resolution settings
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct MainBranchConfig {
    /// Git config key naming the default branch (default: "init.defaultBranch")
    #[serde(default = "default_branch_config_key")]
    pub config_key: String,
    /// Fallback names tried in order after the configured default
    #[serde(default = "default_main_branch_candidates")]
    pub candidates: Vec<String>,
}

impl Default for MainBranchConfig {
    fn default() -> Self {
        Self {
            config_key: default_branch_config_key(),
            candidates: default_main_branch_candidates(),
        }
    }
}

/// Current-branch resolution settings
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct CurrentBranchConfig {
    /// Git versions matching this requirement use `git branch --show-current`;
    /// older ones fall back to `git rev-parse --abbrev-ref HEAD`
    #[serde(default = "default_show_current_requirement")]
    pub show_current_requirement: String,
}

impl Default for CurrentBranchConfig {
    fn default() -> Self {
        Self {
            show_current_requirement: default_show_current_requirement(),
        }
    }
}
