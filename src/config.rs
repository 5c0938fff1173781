use crate::domain::pattern::{
    ReleasePattern, ReleasePatterns, DEFAULT_BRANCH_FILTER, DEFAULT_BRANCH_TEMPLATE,
    DEFAULT_TAG_TEMPLATE,
};
use crate::error::{AutoVersionError, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

/// File name looked up in the working directory
pub const CONFIG_FILE_NAME: &str = "autoversion.toml";

/// Represents the complete configuration for git-autoversion.
///
/// Contains the release naming patterns and the build-server detection rule.
#[derive(Debug, Deserialize, Serialize, Clone, PartialEq, Default)]
pub struct Config {
    #[serde(default)]
    pub patterns: PatternsConfig,

    #[serde(default)]
    pub ci: CiConfig,
}

fn default_branch_pattern() -> String {
    DEFAULT_BRANCH_TEMPLATE.to_string()
}

fn default_tag_pattern() -> String {
    DEFAULT_TAG_TEMPLATE.to_string()
}

fn default_branch_filter() -> String {
    DEFAULT_BRANCH_FILTER.to_string()
}

/// Release naming patterns.
///
/// `{version}` in a pattern stands for `<major>.<minor>[.<patch>]`.
#[derive(Debug, Deserialize, Serialize, Clone, PartialEq)]
pub struct PatternsConfig {
    /// Remote release branches, e.g. "origin/releases/{version}"
    #[serde(default = "default_branch_pattern")]
    pub branch: String,

    /// Release tags as listed by `git ls-remote --tags`, e.g. "refs/tags/v{version}"
    #[serde(default = "default_tag_pattern")]
    pub tag: String,

    /// Glob passed to `git branch -r --list`
    #[serde(default = "default_branch_filter")]
    pub branch_filter: String,
}

impl Default for PatternsConfig {
    fn default() -> Self {
        PatternsConfig {
            branch: default_branch_pattern(),
            tag: default_tag_pattern(),
            branch_filter: default_branch_filter(),
        }
    }
}

impl PatternsConfig {
    pub fn compile(&self) -> Result<ReleasePatterns> {
        Ok(ReleasePatterns {
            branch: ReleasePattern::new(self.branch.as_str())?,
            tag: ReleasePattern::new(self.tag.as_str())?,
            branch_filter: self.branch_filter.clone(),
        })
    }
}

fn default_server_env() -> String {
    "SYSTEM_SERVERTYPE".to_string()
}

fn default_server_value() -> String {
    "hosted".to_string()
}

/// How to tell that we run on the build server.
///
/// The defaults match hosted Azure Pipelines agents.
#[derive(Debug, Deserialize, Serialize, Clone, PartialEq)]
pub struct CiConfig {
    #[serde(default = "default_server_env")]
    pub server_env: String,

    #[serde(default = "default_server_value")]
    pub server_value: String,
}

impl Default for CiConfig {
    fn default() -> Self {
        CiConfig {
            server_env: default_server_env(),
            server_value: default_server_value(),
        }
    }
}

/// Loads configuration from file or returns defaults.
///
/// Attempts to load configuration in the following order:
/// 1. Custom path provided as parameter
/// 2. `autoversion.toml` in current directory
/// 3. `.autoversion.toml` in user config directory
/// 4. Default configuration if no file found
///
/// Patterns are compiled once while loading, so a malformed pattern is reported
/// here instead of on first use.
pub fn load_config(config_path: Option<&str>) -> Result<Config> {
    let config_str = if let Some(path) = config_path {
        fs::read_to_string(path)?
    } else if Path::new(CONFIG_FILE_NAME).exists() {
        fs::read_to_string(CONFIG_FILE_NAME)?
    } else if let Some(config_dir) = dirs::config_dir() {
        let config_path = config_dir.join(format!(".{}", CONFIG_FILE_NAME));
        if config_path.exists() {
            fs::read_to_string(config_path)?
        } else {
            return Ok(Config::default());
        }
    } else {
        return Ok(Config::default());
    };

    parse_config(&config_str)
}

/// Parse and validate a configuration document
pub fn parse_config(content: &str) -> Result<Config> {
    let config: Config =
        toml::from_str(content).map_err(|e| AutoVersionError::config_file(e.to_string()))?;
    config.patterns.compile()?;
    Ok(config)
}
