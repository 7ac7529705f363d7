use serde::Deserialize;
use std::path::{Path, PathBuf};

use crate::version::error::ConfigError;
use crate::version::registries::github::DEFAULT_BASE_URL;
use crate::version::resolver::DEFAULT_BRANCH;

// =============================================================================
// Time-related constants
// =============================================================================

/// Timeout for a single resolution in milliseconds (30 seconds)
pub const FETCH_TIMEOUT_MS: u64 = 30_000;

/// Environment variable holding the GitHub token unless configured otherwise
pub const DEFAULT_TOKEN_ENV: &str = "GITHUB_TOKEN";

const APP_NAME: &str = "tag-resolver";

/// Resolver configuration structure
#[derive(Debug, Clone, Deserialize, PartialEq)]
#[serde(default, rename_all = "camelCase")]
pub struct ResolverConfig {
    /// Specifier meaning "the newest release"
    pub default_branch: String,
    /// Per-resolution timeout applied by the CLI
    pub fetch_timeout_ms: u64,
    pub github: GitHubConfig,
}

impl Default for ResolverConfig {
    fn default() -> Self {
        Self {
            default_branch: DEFAULT_BRANCH.to_string(),
            fetch_timeout_ms: FETCH_TIMEOUT_MS,
            github: GitHubConfig::default(),
        }
    }
}

/// GitHub API configuration
#[derive(Debug, Clone, Deserialize, PartialEq)]
#[serde(default, rename_all = "camelCase")]
pub struct GitHubConfig {
    pub base_url: String,
    /// Name of the environment variable the bearer token is read from
    pub token_env: String,
}

impl Default for GitHubConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            token_env: DEFAULT_TOKEN_ENV.to_string(),
        }
    }
}

impl GitHubConfig {
    /// Reads the bearer token from the configured environment variable.
    pub fn token(&self) -> Option<String> {
        non_empty(std::env::var(&self.token_env).ok())
    }
}

fn non_empty(value: Option<String>) -> Option<String> {
    value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

impl ResolverConfig {
    /// Rejects settings the resolver cannot work with.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.default_branch.is_empty() {
            return Err(ConfigError::EmptyDefaultBranch);
        }
        Ok(())
    }
}

/// Load configuration from `path`.
///
/// A missing file is not an error and yields the defaults.
pub fn load_config(path: &Path) -> Result<ResolverConfig, ConfigError> {
    let config: ResolverConfig = match std::fs::read_to_string(path) {
        Ok(content) => serde_json::from_str(&content)?,
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => ResolverConfig::default(),
        Err(e) => return Err(e.into()),
    };
    config.validate()?;
    Ok(config)
}

/// Returns the path to the config file.
/// Uses $XDG_CONFIG_HOME/tag-resolver/config.json if XDG_CONFIG_HOME is set,
/// otherwise falls back to ~/.config/tag-resolver/config.json.
pub fn config_path() -> PathBuf {
    config_dir_with_env(std::env::var("XDG_CONFIG_HOME").ok(), dirs::home_dir())
        .join("config.json")
}

/// Returns the path to the data directory for tag-resolver.
/// Uses $XDG_DATA_HOME/tag-resolver if XDG_DATA_HOME is set,
/// otherwise falls back to ~/.local/share/tag-resolver,
/// or ./tag-resolver if neither is available.
pub fn data_dir() -> PathBuf {
    data_dir_with_env(std::env::var("XDG_DATA_HOME").ok(), dirs::home_dir())
}

/// Returns the path to the log file.
pub fn log_path() -> PathBuf {
    data_dir().join("tag-resolver.log")
}

fn config_dir_with_env(xdg_config_home: Option<String>, home_dir: Option<PathBuf>) -> PathBuf {
    xdg_dir_with_env(xdg_config_home, home_dir, ".config")
}

fn data_dir_with_env(xdg_data_home: Option<String>, home_dir: Option<PathBuf>) -> PathBuf {
    xdg_dir_with_env(xdg_data_home, home_dir, ".local/share")
}

fn xdg_dir_with_env(
    xdg_home: Option<String>,
    home_dir: Option<PathBuf>,
    fallback: &str,
) -> PathBuf {
    let base = xdg_home
        .map(PathBuf::from)
        .or_else(|| home_dir.map(|home| home.join(fallback)))
        .unwrap_or_else(|| PathBuf::from("."));

    base.join(APP_NAME)
}
