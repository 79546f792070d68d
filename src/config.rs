use serde::Deserialize;
use std::path::{Path, PathBuf};
use thiserror::Error;

// =============================================================================
// GitHub API constants
// =============================================================================

/// Default base URL for the GitHub REST API
pub const DEFAULT_GITHUB_API_URL: &str = "https://api.github.com";

/// Items requested per page. GitHub caps `per_page` at 100, and using the
/// maximum keeps the number of requests (and rate limit usage) low.
pub const GH_LIST_PER_PAGE: u32 = 100;

/// Upper bound on the number of items scanned per listing, i.e. at most
/// `GH_SEARCH_LIMIT / GH_LIST_PER_PAGE` pages are fetched.
pub const GH_SEARCH_LIMIT: u32 = 300;

/// User agent sent with every API request
pub const USER_AGENT: &str = "release-channels";

// =============================================================================
// Time-related constants
// =============================================================================

/// Deadline for a whole resolution in milliseconds (30 seconds)
pub const FETCH_TIMEOUT_MS: u64 = 30_000;

/// Timeout for a single HTTP request in milliseconds (10 seconds)
pub const REQUEST_TIMEOUT_MS: u64 = 10_000;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config file {path:?}: {source}")]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("Failed to parse config file {path:?}: {source}")]
    Parse {
        path: PathBuf,
        source: serde_json::Error,
    },
}

/// Top level configuration
#[derive(Debug, Clone, Deserialize, PartialEq)]
#[serde(default, rename_all = "camelCase")]
pub struct Config {
    pub github: GitHubConfig,
    /// Deadline for a whole resolution in milliseconds
    pub timeout_ms: u64,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            github: GitHubConfig::default(),
            timeout_ms: FETCH_TIMEOUT_MS,
        }
    }
}

/// GitHub API client configuration
#[derive(Debug, Clone, Deserialize, PartialEq)]
#[serde(default, rename_all = "camelCase")]
pub struct GitHubConfig {
    pub base_url: String,
    pub token: Option<String>,
    pub request_timeout_ms: u64,
}

impl Default for GitHubConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_GITHUB_API_URL.to_string(),
            token: None,
            request_timeout_ms: REQUEST_TIMEOUT_MS,
        }
    }
}

impl Config {
    /// Reads the configuration from a JSON file. Missing fields take their defaults.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;

        serde_json::from_str(&content).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })
    }

    /// Reads the configuration from [`config_path`], or returns the defaults
    /// when no file exists there.
    pub fn load_default() -> Result<Self, ConfigError> {
        let path = config_path();
        if path.exists() {
            Self::load(&path)
        } else {
            Ok(Self::default())
        }
    }
}

/// Returns the path to the config directory for release-channels.
/// Uses $XDG_CONFIG_HOME/release-channels if XDG_CONFIG_HOME is set,
/// otherwise falls back to ~/.config/release-channels,
/// or ./release-channels if neither is available.
pub fn config_dir() -> PathBuf {
    config_dir_with_env(std::env::var("XDG_CONFIG_HOME").ok(), dirs::home_dir())
}

/// Returns the path to the config file.
pub fn config_path() -> PathBuf {
    config_dir().join("config.json")
}

fn config_dir_with_env(xdg_config_home: Option<String>, home_dir: Option<PathBuf>) -> PathBuf {
    let config_dir = xdg_config_home
        .filter(|dir| !dir.is_empty())
        .map(PathBuf::from)
        .or_else(|| home_dir.map(|home| home.join(".config")))
        .unwrap_or_else(|| PathBuf::from("."));

    config_dir.join("release-channels")
}
