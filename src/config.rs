//! Configuration management for sitefinder.
//!
//! All configuration is loaded from `./config/sitefinder.toml`. The template
//! shipped with the binary is the only place defaults exist; credentials can
//! be overridden from the environment so keys never have to live on disk.

use serde::Deserialize;
use std::fs;
use std::io::{self, Write};
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Configuration file path relative to the working directory.
pub const CONFIG_PATH: &str = "./config/sitefinder.toml";

/// Default configuration file content.
pub const DEFAULT_CONFIG: &str = include_str!("../config/sitefinder.toml");

/// Environment override for the API key.
pub const API_KEY_ENV: &str = "SITEFINDER_API_KEY";

/// Environment override for the search engine id.
pub const ENGINE_ID_ENV: &str = "SITEFINDER_SEARCH_ENGINE_ID";

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Configuration file not found at {0}")]
    FileNotFound(PathBuf),

    #[error("Failed to read configuration file: {0}")]
    IoError(#[from] io::Error),

    #[error("Failed to parse configuration file: {0}")]
    ParseError(#[from] toml::de::Error),

    #[error("Configuration field '{field}' cannot be empty (set it in the config file or via {env_hint})")]
    MissingCredential { field: String, env_hint: String },

    #[error("Configuration field '{field}' is invalid: {reason}")]
    InvalidValue { field: String, reason: String },
}

/// Root configuration structure.
#[derive(Debug, Clone, Deserialize)]
pub struct AppConfig {
    pub search: SearchConfig,
}

/// Everything the resolution engine needs for one run. Immutable while a
/// batch is in flight.
#[derive(Debug, Clone, Deserialize)]
pub struct SearchConfig {
    /// Search API endpoint. Points at Google's Programmable Search JSON API
    /// in production; tests point it at a local mock server.
    #[serde(default = "default_endpoint")]
    pub endpoint: String,

    /// API key, required before a batch starts.
    #[serde(default)]
    pub api_key: String,

    /// Programmable Search Engine id (cx), required before a batch starts.
    #[serde(default)]
    pub search_engine_id: String,

    /// Maximum result links kept per company.
    #[serde(default = "default_max_links")]
    pub max_links_per_company: usize,

    /// Delay between companies in a batch (milliseconds).
    #[serde(default = "default_search_delay_ms")]
    pub search_delay_ms: u64,

    /// Delay between consecutive queries for one company (milliseconds).
    #[serde(default = "default_query_delay_ms")]
    pub query_delay_ms: u64,

    /// Timeout for one search request (seconds).
    #[serde(default = "default_request_timeout_secs")]
    pub request_timeout_secs: u64,

    /// Timeout for one fallback HEAD probe (seconds).
    #[serde(default = "default_probe_timeout_secs")]
    pub probe_timeout_secs: u64,

    /// Retry budget for rate-limited search requests.
    #[serde(default = "default_max_retries")]
    pub max_retries: u32,

    /// Base delay for exponential retry backoff (milliseconds).
    #[serde(default = "default_retry_base_delay_ms")]
    pub retry_base_delay_ms: u64,
}

fn default_endpoint() -> String {
    "https://www.googleapis.com/customsearch/v1".to_string()
}

fn default_max_links() -> usize {
    4
}

fn default_search_delay_ms() -> u64 {
    500
}

fn default_query_delay_ms() -> u64 {
    1000
}

fn default_request_timeout_secs() -> u64 {
    15
}

fn default_probe_timeout_secs() -> u64 {
    5
}

fn default_max_retries() -> u32 {
    3
}

fn default_retry_base_delay_ms() -> u64 {
    1000
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self {
            endpoint: default_endpoint(),
            api_key: String::new(),
            search_engine_id: String::new(),
            max_links_per_company: default_max_links(),
            search_delay_ms: default_search_delay_ms(),
            query_delay_ms: default_query_delay_ms(),
            request_timeout_secs: default_request_timeout_secs(),
            probe_timeout_secs: default_probe_timeout_secs(),
            max_retries: default_max_retries(),
            retry_base_delay_ms: default_retry_base_delay_ms(),
        }
    }
}

impl SearchConfig {
    /// Pull credentials from the environment when set there.
    pub fn apply_env_overrides(&mut self) {
        if let Ok(key) = std::env::var(API_KEY_ENV) {
            if !key.trim().is_empty() {
                self.api_key = key;
            }
        }
        if let Ok(id) = std::env::var(ENGINE_ID_ENV) {
            if !id.trim().is_empty() {
                self.search_engine_id = id;
            }
        }
    }

    /// Validate once before a batch. A failure here fails the whole run; no
    /// per-company work starts with an incomplete configuration.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.api_key.trim().is_empty() {
            return Err(ConfigError::MissingCredential {
                field: "search.api_key".to_string(),
                env_hint: API_KEY_ENV.to_string(),
            });
        }
        if self.search_engine_id.trim().is_empty() {
            return Err(ConfigError::MissingCredential {
                field: "search.search_engine_id".to_string(),
                env_hint: ENGINE_ID_ENV.to_string(),
            });
        }
        if self.max_links_per_company == 0 {
            return Err(ConfigError::InvalidValue {
                field: "search.max_links_per_company".to_string(),
                reason: "must be a positive integer".to_string(),
            });
        }
        if self.request_timeout_secs == 0 {
            return Err(ConfigError::InvalidValue {
                field: "search.request_timeout_secs".to_string(),
                reason: "must be a positive number of seconds".to_string(),
            });
        }
        if self.probe_timeout_secs == 0 {
            return Err(ConfigError::InvalidValue {
                field: "search.probe_timeout_secs".to_string(),
                reason: "must be a positive number of seconds".to_string(),
            });
        }
        if !self.endpoint.starts_with("http://") && !self.endpoint.starts_with("https://") {
            return Err(ConfigError::InvalidValue {
                field: "search.endpoint".to_string(),
                reason: format!("not an HTTP(S) URL: {}", self.endpoint),
            });
        }
        Ok(())
    }
}

impl AppConfig {
    /// Load configuration from the default path.
    pub fn load() -> Result<Self, ConfigError> {
        Self::load_from_path(Path::new(CONFIG_PATH))
    }

    /// Load configuration from a specific path.
    pub fn load_from_path(path: &Path) -> Result<Self, ConfigError> {
        if !path.exists() {
            return Err(ConfigError::FileNotFound(path.to_path_buf()));
        }
        let content = fs::read_to_string(path)?;
        let config: AppConfig = toml::from_str(&content)?;
        Ok(config)
    }

    /// Create the default configuration file at the standard location.
    pub fn create_default_config() -> Result<PathBuf, ConfigError> {
        let path = Path::new(CONFIG_PATH);
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }
        let mut file = fs::File::create(path)?;
        file.write_all(DEFAULT_CONFIG.as_bytes())?;
        Ok(path.to_path_buf())
    }

    /// Check if stdin is an interactive terminal.
    pub fn is_interactive() -> bool {
        atty::is(atty::Stream::Stdin)
    }

    /// Prompt the user to create a default config (interactive mode only).
    pub fn prompt_create_config() -> Result<Option<PathBuf>, ConfigError> {
        if !Self::is_interactive() {
            return Ok(None);
        }

        print!("Configuration file not found. Create default config? [Y/n] ");
        io::stdout().flush()?;

        let mut input = String::new();
        io::stdin().read_line(&mut input)?;
        let input = input.trim().to_lowercase();

        if input.is_empty() || input == "y" || input == "yes" {
            let path = Self::create_default_config()?;
            Ok(Some(path))
        } else {
            Ok(None)
        }
    }
}
