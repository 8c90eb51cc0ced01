//! Configuration management
//!
//! The configuration file is read-only to c14. It is a TOML file at
//! ~/.config/c14/config.toml, or in the directory named by `C14_CONFIG_DIR`
//! when that variable is set.

use std::path::PathBuf;

use serde::Deserialize;

use crate::error::{Error, Result};

/// Current configuration schema version
pub const SCHEMA_VERSION: u32 = 1;

/// Environment variable overriding the configuration directory
pub const CONFIG_DIR_ENV: &str = "C14_CONFIG_DIR";

/// Environment variable overriding the API token
pub const TOKEN_ENV: &str = "C14_TOKEN";

/// Default Online.net API endpoint
const DEFAULT_ENDPOINT: &str = "https://api.online.net/api/v1";

/// Main configuration structure
#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    /// Schema version for migration support
    pub schema_version: u32,

    /// Remote API settings
    #[serde(default)]
    pub api: ApiSettings,
}

/// Settings owned by the remote API client
#[derive(Debug, Clone, Deserialize)]
pub struct ApiSettings {
    /// Base URL of the Online.net API
    #[serde(default = "default_endpoint")]
    pub endpoint: String,

    /// Private API token
    #[serde(default)]
    pub token: Option<String>,

    /// Per-request timeout in seconds
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,

    /// How long to wait for a new archive's bucket to come up, in seconds
    #[serde(default = "default_wait_secs")]
    pub wait_secs: u64,
}

fn default_endpoint() -> String {
    DEFAULT_ENDPOINT.to_string()
}

fn default_timeout_secs() -> u64 {
    30
}

fn default_wait_secs() -> u64 {
    120
}

impl Default for ApiSettings {
    fn default() -> Self {
        Self {
            endpoint: default_endpoint(),
            token: None,
            timeout_secs: default_timeout_secs(),
            wait_secs: default_wait_secs(),
        }
    }
}

impl ApiSettings {
    /// Replace the configured token with `token` when one is given
    pub fn with_token_override(mut self, token: Option<String>) -> Self {
        if let Some(token) = token.filter(|t| !t.trim().is_empty()) {
            self.token = Some(token);
        }
        self
    }

    /// Get the token, failing with an actionable message when none is configured
    pub fn require_token(&self) -> Result<&str> {
        match self.token.as_deref() {
            Some(token) if !token.trim().is_empty() => Ok(token),
            _ => Err(Error::Config(format!(
                "No API token configured. Set {TOKEN_ENV} or add `token` under [api] in the config file \
                 (get one at https://console.online.net/en/api/access)"
            ))),
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            schema_version: SCHEMA_VERSION,
            api: ApiSettings::default(),
        }
    }
}

/// Locates and loads the configuration file
#[derive(Debug)]
pub struct ConfigManager {
    config_path: PathBuf,
}

impl ConfigManager {
    /// Create a new ConfigManager with the default config path
    ///
    /// `C14_CONFIG_DIR` takes precedence over the platform config directory.
    pub fn new() -> Result<Self> {
        let config_dir = match std::env::var_os(CONFIG_DIR_ENV) {
            Some(dir) if !dir.is_empty() => PathBuf::from(dir),
            _ => dirs::config_dir()
                .ok_or_else(|| Error::Config("Could not determine config directory".into()))?
                .join("c14"),
        };
        Ok(Self {
            config_path: config_dir.join("config.toml"),
        })
    }

    /// Create a ConfigManager with a custom path (useful for testing)
    pub fn with_path(path: PathBuf) -> Self {
        Self { config_path: path }
    }

    /// Load configuration from disk
    ///
    /// If the configuration file doesn't exist, returns a default configuration.
    /// Files from older schema versions are read as they are.
    pub fn load(&self) -> Result<Config> {
        if !self.config_path.exists() {
            tracing::debug!(path = %self.config_path.display(), "no config file, using defaults");
            return Ok(Config::default());
        }

        let content = std::fs::read_to_string(&self.config_path)?;
        let config: Config = toml::from_str(&content)?;

        if config.schema_version > SCHEMA_VERSION {
            return Err(Error::Config(format!(
                "Configuration file version {} is newer than supported version {}. Please upgrade c14.",
                config.schema_version, SCHEMA_VERSION
            )));
        }

        url::Url::parse(&config.api.endpoint)?;

        Ok(config)
    }
}
