//! Connector that builds an OnlineClient from the configuration file

use std::path::PathBuf;
use std::sync::Arc;

use async_trait::async_trait;
use c14_core::config::TOKEN_ENV;
use c14_core::{ConfigManager, Connector, OnlineApi, Result};

use crate::client::OnlineClient;

/// Loads configuration lazily and connects to the Online.net API
#[derive(Debug)]
pub struct OnlineConnector {
    config_path: Option<PathBuf>,
    token_override: Option<String>,
}

impl OnlineConnector {
    /// Use the default config location and the `C14_TOKEN` override
    pub fn from_env() -> Self {
        Self {
            config_path: None,
            token_override: std::env::var(TOKEN_ENV).ok(),
        }
    }

    /// Use an explicit config file and token override
    pub fn new(config_path: PathBuf, token_override: Option<String>) -> Self {
        Self {
            config_path: Some(config_path),
            token_override,
        }
    }

    fn config_manager(&self) -> Result<ConfigManager> {
        match &self.config_path {
            Some(path) => Ok(ConfigManager::with_path(path.clone())),
            None => ConfigManager::new(),
        }
    }
}

#[async_trait]
impl Connector for OnlineConnector {
    async fn connect(&self) -> Result<Arc<dyn OnlineApi>> {
        let config = self.config_manager()?.load()?;
        let settings = config
            .api
            .with_token_override(self.token_override.clone());
        tracing::debug!(endpoint = %settings.endpoint, "connecting to online api");
        Ok(Arc::new(OnlineClient::new(&settings)?))
    }
}
