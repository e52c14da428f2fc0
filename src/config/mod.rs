//! Configuration management
//!
//! Settings come from a YAML file or from `TASKLANE_*` environment
//! variables, and are validated before anything connects.

pub mod models;

pub use models::{BatchSettings, CacheSettings, WorkspaceConfig};

use crate::core::batch::MAX_CONCURRENCY;
use crate::utils::error::{Result, TasklaneError};
use serde::{Deserialize, Serialize};
use std::env;
use std::path::Path;
use tracing::{debug, info};
use url::Url;

/// Top-level configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    /// Workspace API connection
    #[serde(default)]
    pub workspace: WorkspaceConfig,
    /// Reference data caching
    #[serde(default)]
    pub cache: CacheSettings,
    /// Batch execution defaults
    #[serde(default)]
    pub batch: BatchSettings,
}

impl Config {
    /// Load configuration from a YAML file
    pub async fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        info!("Loading configuration from: {:?}", path);

        let content = tokio::fs::read_to_string(path)
            .await
            .map_err(|e| TasklaneError::config(format!("Failed to read config file: {}", e)))?;

        let config: Self = serde_yaml::from_str(&content)
            .map_err(|e| TasklaneError::config(format!("Failed to parse config: {}", e)))?;

        config.validate()?;
        debug!("Configuration loaded successfully");
        Ok(config)
    }

    /// Load configuration from `TASKLANE_*` environment variables
    pub fn from_env() -> Result<Self> {
        info!("Loading configuration from environment variables");
        let config = Self::from_lookup(|key| env::var(key).ok())?;
        config.validate()?;
        Ok(config)
    }

    /// Build from defaults plus whatever the lookup provides
    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self> {
        let mut config = Self::default();

        if let Some(base_url) = lookup("TASKLANE_BASE_URL") {
            config.workspace.base_url = base_url;
        }
        if let Some(token) = lookup("TASKLANE_API_TOKEN") {
            config.workspace.api_token = token;
        }
        if let Some(timeout) = lookup("TASKLANE_TIMEOUT_SECS") {
            config.workspace.timeout_secs = timeout
                .parse()
                .map_err(|e| TasklaneError::config(format!("Invalid timeout: {}", e)))?;
        }
        if let Some(ttl) = lookup("TASKLANE_REFERENCE_TTL_SECS") {
            config.cache.reference_ttl_secs = ttl
                .parse()
                .map_err(|e| TasklaneError::config(format!("Invalid reference TTL: {}", e)))?;
        }
        if let Some(concurrency) = lookup("TASKLANE_DEFAULT_CONCURRENCY") {
            config.batch.default_concurrency = concurrency
                .parse()
                .map_err(|e| TasklaneError::config(format!("Invalid concurrency: {}", e)))?;
        }

        Ok(config)
    }

    /// Validate the entire configuration
    pub fn validate(&self) -> Result<()> {
        debug!("Validating configuration");

        if self.workspace.base_url.trim().is_empty() {
            return Err(TasklaneError::config("workspace.base_url is required"));
        }
        let url = Url::parse(&self.workspace.base_url)
            .map_err(|e| TasklaneError::config(format!("Invalid workspace.base_url: {}", e)))?;
        if url.scheme() != "http" && url.scheme() != "https" {
            return Err(TasklaneError::config(format!(
                "workspace.base_url must be http or https, got {}",
                url.scheme()
            )));
        }

        if self.workspace.api_token.trim().is_empty() {
            return Err(TasklaneError::config("workspace.api_token is required"));
        }

        if self.workspace.timeout_secs == 0 || self.workspace.timeout_secs > 300 {
            return Err(TasklaneError::config(format!(
                "workspace.timeout_secs must be between 1 and 300, got {}",
                self.workspace.timeout_secs
            )));
        }

        if self.batch.default_concurrency == 0 || self.batch.default_concurrency > MAX_CONCURRENCY
        {
            return Err(TasklaneError::config(format!(
                "batch.default_concurrency must be between 1 and {}, got {}",
                MAX_CONCURRENCY, self.batch.default_concurrency
            )));
        }

        debug!("Configuration validation completed");
        Ok(())
    }

    /// Serialize back to YAML, for dumping effective settings
    pub fn to_yaml(&self) -> Result<String> {
        serde_yaml::to_string(self)
            .map_err(|e| TasklaneError::config(format!("Failed to serialize config: {}", e)))
    }
}
