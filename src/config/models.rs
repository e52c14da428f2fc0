//! Configuration sections

use serde::{Deserialize, Serialize};

/// Workspace API connection settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WorkspaceConfig {
    /// Base URL of the workspace API
    #[serde(default = "default_base_url")]
    pub base_url: String,
    /// Bearer token for authentication
    #[serde(default)]
    pub api_token: String,
    /// Per-request timeout in seconds
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
}

impl Default for WorkspaceConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            api_token: String::new(),
            timeout_secs: default_timeout_secs(),
        }
    }
}

/// Reference data caching settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CacheSettings {
    /// How long fetched reference data stays fresh, in seconds
    #[serde(default = "default_reference_ttl_secs")]
    pub reference_ttl_secs: u64,
}

impl Default for CacheSettings {
    fn default() -> Self {
        Self {
            reference_ttl_secs: default_reference_ttl_secs(),
        }
    }
}

/// Batch execution settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BatchSettings {
    /// Concurrency used when a request does not name its own
    #[serde(default = "default_concurrency")]
    pub default_concurrency: usize,
}

impl Default for BatchSettings {
    fn default() -> Self {
        Self {
            default_concurrency: default_concurrency(),
        }
    }
}

fn default_base_url() -> String {
    "https://api.tasklane.dev/v1".to_string()
}

fn default_timeout_secs() -> u64 {
    30
}

fn default_reference_ttl_secs() -> u64 {
    crate::core::workspace::REFERENCE_CACHE_TTL.as_secs()
}

fn default_concurrency() -> usize {
    crate::core::batch::DEFAULT_CONCURRENCY
}
