//! Configuration and HTTP client construction for the hosted backends.

use std::time::Duration;

use crate::error::StoreError;

/// Configuration for the hosted document store's REST API.
#[derive(Debug, Clone)]
pub struct LiveblocksConfig {
    /// Base URL of the REST API.
    pub base_url: String,
    /// Secret API key, sent as a bearer token.
    pub secret_key: String,
    /// Per-request timeout.
    pub timeout: Duration,
}

impl Default for LiveblocksConfig {
    fn default() -> Self {
        Self {
            base_url: "https://api.liveblocks.io/v2".into(),
            secret_key: String::new(),
            timeout: Duration::from_secs(10),
        }
    }
}

/// Configuration for the identity provider's user API.
#[derive(Debug, Clone)]
pub struct ClerkConfig {
    /// Base URL of the users API.
    pub base_url: String,
    /// Secret API key, sent as a bearer token.
    pub secret_key: String,
    /// Per-request timeout.
    pub timeout: Duration,
}

impl Default for ClerkConfig {
    fn default() -> Self {
        Self {
            base_url: "https://api.clerk.com/v1".into(),
            secret_key: String::new(),
            timeout: Duration::from_secs(10),
        }
    }
}

/// Build the shared HTTP client with the configured timeout.
pub(crate) fn build_client(timeout: Duration) -> Result<reqwest::Client, StoreError> {
    reqwest::Client::builder()
        .timeout(timeout)
        .build()
        .map_err(StoreError::from)
}
