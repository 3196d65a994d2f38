use serde::{Deserialize, Serialize};

/// Connection settings for the listings API
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiConfig {
    /// Base URL of the listings API
    pub base_url: String,
    /// Bearer token from the identity provider, passed through as-is
    pub auth_token: Option<String>,
    /// Request timeout in seconds
    pub timeout_secs: u64,
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            base_url: "http://localhost:8080/api".to_string(),
            auth_token: None,
            timeout_secs: 30,
        }
    }
}

impl ApiConfig {
    /// Default config with `LISTINGS_API_URL` / `LISTINGS_API_TOKEN` overrides
    pub fn from_env() -> Self {
        let mut config = Self::default();
        if let Ok(url) = std::env::var("LISTINGS_API_URL") {
            config.base_url = url;
        }
        if let Ok(token) = std::env::var("LISTINGS_API_TOKEN") {
            config.auth_token = Some(token);
        }
        config
    }
}
