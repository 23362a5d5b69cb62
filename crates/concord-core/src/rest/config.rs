//! Configuration types for REST transports.

use std::time::Duration;

/// Default API base URL.
pub const DEFAULT_API_BASE: &str = "https://discord.com/api/v10";

/// Configuration for REST transport implementations.
#[derive(Debug, Clone)]
pub struct RestConfig {
    /// API base URL endpoints are joined onto.
    pub api_base: String,
    /// Bot token for the `Authorization` header.
    pub token: Option<String>,
    /// Request timeout duration.
    pub timeout: Duration,
}

impl RestConfig {
    /// Creates a config pointing at the default API base.
    pub fn new() -> Self {
        Self {
            api_base: DEFAULT_API_BASE.to_string(),
            token: None,
            timeout: Duration::from_secs(30),
        }
    }

    /// Sets the API base URL.
    pub fn with_api_base(mut self, api_base: impl Into<String>) -> Self {
        self.api_base = api_base.into();
        self
    }

    /// Sets the bot token (sent as `Authorization: Bot <token>`).
    pub fn with_token(mut self, token: impl Into<String>) -> Self {
        self.token = Some(token.into());
        self
    }

    /// Sets the request timeout duration.
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }
}

impl Default for RestConfig {
    fn default() -> Self {
        Self::new()
    }
}
