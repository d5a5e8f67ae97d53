//! Client configuration.

use std::time::Duration;

/// Base URL used when none is configured.
pub const DEFAULT_BASE_URL: &str = "http://localhost:4000/api";

/// Connection settings for [`InventoryClient`](crate::InventoryClient).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClientConfig {
    /// Service root; endpoint paths such as `/inventory/stock` are appended.
    pub base_url: String,
    /// Per-request timeout. `None` waits for the transport.
    pub timeout: Option<Duration>,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self::new(DEFAULT_BASE_URL)
    }
}

impl ClientConfig {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            timeout: None,
        }
    }

    /// Set the per-request timeout.
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    /// Join the base URL and an endpoint path.
    pub fn url(&self, path: &str) -> String {
        format!(
            "{}/{}",
            self.base_url.trim_end_matches('/'),
            path.trim_start_matches('/')
        )
    }
}
