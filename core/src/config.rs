//! Client configuration from the environment.

use std::time::Duration;

use tracing::warn;

/// Default backend base URL.
pub const DEFAULT_API_URL: &str = "http://localhost:3000";

/// Default per-request timeout.
pub const DEFAULT_TIMEOUT_SECS: u64 = 30;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClientConfig {
    pub base_url: String,
    pub timeout: Duration,
}

impl ClientConfig {
    pub fn new(base_url: &str) -> Self {
        Self {
            base_url: base_url.to_string(),
            timeout: Duration::from_secs(DEFAULT_TIMEOUT_SECS),
        }
    }

    /// Create config from environment variables.
    ///
    /// Uses `RID_API_URL` and `RID_API_TIMEOUT_SECS`, falling back to defaults
    /// if not set.
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let base_url = lookup("RID_API_URL").unwrap_or_else(|| DEFAULT_API_URL.to_string());
        let timeout_secs = match lookup("RID_API_TIMEOUT_SECS") {
            None => DEFAULT_TIMEOUT_SECS,
            Some(raw) => raw.trim().parse().unwrap_or_else(|_| {
                warn!(value = %raw, "invalid RID_API_TIMEOUT_SECS, using default");
                DEFAULT_TIMEOUT_SECS
            }),
        };
        Self {
            base_url,
            timeout: Duration::from_secs(timeout_secs),
        }
    }
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self::new(DEFAULT_API_URL)
    }
}
