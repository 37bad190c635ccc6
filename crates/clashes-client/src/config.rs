//! Client configuration loaded from environment variables.

use std::time::Duration;

use clashes_shared::constants::DEFAULT_DEBOUNCE_MS;

#[derive(Debug, Clone)]
pub struct ClientConfig {
    /// Origin of the Clashes HTTP server.
    /// Env: `CLASHES_API_URL`
    /// Default: `http://localhost:8080`
    pub api_url: String,

    /// Quiet period before a keystroke triggers a search.
    /// Env: `CLASHES_DEBOUNCE_MS`
    /// Default: 300 ms
    pub debounce: Duration,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            api_url: "http://localhost:8080".to_string(),
            debounce: Duration::from_millis(DEFAULT_DEBOUNCE_MS),
        }
    }
}

impl ClientConfig {
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let mut config = Self::default();

        if let Some(url) = lookup("CLASHES_API_URL") {
            if url::Url::parse(&url).is_ok() {
                config.api_url = url;
            } else {
                tracing::warn!(value = %url, "Invalid CLASHES_API_URL, using default");
            }
        }

        if let Some(val) = lookup("CLASHES_DEBOUNCE_MS") {
            match val.parse::<u64>() {
                Ok(ms) => config.debounce = Duration::from_millis(ms),
                Err(_) => {
                    tracing::warn!(value = %val, "Invalid CLASHES_DEBOUNCE_MS, using default");
                }
            }
        }

        config
    }
}
