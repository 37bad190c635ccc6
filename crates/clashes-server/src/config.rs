//! Server configuration loaded from environment variables.
//!
//! All settings have defaults so the server starts with zero configuration
//! against a GraphQL service on localhost.

use std::net::SocketAddr;

/// Server configuration.
#[derive(Debug, Clone)]
pub struct ServerConfig {
    /// Socket address for the HTTP (axum) server.
    /// Env: `HTTP_ADDR`
    /// Default: `0.0.0.0:8080`
    pub http_addr: SocketAddr,

    /// URL of the GraphQL service holding clash records.
    /// Env: `GRAPHQL_ENDPOINT`
    /// Default: `http://localhost:4000/graphql`
    pub graphql_endpoint: String,

    /// Human-readable name reported by `/info`.
    /// Env: `INSTANCE_NAME`
    pub instance_name: String,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            http_addr: ([0, 0, 0, 0], 8080).into(),
            graphql_endpoint: "http://localhost:4000/graphql".to_string(),
            instance_name: "Clashes".to_string(),
        }
    }
}

impl ServerConfig {
    /// Load configuration from environment variables, falling back to defaults.
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let mut config = Self::default();

        if let Some(addr) = lookup("HTTP_ADDR") {
            if let Ok(parsed) = addr.parse::<SocketAddr>() {
                config.http_addr = parsed;
            } else {
                tracing::warn!(value = %addr, "Invalid HTTP_ADDR, using default");
            }
        }

        if let Some(endpoint) = lookup("GRAPHQL_ENDPOINT") {
            match url::Url::parse(&endpoint) {
                Ok(_) => config.graphql_endpoint = endpoint,
                Err(e) => {
                    tracing::warn!(
                        value = %endpoint,
                        error = %e,
                        "Invalid GRAPHQL_ENDPOINT, using default"
                    );
                }
            }
        }

        if let Some(name) = lookup("INSTANCE_NAME") {
            if !name.trim().is_empty() {
                config.instance_name = name;
            }
        }

        // RUST_LOG is read by tracing-subscriber's EnvFilter directly.

        config
    }

    /// Host part of the GraphQL endpoint, for display.
    pub fn graphql_host(&self) -> Option<String> {
        url::Url::parse(&self.graphql_endpoint)
            .ok()
            .and_then(|u| u.host_str().map(str::to_string))
    }
}
