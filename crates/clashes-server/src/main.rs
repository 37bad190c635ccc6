//! # clashes-server
//!
//! HTTP front for the Clashes GraphQL service.
//!
//! This binary provides:
//! - **`GET /clashes?term=`** returning the (optionally filtered) clash list
//!   in a `{success, data, count}` envelope
//! - **`GET /clashes/:id`** for a single clash
//! - **`POST /clashes`** accepting the create form, redirecting to the new
//!   clash on success
//! - **`/health`** and **`/info`** for operators

mod api;
mod config;
mod error;

use std::sync::Arc;

use tracing::info;
use tracing_subscriber::EnvFilter;

use clashes_data::GraphqlClient;

use crate::api::AppState;
use crate::config::ServerConfig;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // -----------------------------------------------------------------------
    // 1. Initialize tracing (respects RUST_LOG env var)
    // -----------------------------------------------------------------------
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| {
                EnvFilter::new("info,clashes_server=debug,clashes_data=debug")
            }),
        )
        .init();

    info!("Starting Clashes server v{}", env!("CARGO_PKG_VERSION"));

    // -----------------------------------------------------------------------
    // 2. Load configuration
    // -----------------------------------------------------------------------
    let config = ServerConfig::from_env();
    info!(?config, "Loaded configuration");

    // -----------------------------------------------------------------------
    // 3. Build the GraphQL backend
    // -----------------------------------------------------------------------
    let backend = GraphqlClient::new(config.graphql_endpoint.clone())?;
    info!(endpoint = %backend.endpoint(), "GraphQL backend ready");

    let http_addr = config.http_addr;
    let app_state = AppState {
        backend: Arc::new(backend),
        config: Arc::new(config),
    };

    // -----------------------------------------------------------------------
    // 4. Run the HTTP server until it fails or Ctrl+C arrives
    // -----------------------------------------------------------------------
    tokio::select! {
        result = api::serve(app_state, http_addr) => {
            if let Err(e) = result {
                tracing::error!(error = %e, "HTTP server failed");
                return Err(e);
            }
        }
        _ = tokio::signal::ctrl_c() => {
            info!("Received Ctrl+C, shutting down");
        }
    }

    Ok(())
}
