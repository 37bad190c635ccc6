//! Where the hook loads clashes from.
//!
//! [`HttpSource`] goes through the REST accessor; [`DirectSource`] calls the
//! filter action in-process against a [`ClashBackend`].

use std::sync::Arc;

use async_trait::async_trait;
use tracing::debug;
use url::Url;

use clashes_data::{actions, ClashBackend};
use clashes_shared::constants::{CLASHES_PATH, GENERIC_ERROR_MESSAGE, TERM_PARAM};
use clashes_shared::{Clash, Envelope};

use crate::error::ClientError;

#[async_trait]
pub trait ClashSource: Send + Sync {
    async fn load(&self, term: &str) -> Result<Vec<Clash>, ClientError>;
}

/// Loads clashes from `GET /clashes` on the Clashes server.
#[derive(Debug, Clone)]
pub struct HttpSource {
    http: reqwest::Client,
    clashes_url: Url,
}

impl HttpSource {
    /// `base_url` is the server origin, e.g. `http://localhost:8080`.
    pub fn new(base_url: &str) -> Result<Self, ClientError> {
        let clashes_url = Url::parse(base_url)?.join(CLASHES_PATH)?;
        Ok(Self {
            http: reqwest::Client::new(),
            clashes_url,
        })
    }

    pub fn clashes_url(&self) -> &Url {
        &self.clashes_url
    }
}

#[async_trait]
impl ClashSource for HttpSource {
    async fn load(&self, term: &str) -> Result<Vec<Clash>, ClientError> {
        let mut request = self.http.get(self.clashes_url.clone());
        let term = term.trim();
        if !term.is_empty() {
            request = request.query(&[(TERM_PARAM, term)]);
        }

        let resp = request.send().await?;
        let status = resp.status();
        if !status.is_success() {
            return Err(ClientError::Status(status.as_u16()));
        }

        let envelope: Envelope<Vec<Clash>> = resp.json().await?;
        if !envelope.success {
            let message = envelope
                .message
                .filter(|m| !m.is_empty())
                .unwrap_or_else(|| GENERIC_ERROR_MESSAGE.to_string());
            return Err(ClientError::Envelope(message));
        }

        let clashes = envelope.data.unwrap_or_default();
        debug!(term, count = clashes.len(), "Loaded clashes over HTTP");
        Ok(clashes)
    }
}

/// Calls the filter action directly, skipping the REST hop.
#[derive(Clone)]
pub struct DirectSource {
    backend: Arc<dyn ClashBackend>,
}

impl DirectSource {
    pub fn new(backend: Arc<dyn ClashBackend>) -> Self {
        Self { backend }
    }
}

#[async_trait]
impl ClashSource for DirectSource {
    async fn load(&self, term: &str) -> Result<Vec<Clash>, ClientError> {
        Ok(actions::filter_clashes(self.backend.as_ref(), term).await?)
    }
}
