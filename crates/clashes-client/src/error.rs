use thiserror::Error;

use clashes_shared::ClashError;

/// Failures while loading the clash list on the client.
#[derive(Error, Debug)]
pub enum ClientError {
    /// The accessor answered with a non-2xx status.
    #[error("Request failed with status {0}")]
    Status(u16),

    /// The accessor answered `success: false`.
    #[error("{0}")]
    Envelope(String),

    #[error("Network error: {0}")]
    Transport(#[from] reqwest::Error),

    /// Raised by the direct-integration source.
    #[error(transparent)]
    Clash(#[from] ClashError),

    #[error("Invalid API URL: {0}")]
    InvalidUrl(#[from] url::ParseError),
}
