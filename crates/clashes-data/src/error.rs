use thiserror::Error;

/// Failures talking to the clash backend.
///
/// These carry the real cause for logging; actions translate them into the
/// generic `ClashError` variants before anything reaches a user.
#[derive(Error, Debug)]
pub enum BackendError {
    /// Connection, TLS or body-read failure.
    #[error("HTTP transport error: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("GraphQL endpoint answered {0}")]
    Status(u16),

    /// The response carried a non-empty `errors` array.
    #[error("GraphQL error: {0}")]
    Graphql(String),

    #[error("GraphQL response had no data")]
    MissingData,

    #[error("Decode error: {0}")]
    Decode(#[from] serde_json::Error),

    /// Raised by test doubles.
    #[error("Backend unavailable: {0}")]
    Unavailable(String),
}

pub type Result<T> = std::result::Result<T, BackendError>;
