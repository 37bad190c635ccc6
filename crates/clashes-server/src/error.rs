use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use thiserror::Error;

use clashes_shared::constants::FETCH_FAILED_MESSAGE;
use clashes_shared::{ClashError, Envelope};

#[derive(Debug, Error)]
pub enum ServerError {
    #[error(transparent)]
    Clash(#[from] ClashError),

    #[error("Invalid request: {0}")]
    BadRequest(String),
}

impl IntoResponse for ServerError {
    fn into_response(self) -> Response {
        let message = self.to_string();
        let (status, error) = match &self {
            ServerError::Clash(ClashError::FetchFailed) => {
                (StatusCode::INTERNAL_SERVER_ERROR, FETCH_FAILED_MESSAGE)
            }
            ServerError::Clash(ClashError::NotFound(_)) => {
                (StatusCode::NOT_FOUND, "Clash not found")
            }
            ServerError::Clash(ClashError::Validation(_)) => {
                (StatusCode::UNPROCESSABLE_ENTITY, "Invalid clash input")
            }
            ServerError::Clash(ClashError::MutationFailed) => {
                (StatusCode::INTERNAL_SERVER_ERROR, "Failed to create clash")
            }
            ServerError::BadRequest(_) => (StatusCode::BAD_REQUEST, "Invalid request"),
        };

        let body: Envelope<serde_json::Value> = Envelope::failure(error, message);
        (status, Json(body)).into_response()
    }
}
