//! Error types for the phrase service.
//!
//! [`ApiError`] is what handlers return. It renders as status 500 with a
//! `{"error": "<message>"}` body. Depletion never reaches this type; it is a
//! regular 410 response.

use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde::Serialize;

#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    /// The phrase store could not be read, parsed or written.
    #[error(transparent)]
    Pool(#[from] phrasepool::Error),

    /// The blocking task running the pool operation panicked or was
    /// cancelled.
    #[error("phrase task failed: {0}")]
    Join(#[from] tokio::task::JoinError),
}

#[derive(Serialize)]
pub struct ErrorBody {
    pub error: String,
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        tracing::error!(error = %self, "phrase request failed");

        (
            StatusCode::INTERNAL_SERVER_ERROR,
            Json(ErrorBody {
                error: self.to_string(),
            }),
        )
            .into_response()
    }
}
