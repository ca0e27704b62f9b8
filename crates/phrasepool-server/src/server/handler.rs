//! HTTP surface of the phrase service.
//!
//! ## Routes
//!
//! - `POST /api/next-phrase`: issues one phrase.
//!   - `200 {"phrase": "<string>"}` on success
//!   - `410` with an empty body once the store is depleted
//!   - `500 {"error": "<message>"}` when the store cannot be used
//! - `GET /health`: liveness probe, always `200 ok`.
//!
//! Pool operations touch the filesystem, so they run on Tokio's blocking
//! thread pool.

use crate::server::{error::ApiError, state::AppState};
use axum::{
    Json, Router,
    extract::State,
    http::{Method, StatusCode, header::CONTENT_TYPE},
    response::{IntoResponse, Response},
    routing::{get, post},
};
use phrasepool::IssueStatus;
use serde::{Deserialize, Serialize};
use tower_http::cors::{Any, CorsLayer};

pub const NEXT_PHRASE_PATH: &str = "/api/next-phrase";
pub const HEALTH_PATH: &str = "/health";

#[derive(Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct PhraseBody {
    pub phrase: String,
}

/// Builds the application router over `state`.
pub fn router(state: AppState) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods([Method::GET, Method::POST, Method::OPTIONS])
        .allow_headers([CONTENT_TYPE]);

    Router::new()
        .route(NEXT_PHRASE_PATH, post(next_phrase_handler))
        .route(HEALTH_PATH, get(health_handler))
        .layer(cors)
        .with_state(state)
}

#[tracing::instrument(skip_all)]
pub async fn next_phrase_handler(State(state): State<AppState>) -> Result<Response, ApiError> {
    let pool = state.pool.clone();
    let status = tokio::task::spawn_blocking(move || pool.lock().issue_next()).await??;

    match status {
        IssueStatus::Ready { phrase } => {
            tracing::info!(%phrase, "issued phrase");
            Ok(Json(PhraseBody { phrase }).into_response())
        }
        IssueStatus::Depleted => {
            tracing::info!("phrase store depleted");
            Ok(StatusCode::GONE.into_response())
        }
    }
}

pub async fn health_handler() -> &'static str {
    "ok"
}
