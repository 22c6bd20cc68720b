pub mod assistant;
pub mod health;
pub mod tasks;

use axum::{
    extract::rejection::JsonRejection,
    routing::{get, post},
    Json, Router,
};
use serde_json::{Map, Value};
use tracing::debug;

use crate::errors::{AppError, EMPTY_BODY_MESSAGE};
use crate::state::AppState;

pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health::health_handler))
        // Free-text assistant (router → extraction → task)
        .route("/api/assistant", post(assistant::handle_assistant))
        // Direct task endpoints
        .route("/api/tim-viec", post(tasks::handle_find_jobs))
        .route("/api/viet-email", post(tasks::handle_write_email))
        .route("/api/danh-gia-cv", post(tasks::handle_evaluate_cv))
        .route("/api/thong-ke-cong-ty", post(tasks::handle_find_companies))
        .route("/api/tao-cv", post(tasks::handle_create_cv))
        .with_state(state)
}

/// Missing, malformed and empty JSON bodies are all rejected with the same message.
pub(crate) fn require_body(
    payload: Result<Json<Map<String, Value>>, JsonRejection>,
) -> Result<Map<String, Value>, AppError> {
    match payload {
        Ok(Json(body)) if !body.is_empty() => Ok(body),
        Ok(_) => Err(AppError::Validation(EMPTY_BODY_MESSAGE.to_string())),
        Err(rejection) => {
            debug!("Rejected request body: {rejection}");
            Err(AppError::Validation(EMPTY_BODY_MESSAGE.to_string()))
        }
    }
}
