use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;

use crate::llm_client::LlmError;

/// Message returned for any request whose body is missing or empty.
pub const EMPTY_BODY_MESSAGE: &str = "Không có dữ liệu được gửi lên";
/// Message returned when the assistant endpoint gets a blank query.
pub const EMPTY_QUERY_MESSAGE: &str = "Vui lòng nhập yêu cầu";
/// Message returned for every server-side failure. Causes are only logged.
pub const GENERIC_FAILURE_MESSAGE: &str = "Có lỗi xảy ra khi xử lý yêu cầu";

/// Application-level error type.
/// Implements `IntoResponse` so Axum handlers can return `Result<T, AppError>`.
#[derive(Debug, Error)]
pub enum AppError {
    #[error("Validation error: {0}")]
    Validation(String),

    #[error("LLM error: {0}")]
    Llm(#[from] LlmError),
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, code, message) = match &self {
            AppError::Validation(msg) => (StatusCode::BAD_REQUEST, "VALIDATION_ERROR", msg.clone()),
            AppError::Llm(e) => {
                tracing::error!("LLM error: {e}");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "LLM_ERROR",
                    GENERIC_FAILURE_MESSAGE.to_string(),
                )
            }
        };

        // `error` stays a plain string so existing callers keep working.
        let body = Json(json!({
            "error": message,
            "code": code
        }));

        (status, body).into_response()
    }
}
