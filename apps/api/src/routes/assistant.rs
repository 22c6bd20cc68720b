use axum::{extract::rejection::JsonRejection, extract::State, Json};
use serde::Serialize;
use serde_json::{Map, Value};

use crate::assistant::orchestrator::process;
use crate::assistant::task::TaskKind;
use crate::errors::AppError;
use crate::routes::require_body;
use crate::state::AppState;

#[derive(Debug, Serialize)]
pub struct AssistantResponse {
    pub response: String,
    /// Task the request was routed to. Tells the caller whether `response` is HTML.
    pub task: TaskKind,
}

/// POST /api/assistant
///
/// Free-text entry point: classify, extract, then run the chosen task.
pub async fn handle_assistant(
    State(state): State<AppState>,
    payload: Result<Json<Map<String, Value>>, JsonRejection>,
) -> Result<Json<AssistantResponse>, AppError> {
    let body = require_body(payload)?;
    let query = body.get("query").and_then(Value::as_str).unwrap_or_default();

    let result = process(state.llm.as_ref(), query).await?;

    Ok(Json(AssistantResponse {
        response: result.text,
        task: result.kind,
    }))
}
