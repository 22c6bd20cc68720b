//! Direct task endpoints. These skip routing and extraction and feed the
//! caller's fields straight into the task template.

use axum::{extract::rejection::JsonRejection, extract::State, Json};
use serde_json::{Map, Value};
use tracing::info;

use crate::assistant::extraction::record_from_request;
use crate::assistant::runner::run_task;
use crate::assistant::task::TaskKind;
use crate::errors::AppError;
use crate::routes::require_body;
use crate::state::AppState;

type Payload = Result<Json<Map<String, Value>>, JsonRejection>;

/// POST /api/tim-viec → `{"result": ...}`
pub async fn handle_find_jobs(
    State(state): State<AppState>,
    payload: Payload,
) -> Result<Json<Value>, AppError> {
    run_direct(&state, TaskKind::FindJobs, payload).await
}

/// POST /api/viet-email → `{"email": ...}`
pub async fn handle_write_email(
    State(state): State<AppState>,
    payload: Payload,
) -> Result<Json<Value>, AppError> {
    run_direct(&state, TaskKind::WriteEmail, payload).await
}

/// POST /api/danh-gia-cv → `{"evaluation": ...}`
pub async fn handle_evaluate_cv(
    State(state): State<AppState>,
    payload: Payload,
) -> Result<Json<Value>, AppError> {
    run_direct(&state, TaskKind::EvaluateCv, payload).await
}

/// POST /api/thong-ke-cong-ty → `{"companies": ...}`
pub async fn handle_find_companies(
    State(state): State<AppState>,
    payload: Payload,
) -> Result<Json<Value>, AppError> {
    run_direct(&state, TaskKind::FindCompanies, payload).await
}

/// POST /api/tao-cv → `{"cv": ...}`
pub async fn handle_create_cv(
    State(state): State<AppState>,
    payload: Payload,
) -> Result<Json<Value>, AppError> {
    run_direct(&state, TaskKind::CreateCv, payload).await
}

async fn run_direct(
    state: &AppState,
    kind: TaskKind,
    payload: Payload,
) -> Result<Json<Value>, AppError> {
    let body = require_body(payload)?;
    let spec = kind.spec();
    info!("Direct request for {kind}");

    let record = record_from_request(spec, &body);
    let result = run_task(state.llm.as_ref(), &record).await?;

    let mut response = Map::new();
    response.insert(spec.response_key.to_string(), Value::String(result.text));
    Ok(Json(Value::Object(response)))
}
