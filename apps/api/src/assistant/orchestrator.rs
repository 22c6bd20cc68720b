//! Orchestrator — classify → extract → run, strictly in that order.
//!
//! Flow: classify() → extract() → run_task() → TaskResult.
//! No branching after classification, no loops, no retries across stages.

use tracing::{info, Instrument};
use uuid::Uuid;

use crate::assistant::extraction::extract;
use crate::assistant::record::TaskResult;
use crate::assistant::router::classify;
use crate::assistant::runner::run_task;
use crate::errors::{AppError, EMPTY_QUERY_MESSAGE};
use crate::llm_client::CompletionModel;

/// Handles one free-text request end to end.
pub async fn process(llm: &dyn CompletionModel, query: &str) -> Result<TaskResult, AppError> {
    if query.trim().is_empty() {
        return Err(AppError::Validation(EMPTY_QUERY_MESSAGE.to_string()));
    }

    let span = tracing::info_span!("process", request_id = %Uuid::new_v4());

    async {
        let kind = classify(llm, query).await;
        let record = extract(llm, kind, query).await?;
        let result = run_task(llm, &record).await?;
        info!("Request handled by {}", result.kind);
        Ok::<_, AppError>(result)
    }
    .instrument(span)
    .await
}
