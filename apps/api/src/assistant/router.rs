//! Router — classifies a free-text query into one of the five tasks.

use tracing::{info, warn};

use crate::assistant::prompts::{fill_template, CLASSIFY_PROMPT};
use crate::assistant::task::TaskKind;
use crate::llm_client::{CompletionModel, CLASSIFY_TEMPERATURE};

/// Task chosen whenever classification does not yield a known identifier.
pub const FALLBACK_TASK: TaskKind = TaskKind::FindJobs;

/// One model call, no retry. Never fails: a gateway error and an unrecognized
/// answer both resolve to `FALLBACK_TASK`.
pub async fn classify(llm: &dyn CompletionModel, query: &str) -> TaskKind {
    let prompt = fill_template(CLASSIFY_PROMPT, |name| (name == "query").then_some(query));

    match llm.complete(&prompt, CLASSIFY_TEMPERATURE).await {
        Ok(answer) => {
            let kind = resolve_task(&answer);
            info!("Router: classified {:?} as {}", answer.trim(), kind);
            kind
        }
        Err(e) => {
            warn!("Router: classification call failed ({e}); falling back to {FALLBACK_TASK}");
            FALLBACK_TASK
        }
    }
}

/// Trims and lowercases the model's answer, then matches it literally.
pub fn resolve_task(answer: &str) -> TaskKind {
    let normalized = answer.trim().to_lowercase();
    TaskKind::from_id(&normalized).unwrap_or_else(|| {
        if !normalized.is_empty() {
            warn!("Router: unrecognized task {normalized:?}; falling back to {FALLBACK_TASK}");
        }
        FALLBACK_TASK
    })
}
