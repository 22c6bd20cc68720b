//! Generic task handler: fill the task template, call the model once, return its text.

use tracing::info;

use crate::assistant::prompts::{fill_template, JOB_CONTEXT_PREFIX};
use crate::assistant::record::{ExtractedRecord, TaskResult};
use crate::assistant::task::TaskKind;
use crate::llm_client::{CompletionModel, LlmError, TASK_TEMPERATURE};

/// Runs the task `record` was built for. The model's answer is not validated or
/// post-processed, whatever the task's output genre.
pub async fn run_task(
    llm: &dyn CompletionModel,
    record: &ExtractedRecord,
) -> Result<TaskResult, LlmError> {
    let spec = record.kind.spec();
    let prompt = render_prompt(record);

    let text = llm.complete(&prompt, TASK_TEMPERATURE).await?;
    info!(
        "Task {} answered: genre={:?}, chars={}",
        spec.kind,
        spec.genre,
        text.chars().count()
    );

    Ok(TaskResult {
        kind: record.kind,
        text,
    })
}

/// Formats the task template with the record's fields.
pub fn render_prompt(record: &ExtractedRecord) -> String {
    let mut values: Vec<(&str, String)> = record
        .fields()
        .map(|(name, value)| (name, value.to_string()))
        .collect();

    if record.kind == TaskKind::EvaluateCv {
        let job_context = match record.get("job_description") {
            Some(jd) if !jd.is_empty() => format!("{JOB_CONTEXT_PREFIX}{jd}"),
            _ => String::new(),
        };
        values.push(("job_context", job_context));
    }

    fill_template(record.kind.spec().task_template, |name| {
        values
            .iter()
            .find(|(key, _)| *key == name)
            .map(|(_, value)| value.as_str())
    })
}
