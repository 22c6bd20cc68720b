// Job assistant core: routing, extraction and the five prompt-driven tasks.
// All model calls go through llm_client::CompletionModel.

pub mod extraction;
pub mod orchestrator;
pub mod prompts;
pub mod record;
pub mod router;
pub mod runner;
pub mod task;
