use std::sync::Arc;

use chrono::{DateTime, Utc};

use crate::llm_client::CompletionModel;

/// Shared application state injected into all route handlers via Axum extractors.
#[derive(Clone)]
pub struct AppState {
    /// Model Gateway. Production: `LlmClient`; tests swap in a stub.
    pub llm: Arc<dyn CompletionModel>,
    pub started_at: DateTime<Utc>,
}
