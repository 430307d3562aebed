use std::sync::Arc;

use crate::llm_client::CompletionBackend;

/// Shared application state injected into all route handlers via Axum
/// extractors. Requests share no mutable state.
#[derive(Clone)]
pub struct AppState {
    /// Completion backend behind a trait object so tests can stub the
    /// upstream call.
    pub backend: Arc<dyn CompletionBackend>,
}
