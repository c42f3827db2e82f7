use std::sync::Arc;

use crate::analysis::operations::Analyzer;
use crate::llm_client::{CompletionBackend, CompletionClient};

/// Shared application state injected into all route handlers via Axum extractors.
///
/// Read-only after startup: nothing here is mutated per request.
#[derive(Clone)]
pub struct AppState {
    pub analyzer: Analyzer,
}

impl AppState {
    pub fn new(backend: Arc<dyn CompletionBackend>) -> Self {
        Self {
            analyzer: Analyzer::new(CompletionClient::new(backend)),
        }
    }
}
