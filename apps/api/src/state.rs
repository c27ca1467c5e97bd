use std::sync::Arc;

use crate::generation::orchestrator::Pipeline;

/// Shared application state injected into all route handlers via Axum extractors.
#[derive(Clone)]
pub struct AppState {
    /// The wired generation pipeline: stores, LLM gateway, template registry.
    pub pipeline: Arc<Pipeline>,
}
