use std::sync::Arc;

use crate::config::Config;
use crate::llm_client::LlmRouter;
use crate::quiz::bank::QuestionBank;

/// Shared application state injected into all route handlers via Axum extractors.
#[derive(Clone)]
pub struct AppState {
    /// Read-only after startup.
    pub bank: Arc<QuestionBank>,
    /// Providers without an API key are simply absent.
    pub llm: LlmRouter,
    pub config: Config,
}
