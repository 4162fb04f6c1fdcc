use crate::config::Config;
use crate::llm_client::GeminiClient;

/// Shared application state injected into all route handlers via Axum extractors.
/// Immutable after startup.
#[derive(Clone)]
pub struct AppState {
    pub llm: GeminiClient,
    pub config: Config,
}
