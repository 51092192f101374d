use std::sync::Arc;

use crate::config::Config;
use crate::llm_client::TextGenerator;
use crate::render::FontAsset;

/// Shared application state injected into all route handlers via Axum extractors.
/// Built once at startup; read-only afterwards.
#[derive(Clone)]
pub struct AppState {
    /// Pluggable text generator. Production: `LlmClient`. Tests swap in a mock.
    pub generator: Arc<dyn TextGenerator>,
    /// Font embedded in every PDF, loaded and validated at startup.
    pub font: FontAsset,
    pub config: Arc<Config>,
}
