use std::sync::Arc;

use crate::config::Config;
use crate::llm_client::TextGenerator;
use crate::store::DocumentStore;

/// Shared application state injected into all route handlers via Axum extractors.
#[derive(Clone)]
pub struct AppState {
    pub config: Config,
    /// `None` when no API key is configured.
    pub llm: Option<Arc<dyn TextGenerator>>,
    /// Current upload and structured document. In-memory or file-backed per `STORE_DIR`.
    pub store: Arc<dyn DocumentStore>,
}
