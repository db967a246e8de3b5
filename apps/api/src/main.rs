mod analysis;
mod config;
mod errors;
mod extraction;
mod ingest;
mod lint;
mod llm_client;
mod resumes;
mod routes;
mod state;
mod store;

use anyhow::Result;
use std::net::SocketAddr;
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use std::sync::Arc;

use crate::config::Config;
use crate::llm_client::{LlmClient, TextGenerator};
use crate::routes::build_router;
use crate::state::AppState;
use crate::store::{DocumentStore, FileDocumentStore, InMemoryDocumentStore};

#[tokio::main]
async fn main() -> Result<()> {
    let config = Config::from_env()?;

    // Initialize structured logging
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| {
            EnvFilter::new(format!("{}={}", env!("CARGO_CRATE_NAME"), &config.rust_log))
        }))
        .with(tracing_subscriber::fmt::layer())
        .init();

    info!("Starting Mentorly API v{}", env!("CARGO_PKG_VERSION"));

    // Current-resume store
    let store: Arc<dyn DocumentStore> = match &config.store_dir {
        Some(dir) => {
            let store = FileDocumentStore::new(dir)?;
            info!("Document store at {}", store.dir().display());
            Arc::new(store)
        }
        None => {
            info!("Document store in memory (STORE_DIR unset)");
            Arc::new(InMemoryDocumentStore::default())
        }
    };

    // Analysis backend
    let llm: Option<Arc<dyn TextGenerator>> = match &config.anthropic_api_key {
        Some(key) => {
            let client = LlmClient::new(key.clone())?;
            info!("LLM client initialized (model: {})", llm_client::MODEL);
            Some(Arc::new(client))
        }
        None => {
            info!("ANTHROPIC_API_KEY unset; analysis serves the local fallback");
            None
        }
    };

    let state = AppState {
        config: config.clone(),
        llm,
        store,
    };

    let app = build_router(state)
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive()); // TODO: restrict origins once the web client has a fixed host

    let addr: SocketAddr = format!("0.0.0.0:{}", config.port).parse()?;
    info!("Listening on {addr}");

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
