pub mod health;

use axum::{
    extract::DefaultBodyLimit,
    routing::{get, post},
    Router,
};

use crate::resumes::handlers;
use crate::state::AppState;

/// Room for multipart boundaries and headers on top of the file itself.
const MULTIPART_OVERHEAD: usize = 64 * 1024;

pub fn build_router(state: AppState) -> Router {
    let body_limit = state.config.max_upload_bytes + MULTIPART_OVERHEAD;

    Router::new()
        .route("/health", get(health::health_handler))
        .route("/api/v1/resumes/extract", post(handlers::handle_extract))
        .route("/api/v1/resumes/reflow", post(handlers::handle_reflow))
        .route("/api/v1/resumes/lint", post(handlers::handle_lint))
        .route("/api/v1/resumes/upload", post(handlers::handle_upload))
        .route(
            "/api/v1/resumes/current",
            get(handlers::handle_get_current)
                .put(handlers::handle_put_current)
                .delete(handlers::handle_delete_current),
        )
        .route("/api/v1/resumes/analyze", post(handlers::handle_analyze))
        .layer(DefaultBodyLimit::max(body_limit))
        .with_state(state)
}
