pub mod health;

use axum::{
    extract::DefaultBodyLimit,
    routing::{get, post},
    Router,
};

use crate::pipeline::handlers;
use crate::state::AppState;

/// Request bodies are capped at 10 MiB. Covers resume PDFs and the HTML
/// documents sent for rendering.
const MAX_BODY_BYTES: usize = 10 * 1024 * 1024;

pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health::health_handler))
        .route("/api/process", post(handlers::handle_process))
        .route("/api/search-jobs", get(handlers::handle_search_jobs))
        .route("/api/generate-pdf", post(handlers::handle_generate_pdf))
        .layer(DefaultBodyLimit::max(MAX_BODY_BYTES))
        .with_state(state)
}
