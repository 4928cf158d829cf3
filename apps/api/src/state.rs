use std::sync::Arc;

use crate::extract::TextExtractor;
use crate::jobs::JobSearchClient;
use crate::llm_client::ModelClient;
use crate::render::HtmlRenderer;

/// Shared application state injected into all route handlers via Axum
/// extractors. Every external collaborator sits behind a trait object so
/// tests can swap in doubles. Config is consumed at startup when the
/// collaborators are built; handlers never need it.
#[derive(Clone)]
pub struct AppState {
    pub model: Arc<dyn ModelClient>,
    pub text_extractor: Arc<dyn TextExtractor>,
    pub job_search: Arc<dyn JobSearchClient>,
    pub renderer: Arc<dyn HtmlRenderer>,
}
