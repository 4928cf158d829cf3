//! Resume text extraction from uploaded files.
//!
//! Parsing a PDF is CPU-bound, so the production extractor runs it inside
//! `tokio::task::spawn_blocking` to keep the async executor free.

use async_trait::async_trait;
use bytes::Bytes;
use thiserror::Error;
use tracing::debug;

#[derive(Debug, Error)]
pub enum ExtractError {
    #[error("Failed to extract text from PDF: {0}")]
    Pdf(String),

    #[error("spawn_blocking failed in PDF extraction: {0}")]
    Task(String),
}

/// Extraction seam. `AppState` carries this as `Arc<dyn TextExtractor>` so
/// pipeline tests can supply canned text without real PDF bytes.
#[async_trait]
pub trait TextExtractor: Send + Sync {
    async fn extract(&self, data: Bytes) -> Result<String, ExtractError>;
}

/// Production extractor over `pdf_extract`, reading from memory. Uploads are
/// never written to disk.
pub struct PdfTextExtractor;

#[async_trait]
impl TextExtractor for PdfTextExtractor {
    async fn extract(&self, data: Bytes) -> Result<String, ExtractError> {
        let byte_count = data.len();

        let text = tokio::task::spawn_blocking(move || pdf_extract::extract_text_from_mem(&data))
            .await
            .map_err(|e| ExtractError::Task(e.to_string()))?
            .map_err(|e| ExtractError::Pdf(e.to_string()))?;

        debug!(
            "Extracted {} chars of text from a {} byte PDF",
            text.len(),
            byte_count
        );

        Ok(text)
    }
}
