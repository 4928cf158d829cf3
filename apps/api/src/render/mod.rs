//! HTML to PDF rendering through a headless-Chromium service.
//!
//! The production renderer speaks the browserless-style REST contract:
//! POST `{base}/pdf` with the HTML and print options, PDF bytes come back.
//! Rendering happens out of process so this service stays free of a browser
//! runtime.

use async_trait::async_trait;
use bytes::Bytes;
use reqwest::Client;
use serde::Serialize;
use thiserror::Error;
use tracing::debug;

/// Print options applied to every render. Matches the layout the frontend
/// previews: A4 with backgrounds and a 20px margin on all sides.
const PAGE_FORMAT: &str = "A4";
const PAGE_MARGIN: &str = "20px";

#[derive(Debug, Error)]
pub enum RenderError {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Renderer error (status {status}): {message}")]
    Api { status: u16, message: String },
}

/// Rendering seam. `AppState` carries this as `Arc<dyn HtmlRenderer>`.
#[async_trait]
pub trait HtmlRenderer: Send + Sync {
    /// Renders an HTML document to PDF bytes.
    async fn render_pdf(&self, html: &str) -> Result<Bytes, RenderError>;
}

#[derive(Debug, Serialize)]
struct RenderRequest<'a> {
    html: &'a str,
    options: PdfOptions<'a>,
}

#[derive(Debug, Serialize)]
struct PdfOptions<'a> {
    format: &'a str,
    #[serde(rename = "printBackground")]
    print_background: bool,
    margin: PageMargin<'a>,
}

#[derive(Debug, Serialize)]
struct PageMargin<'a> {
    top: &'a str,
    right: &'a str,
    bottom: &'a str,
    left: &'a str,
}

/// Production renderer client.
#[derive(Clone)]
pub struct ChromiumRenderer {
    client: Client,
    pdf_url: String,
}

impl ChromiumRenderer {
    /// `base_url` is the renderer service root, e.g. `http://chromium:3000`.
    pub fn new(base_url: &str) -> Self {
        Self {
            client: Client::builder()
                .timeout(std::time::Duration::from_secs(120))
                .build()
                .expect("Failed to build HTTP client"),
            pdf_url: format!("{}/pdf", base_url.trim_end_matches('/')),
        }
    }
}

#[async_trait]
impl HtmlRenderer for ChromiumRenderer {
    async fn render_pdf(&self, html: &str) -> Result<Bytes, RenderError> {
        let request_body = RenderRequest {
            html,
            options: PdfOptions {
                format: PAGE_FORMAT,
                print_background: true,
                margin: PageMargin {
                    top: PAGE_MARGIN,
                    right: PAGE_MARGIN,
                    bottom: PAGE_MARGIN,
                    left: PAGE_MARGIN,
                },
            },
        };

        let response = self
            .client
            .post(&self.pdf_url)
            .json(&request_body)
            .send()
            .await?;

        let status = response.status();

        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(RenderError::Api {
                status: status.as_u16(),
                message: body,
            });
        }

        let pdf = response.bytes().await?;
        debug!("Renderer produced a {} byte PDF", pdf.len());

        Ok(pdf)
    }
}
