//! Axum route handlers for the tailoring API.
//!
//! `/api/process` accepts either a JSON body or multipart form data; both
//! shapes funnel into `ProcessInput` and the pipeline never knows which one
//! arrived.

use axum::{
    extract::{multipart::MultipartError, FromRequest, Multipart, Query, Request, State},
    http::header,
    response::{IntoResponse, Response},
    Json,
};
use serde::Deserialize;
use tracing::warn;

use crate::errors::AppError;
use crate::jobs::JobPosting;
use crate::pipeline::orchestrator::{run_pipeline, ProcessInput, TailorResponse};
use crate::state::AppState;

// ────────────────────────────────────────────────────────────────────────────
// Request types
// ────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProcessRequest {
    #[serde(default)]
    pub resume_text: Option<String>,
    #[serde(default)]
    pub job_description: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct SearchJobsParams {
    #[serde(default)]
    pub query: Option<String>,
    #[serde(default)]
    pub page: Option<String>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GeneratePdfRequest {
    #[serde(default)]
    pub html_content: String,
}

// ────────────────────────────────────────────────────────────────────────────
// Handlers
// ────────────────────────────────────────────────────────────────────────────

/// POST /api/process
///
/// Runs the full tailoring pipeline. The body is either JSON
/// (`{resumeText?, jobDescription}`) or multipart form data with an
/// optional `resumeFile` PDF upload.
pub async fn handle_process(
    State(state): State<AppState>,
    req: Request,
) -> Result<Json<TailorResponse>, AppError> {
    let input = read_process_input(req).await?;

    let response = run_pipeline(
        state.text_extractor.as_ref(),
        state.model.as_ref(),
        state.job_search.as_ref(),
        input,
    )
    .await?;

    Ok(Json(response))
}

/// GET /api/search-jobs?query=...&page=...
///
/// Fetches one page of postings for exactly the given query; nothing is
/// re-derived here. A search failure returns an empty list, not an error.
pub async fn handle_search_jobs(
    State(state): State<AppState>,
    Query(params): Query<SearchJobsParams>,
) -> Result<Json<Vec<JobPosting>>, AppError> {
    let query = params.query.as_deref().map(str::trim).unwrap_or_default();
    let page = params.page.as_deref().map(str::trim).unwrap_or_default();

    if query.is_empty() || page.is_empty() {
        return Err(AppError::Validation(
            "Query and page are required.".to_string(),
        ));
    }

    let page: u32 = page
        .parse()
        .ok()
        .filter(|page| *page > 0)
        .ok_or_else(|| AppError::Validation("page must be a positive number".to_string()))?;

    let jobs = match state.job_search.search(query, page).await {
        Ok(jobs) => jobs,
        Err(e) => {
            warn!(error = %e, "job search failed, returning an empty page");
            Vec::new()
        }
    };

    Ok(Json(jobs))
}

/// POST /api/generate-pdf
///
/// Renders caller-supplied HTML to a downloadable PDF.
pub async fn handle_generate_pdf(
    State(state): State<AppState>,
    Json(request): Json<GeneratePdfRequest>,
) -> Result<Response, AppError> {
    if request.html_content.trim().is_empty() {
        return Err(AppError::Validation("htmlContent is required.".to_string()));
    }

    let pdf = state.renderer.render_pdf(&request.html_content).await?;

    let headers = [
        (header::CONTENT_TYPE, "application/pdf"),
        (
            header::CONTENT_DISPOSITION,
            "attachment; filename=Tailored-Resume.pdf",
        ),
    ];

    Ok((headers, pdf).into_response())
}

// ────────────────────────────────────────────────────────────────────────────
// Body reading
// ────────────────────────────────────────────────────────────────────────────

/// Collapses either accepted body shape into a `ProcessInput`.
async fn read_process_input(req: Request) -> Result<ProcessInput, AppError> {
    let content_type = req
        .headers()
        .get(header::CONTENT_TYPE)
        .and_then(|value| value.to_str().ok())
        .unwrap_or_default();

    if content_type.starts_with("multipart/form-data") {
        let mut multipart = Multipart::from_request(req, &())
            .await
            .map_err(|e| AppError::Validation(format!("Invalid multipart body: {e}")))?;

        let mut input = ProcessInput::default();
        while let Some(field) = multipart.next_field().await.map_err(field_error)? {
            match field.name() {
                Some("jobDescription") => {
                    input.job_description = field.text().await.map_err(field_error)?;
                }
                Some("resumeText") => {
                    input.resume_text = Some(field.text().await.map_err(field_error)?);
                }
                Some("resumeFile") => {
                    input.resume_file = Some(field.bytes().await.map_err(field_error)?);
                }
                _ => {}
            }
        }

        Ok(input)
    } else {
        let Json(body) = Json::<ProcessRequest>::from_request(req, &())
            .await
            .map_err(|e| AppError::Validation(format!("Invalid JSON body: {e}")))?;

        Ok(ProcessInput {
            job_description: body.job_description.unwrap_or_default(),
            resume_text: body.resume_text,
            resume_file: None,
        })
    }
}

fn field_error(e: MultipartError) -> AppError {
    AppError::Validation(format!("Invalid multipart field: {e}"))
}
