//! Extractor stage: turns raw resume text into a structured `Resume`.

use crate::errors::AppError;
use crate::llm_client::ModelClient;
use crate::models::resume::Resume;
use crate::pipeline::coerce::coerce;
use crate::pipeline::prompts::{EXTRACTOR_PROMPT_TEMPLATE, EXTRACTOR_SYSTEM};
use crate::pipeline::template::PromptTemplate;

/// Extracts a structured `Resume` from raw text with a single model call.
pub async fn run_extractor(
    model: &dyn ModelClient,
    resume_text: &str,
) -> Result<Resume, AppError> {
    let prompt =
        PromptTemplate::compile(EXTRACTOR_PROMPT_TEMPLATE).render(&[("resume_text", resume_text)]);

    let raw = model
        .complete(&prompt, EXTRACTOR_SYSTEM)
        .await
        .map_err(|e| AppError::Llm(format!("Resume extraction failed: {e}")))?;

    Ok(coerce::<Resume>(&raw, "Resume")?)
}
