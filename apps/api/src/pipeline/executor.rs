//! Executor stage: rewrites the summary and experience sections per the
//! planner's rewrite plan.

use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::errors::AppError;
use crate::llm_client::ModelClient;
use crate::models::resume::{ExperienceEntry, Resume};
use crate::pipeline::coerce::{coerce, ParseError};
use crate::pipeline::prompts::{EXECUTOR_PROMPT_TEMPLATE, EXECUTOR_SYSTEM};
use crate::pipeline::template::PromptTemplate;

/// The executor's output: a rewritten summary plus one rewritten experience
/// entry per original position.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TailoredSections {
    #[serde(default)]
    pub tailored_summary: String,
    #[serde(default)]
    pub tailored_experience: Vec<ExperienceEntry>,
}

/// Rewrites `summary` and `experience` with a single model call.
///
/// The entry count must match the original resume exactly: assembling a
/// resume from a shorter or longer list would silently drop or duplicate
/// positions. An entry whose company or period drifts from the original at
/// the same index is logged but accepted, since models legitimately
/// normalize formatting.
pub async fn run_executor(
    model: &dyn ModelClient,
    resume: &Resume,
    rewrite_plan: &str,
) -> Result<TailoredSections, AppError> {
    let resume_json = serde_json::to_string_pretty(resume)
        .map_err(|e| AppError::Internal(anyhow::anyhow!("Failed to serialize resume: {e}")))?;

    let prompt = PromptTemplate::compile(EXECUTOR_PROMPT_TEMPLATE).render(&[
        ("resume_json", &resume_json),
        ("rewrite_plan", rewrite_plan),
    ]);

    let raw = model
        .complete(&prompt, EXECUTOR_SYSTEM)
        .await
        .map_err(|e| AppError::Llm(format!("Resume rewrite failed: {e}")))?;

    let sections: TailoredSections = coerce(&raw, "TailoredSections")?;

    if sections.tailored_experience.len() != resume.experience.len() {
        return Err(ParseError::Contract {
            stage: "executor",
            reason: format!(
                "tailoredExperience has {} entries, the original resume has {}",
                sections.tailored_experience.len(),
                resume.experience.len()
            ),
        }
        .into());
    }

    for (index, (tailored, original)) in sections
        .tailored_experience
        .iter()
        .zip(&resume.experience)
        .enumerate()
    {
        if tailored.company != original.company || tailored.period != original.period {
            warn!(
                index,
                "tailored entry drifted from the original (company {:?} -> {:?}, period {:?} -> {:?})",
                original.company,
                tailored.company,
                original.period,
                tailored.period
            );
        }
    }

    Ok(sections)
}
