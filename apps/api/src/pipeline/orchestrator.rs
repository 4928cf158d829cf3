//! Pipeline orchestration: validation, text extraction, the three model
//! stages, assembly, and job-search enrichment.
//!
//! Flow: validate → extract text (uploads only) → extractor → planner →
//!       executor → assemble tailored resume → derive query → job search.
//!
//! Stages run strictly in sequence and each makes exactly one model call;
//! any stage failure aborts the run. Job search is the lone exception: a
//! failed search degrades to an empty suggestion list because suggestions
//! are an enrichment, not the product.

use std::future::Future;
use std::time::Instant;

use bytes::Bytes;
use serde::Serialize;
use tracing::{error, info, warn};
use uuid::Uuid;

use crate::errors::AppError;
use crate::extract::TextExtractor;
use crate::jobs::{JobPosting, JobSearchClient};
use crate::llm_client::ModelClient;
use crate::models::resume::Resume;
use crate::pipeline::executor::run_executor;
use crate::pipeline::extractor::run_extractor;
use crate::pipeline::planner::run_planner;

/// Role used in the derived job query when the tailored resume has no
/// experience entries.
const FALLBACK_ROLE: &str = "Software Developer";
/// Max number of skills folded into the derived job query.
const QUERY_SKILL_COUNT: usize = 5;

// ────────────────────────────────────────────────────────────────────────────
// Input / output types
// ────────────────────────────────────────────────────────────────────────────

/// Raw, unvalidated input funneled out of the process handler. Both the
/// JSON and the multipart request shapes collapse into this.
#[derive(Debug, Default)]
pub struct ProcessInput {
    pub job_description: String,
    pub resume_text: Option<String>,
    pub resume_file: Option<Bytes>,
}

/// Skill analysis surfaced alongside the tailored resume. The rewrite plan
/// itself stays internal.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SkillAnalysis {
    pub extracted_skills: Vec<String>,
    pub skill_gap: Vec<String>,
}

/// Response envelope for a full tailoring run.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TailorResponse {
    pub tailored_resume: Resume,
    pub analysis: SkillAnalysis,
    pub suggested_jobs: Vec<JobPosting>,
    pub job_search_query: String,
}

// ────────────────────────────────────────────────────────────────────────────
// Pipeline
// ────────────────────────────────────────────────────────────────────────────

/// Runs the full tailoring pipeline.
///
/// Validation happens before any collaborator is touched: a request with no
/// job description or no resume source fails without spending a single
/// external call.
pub async fn run_pipeline(
    text_extractor: &dyn TextExtractor,
    model: &dyn ModelClient,
    job_search: &dyn JobSearchClient,
    input: ProcessInput,
) -> Result<TailorResponse, AppError> {
    let run_id = Uuid::new_v4();

    if input.job_description.trim().is_empty() {
        return Err(AppError::Validation(
            "Job description is required.".to_string(),
        ));
    }

    let has_text = input
        .resume_text
        .as_deref()
        .is_some_and(|text| !text.trim().is_empty());
    let has_file = input
        .resume_file
        .as_ref()
        .is_some_and(|data| !data.is_empty());

    if !has_text && !has_file {
        return Err(AppError::Validation("Resume is required.".to_string()));
    }

    info!(run_id = %run_id, from_file = has_file, "starting tailoring run");

    // An uploaded file wins over pasted text when both are present.
    let raw_text = match input.resume_file.filter(|data| !data.is_empty()) {
        Some(data) => {
            timed(run_id, "text_extraction", async {
                Ok(text_extractor.extract(data).await?)
            })
            .await?
        }
        None => input.resume_text.unwrap_or_default(),
    };

    let resume = timed(run_id, "extractor", run_extractor(model, &raw_text)).await?;
    let plan = timed(
        run_id,
        "planner",
        run_planner(model, &resume, &input.job_description),
    )
    .await?;
    let sections = timed(
        run_id,
        "executor",
        run_executor(model, &resume, &plan.rewrite_plan),
    )
    .await?;

    // Assembly: the extracted resume with summary and experience replaced.
    let mut tailored_resume = resume;
    tailored_resume.summary = sections.tailored_summary;
    tailored_resume.experience = sections.tailored_experience;

    let job_search_query = derive_job_query(&tailored_resume);
    let suggested_jobs = match job_search.search(&job_search_query, 1).await {
        Ok(jobs) => jobs,
        Err(e) => {
            warn!(run_id = %run_id, error = %e, "job search failed, responding without suggestions");
            Vec::new()
        }
    };

    info!(
        run_id = %run_id,
        suggested_jobs = suggested_jobs.len(),
        query = %job_search_query,
        "tailoring run completed"
    );

    Ok(TailorResponse {
        tailored_resume,
        analysis: SkillAnalysis {
            extracted_skills: plan.extracted_skills,
            skill_gap: plan.skill_gap,
        },
        suggested_jobs,
        job_search_query,
    })
}

/// Awaits one stage, logging its outcome and duration under the run id.
async fn timed<T>(
    run_id: Uuid,
    stage: &'static str,
    fut: impl Future<Output = Result<T, AppError>>,
) -> Result<T, AppError> {
    let started = Instant::now();
    match fut.await {
        Ok(value) => {
            info!(
                run_id = %run_id,
                stage,
                elapsed_ms = started.elapsed().as_millis() as u64,
                "stage completed"
            );
            Ok(value)
        }
        Err(e) => {
            error!(
                run_id = %run_id,
                stage,
                elapsed_ms = started.elapsed().as_millis() as u64,
                error = %e,
                "stage failed"
            );
            Err(e)
        }
    }
}

/// Builds the job-search query: the most recent role (or a generic
/// fallback) followed by up to five skills.
fn derive_job_query(resume: &Resume) -> String {
    let role = resume
        .experience
        .first()
        .map(|entry| entry.role.trim())
        .filter(|role| !role.is_empty())
        .unwrap_or(FALLBACK_ROLE);

    let skills = resume
        .skills
        .iter()
        .map(|skill| skill.trim())
        .filter(|skill| !skill.is_empty())
        .take(QUERY_SKILL_COUNT)
        .collect::<Vec<_>>()
        .join(", ");

    if skills.is_empty() {
        role.to_string()
    } else {
        format!("{role} {skills}")
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Tests
// ────────────────────────────────────────────────────────────────────────────
