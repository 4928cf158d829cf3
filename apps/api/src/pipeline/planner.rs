//! Planner stage: compares the resume against the job description and
//! produces the strategic tailoring plan the executor follows.

use serde::{Deserialize, Serialize};

use crate::errors::AppError;
use crate::llm_client::ModelClient;
use crate::models::resume::Resume;
use crate::pipeline::coerce::{coerce, ParseError};
use crate::pipeline::prompts::{PLANNER_PROMPT_TEMPLATE, PLANNER_SYSTEM};
use crate::pipeline::template::PromptTemplate;

/// The planner's output. `extracted_skills` and `skill_gap` feed the
/// analysis block of the response; `rewrite_plan` is internal and is handed
/// to the executor stage only.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StrategicPlan {
    #[serde(default)]
    pub extracted_skills: Vec<String>,
    #[serde(default)]
    pub skill_gap: Vec<String>,
    #[serde(default)]
    pub rewrite_plan: String,
}

/// Produces a `StrategicPlan` with a single model call.
///
/// A missing or blank `rewritePlan` is a contract violation: the executor
/// cannot run without it, so the pipeline aborts here rather than sending a
/// meaningless rewrite prompt.
pub async fn run_planner(
    model: &dyn ModelClient,
    resume: &Resume,
    job_description: &str,
) -> Result<StrategicPlan, AppError> {
    let resume_json = serde_json::to_string_pretty(resume)
        .map_err(|e| AppError::Internal(anyhow::anyhow!("Failed to serialize resume: {e}")))?;

    let prompt = PromptTemplate::compile(PLANNER_PROMPT_TEMPLATE).render(&[
        ("resume_json", &resume_json),
        ("job_description", job_description),
    ]);

    let raw = model
        .complete(&prompt, PLANNER_SYSTEM)
        .await
        .map_err(|e| AppError::Llm(format!("Tailoring plan failed: {e}")))?;

    let plan: StrategicPlan = coerce(&raw, "StrategicPlan")?;

    if plan.rewrite_plan.trim().is_empty() {
        return Err(ParseError::Contract {
            stage: "planner",
            reason: "rewritePlan is missing or empty".to_string(),
        }
        .into());
    }

    Ok(plan)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::llm_client::LlmError;
    use async_trait::async_trait;
    use std::sync::Mutex;

    struct FixedModel {
        response: String,
        prompts: Mutex<Vec<String>>,
    }

    impl FixedModel {
        fn new(response: &str) -> Self {
            Self {
                response: response.to_string(),
                prompts: Mutex::new(Vec::new()),
            }
        }
    }

    #[async_trait]
    impl ModelClient for FixedModel {
        async fn complete(&self, prompt: &str, _system: &str) -> Result<String, LlmError> {
            self.prompts.lock().unwrap().push(prompt.to_string());
            Ok(self.response.clone())
        }
    }

    fn sample_resume() -> Resume {
        serde_json::from_str(
            r#"{
                "name": "Jane Doe",
                "skills": ["Rust", "SQL"],
                "experience": [
                    {"company": "Acme", "role": "Engineer", "period": "2021", "description": []}
                ]
            }"#,
        )
        .unwrap()
    }

    #[tokio::test]
    async fn test_planner_parses_plan() {
        let model = FixedModel::new(
            r#"{"extractedSkills": ["Rust", "Kubernetes"], "skillGap": ["Kubernetes"], "rewritePlan": "Lead with Rust systems work."}"#,
        );
        let plan = run_planner(&model, &sample_resume(), "Rust platform role")
            .await
            .unwrap();

        assert_eq!(plan.extracted_skills, vec!["Rust", "Kubernetes"]);
        assert_eq!(plan.skill_gap, vec!["Kubernetes"]);
        assert_eq!(plan.rewrite_plan, "Lead with Rust systems work.");
    }

    #[tokio::test]
    async fn test_planner_prompt_embeds_resume_and_job_description() {
        let model = FixedModel::new(
            r#"{"extractedSkills": [], "skillGap": [], "rewritePlan": "plan"}"#,
        );
        run_planner(&model, &sample_resume(), "UNIQUE JD MARKER")
            .await
            .unwrap();

        let prompts = model.prompts.lock().unwrap();
        assert!(prompts[0].contains("UNIQUE JD MARKER"));
        assert!(prompts[0].contains("\"Jane Doe\""));
    }

    #[tokio::test]
    async fn test_empty_rewrite_plan_is_a_contract_violation() {
        let model = FixedModel::new(
            r#"{"extractedSkills": ["Rust"], "skillGap": [], "rewritePlan": "   "}"#,
        );
        let result = run_planner(&model, &sample_resume(), "jd").await;

        match result {
            Err(AppError::ModelOutput(ParseError::Contract { stage, .. })) => {
                assert_eq!(stage, "planner");
            }
            other => panic!("expected contract violation, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn test_missing_rewrite_plan_key_is_a_contract_violation() {
        let model = FixedModel::new(r#"{"extractedSkills": ["Rust"], "skillGap": []}"#);
        let result = run_planner(&model, &sample_resume(), "jd").await;
        assert!(matches!(
            result,
            Err(AppError::ModelOutput(ParseError::Contract { .. }))
        ));
    }

    #[test]
    fn test_plan_serializes_camel_case() {
        let plan = StrategicPlan {
            extracted_skills: vec!["Rust".to_string()],
            skill_gap: vec![],
            rewrite_plan: "plan".to_string(),
        };
        let value = serde_json::to_value(&plan).unwrap();
        assert!(value.get("extractedSkills").is_some());
        assert!(value.get("skillGap").is_some());
        assert!(value.get("rewritePlan").is_some());
    }
}
