//! Job description authoring: drafts a full posting from a handful of inputs.
//! Unlike the evaluation pipeline, failures here surface to the caller.

pub mod handlers;
pub mod prompts;

use serde::Deserialize;
use tracing::info;

use crate::config::PipelineSettings;
use crate::errors::AppError;
use crate::llm_client::prompts::HR_PROFESSIONAL;
use crate::llm_client::Inference;
use prompts::JOB_DESCRIPTION_PROMPT_TEMPLATE;

const NOT_SPECIFIED: &str = "Not specified";

#[derive(Debug, Clone, Deserialize)]
pub struct JobDescriptionRequest {
    pub job_title: String,
    pub years_of_experience: String,
    /// Comma-separated.
    pub must_have_skills: String,
    #[serde(default)]
    pub nice_to_have_skills: Option<String>,
    #[serde(default)]
    pub company_name: Option<String>,
    #[serde(default = "default_employment_type")]
    pub employment_type: String,
    #[serde(default)]
    pub industry: Option<String>,
    #[serde(default)]
    pub location: Option<String>,
    #[serde(default = "default_salary_range")]
    pub salary_range: String,
    #[serde(default)]
    pub remote_policy: Option<String>,
}

fn default_employment_type() -> String {
    "Full-time".to_string()
}

fn default_salary_range() -> String {
    "Competitive".to_string()
}

impl JobDescriptionRequest {
    pub fn validate(&self) -> Result<(), AppError> {
        if self.job_title.trim().is_empty() {
            return Err(AppError::Validation("job_title cannot be empty".to_string()));
        }
        if self.must_have_skills.trim().is_empty() {
            return Err(AppError::Validation(
                "must_have_skills cannot be empty".to_string(),
            ));
        }
        Ok(())
    }
}

fn or_not_specified(value: &Option<String>) -> &str {
    value
        .as_deref()
        .map(str::trim)
        .filter(|v| !v.is_empty())
        .unwrap_or(NOT_SPECIFIED)
}

fn build_prompt(request: &JobDescriptionRequest) -> String {
    JOB_DESCRIPTION_PROMPT_TEMPLATE
        .replace("{job_title}", request.job_title.trim())
        .replace("{years_of_experience}", request.years_of_experience.trim())
        .replace("{must_have_skills}", request.must_have_skills.trim())
        .replace("{nice_to_have_skills}", or_not_specified(&request.nice_to_have_skills))
        .replace("{company_name}", or_not_specified(&request.company_name))
        .replace("{employment_type}", &request.employment_type)
        .replace("{industry}", or_not_specified(&request.industry))
        .replace("{location}", or_not_specified(&request.location))
        .replace("{salary_range}", &request.salary_range)
        .replace("{remote_policy}", or_not_specified(&request.remote_policy))
}

/// Drafts a job description. Inference failures become `AppError::Llm`.
pub async fn generate_job_description(
    request: &JobDescriptionRequest,
    llm: &dyn Inference,
    settings: &PipelineSettings,
) -> Result<String, AppError> {
    info!("Generating job description for '{}'", request.job_title);

    let text = llm
        .infer(HR_PROFESSIONAL, &build_prompt(request), &settings.authoring)
        .await
        .map_err(|e| AppError::Llm(format!("Job description generation failed: {e}")))?;

    let text = text.trim();
    if text.is_empty() {
        return Err(AppError::Llm("Job description generation returned no text".to_string()));
    }
    Ok(text.to_string())
}
