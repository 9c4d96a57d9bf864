//! Axum route handlers for the Evaluation API.

use std::collections::HashSet;

use axum::{
    extract::{Multipart, State},
    Json,
};
use serde::{Deserialize, Serialize};
use tracing::{info, warn};

use crate::documents::{extract_text_blocking, is_supported};
use crate::errors::AppError;
use crate::evaluation::matching::{ResumeSubmission, DEFAULT_POSITION};
use crate::evaluation::models::{
    EvaluationResult, MatchingResponse, OutcomeType, Rubric, ScoreSource,
};
use crate::state::AppState;

// ────────────────────────────────────────────────────────────────────────────
// Request / Response types
// ────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Deserialize)]
pub struct RubricRequest {
    pub jd_text: String,
}

#[derive(Debug, Deserialize)]
pub struct EvaluateRequest {
    pub resume_text: String,
    pub jd_text: String,
}

#[derive(Debug, Deserialize)]
pub struct ResumeInput {
    pub filename: String,
    pub text: String,
}

#[derive(Debug, Deserialize)]
pub struct MatchRequest {
    pub job_description: String,
    #[serde(default)]
    pub position: Option<String>,
    pub resumes: Vec<ResumeInput>,
}

/// Evaluation summary supplied by the caller when requesting a single email.
#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct EmailEvaluationInput {
    pub score: f64,
    pub remarks: String,
    pub interview_focus_areas: Vec<String>,
}

impl Default for EmailEvaluationInput {
    fn default() -> Self {
        Self {
            score: 80.0,
            remarks: "Strong candidate".to_string(),
            interview_focus_areas: Vec::new(),
        }
    }
}

impl From<EmailEvaluationInput> for EvaluationResult {
    fn from(input: EmailEvaluationInput) -> Self {
        EvaluationResult {
            score: input.score.clamp(0.0, 100.0),
            score_source: ScoreSource::Precomputed,
            missing_skills: Vec::new(),
            strength_areas: Vec::new(),
            red_flags: Vec::new(),
            cultural_fit_indicators: Vec::new(),
            experience_gap_analysis: None,
            interview_focus_areas: input.interview_focus_areas,
            remarks: input.remarks,
            recommendation: String::new(),
            criterion_scores: Vec::new(),
        }
    }
}

#[derive(Debug, Deserialize)]
pub struct EmailRequest {
    #[serde(default)]
    pub candidate_name: Option<String>,
    #[serde(default)]
    pub position: Option<String>,
    #[serde(default = "default_email_type")]
    pub email_type: OutcomeType,
    #[serde(default)]
    pub evaluation: EmailEvaluationInput,
}

fn default_email_type() -> OutcomeType {
    OutcomeType::Interview
}

#[derive(Debug, Serialize)]
pub struct EmailResponse {
    pub email_content: String,
}

// ────────────────────────────────────────────────────────────────────────────
// Handlers
// ────────────────────────────────────────────────────────────────────────────

/// POST /api/v1/rubric
///
/// Extracts the weighted rubric only. An unusable response yields the empty rubric.
pub async fn handle_extract_rubric(
    State(state): State<AppState>,
    Json(request): Json<RubricRequest>,
) -> Result<Json<Rubric>, AppError> {
    require_job_description(&request.jd_text)?;
    Ok(Json(state.pipeline.extract_rubric(&request.jd_text).await))
}

/// POST /api/v1/evaluate
///
/// Scores one résumé against a job description. Failures come back as degraded
/// results with status 200.
pub async fn handle_evaluate(
    State(state): State<AppState>,
    Json(request): Json<EvaluateRequest>,
) -> Result<Json<EvaluationResult>, AppError> {
    require_job_description(&request.jd_text)?;
    let evaluation = state
        .pipeline
        .evaluate_resume(&request.resume_text, &request.jd_text)
        .await;
    Ok(Json(evaluation))
}

/// POST /api/v1/match
///
/// Full matching flow over résumé texts supplied inline.
pub async fn handle_match(
    State(state): State<AppState>,
    Json(request): Json<MatchRequest>,
) -> Result<Json<MatchingResponse>, AppError> {
    require_job_description(&request.job_description)?;
    require_batch_size(request.resumes.len(), state.config.max_resumes)?;
    require_unique_filenames(request.resumes.iter().map(|r| r.filename.as_str()))?;

    let submissions = request
        .resumes
        .into_iter()
        .map(|r| ResumeSubmission::text(r.filename, r.text))
        .collect();

    let position = position_or_default(request.position.as_deref());
    let response = state
        .pipeline
        .match_candidates(&request.job_description, position, submissions)
        .await;
    Ok(Json(response))
}

/// POST /api/v1/match/upload
///
/// Multipart form: `job_description`, optional `position`, and one file part per
/// résumé. Files without a name or with an unsupported extension are skipped;
/// files that fail to decode are evaluated as processing errors.
pub async fn handle_match_upload(
    State(state): State<AppState>,
    mut multipart: Multipart,
) -> Result<Json<MatchingResponse>, AppError> {
    let mut job_description = String::new();
    let mut position: Option<String> = None;
    let mut files: Vec<(String, Vec<u8>)> = Vec::new();

    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| AppError::Validation(format!("Malformed upload: {e}")))?
    {
        let field_name = field.name().unwrap_or("").to_string();
        match field_name.as_str() {
            "job_description" => {
                job_description = field
                    .text()
                    .await
                    .map_err(|e| AppError::Validation(format!("Invalid job_description: {e}")))?;
            }
            "position" => {
                position = Some(
                    field
                        .text()
                        .await
                        .map_err(|e| AppError::Validation(format!("Invalid position: {e}")))?,
                );
            }
            _ if field_name == "resumes" || field.file_name().is_some() => {
                let filename = field.file_name().unwrap_or("").to_string();
                let data = field
                    .bytes()
                    .await
                    .map_err(|e| AppError::Validation(format!("Could not read upload: {e}")))?;
                files.push((filename, data.to_vec()));
            }
            _ => {}
        }
    }

    require_job_description(&job_description)?;
    require_batch_size(files.len(), state.config.max_resumes)?;
    info!("Received candidate matching upload with {} files", files.len());

    let mut submissions = Vec::with_capacity(files.len());
    for (filename, data) in files {
        if filename.trim().is_empty() {
            warn!("Skipping resume with no filename");
            continue;
        }
        if !is_supported(&filename) {
            warn!("Skipping unsupported file: {filename}");
            continue;
        }
        let submission = match extract_text_blocking(filename.clone(), data).await {
            Ok(text) => ResumeSubmission::text(filename, text),
            Err(e) => ResumeSubmission::unreadable(filename, e.to_string()),
        };
        submissions.push(submission);
    }
    require_unique_filenames(submissions.iter().map(|s| s.filename.as_str()))?;

    let position = position_or_default(position.as_deref());
    let response = state
        .pipeline
        .match_candidates(&job_description, position, submissions)
        .await;
    Ok(Json(response))
}

/// POST /api/v1/emails
///
/// Drafts one interview or rejection email. Drafting failures are returned as
/// the apology text, never as an error status.
pub async fn handle_draft_email(
    State(state): State<AppState>,
    Json(request): Json<EmailRequest>,
) -> Result<Json<EmailResponse>, AppError> {
    let candidate_name = request
        .candidate_name
        .as_deref()
        .map(str::trim)
        .filter(|n| !n.is_empty())
        .unwrap_or("Candidate");
    let position = position_or_default(request.position.as_deref());
    let evaluation = EvaluationResult::from(request.evaluation);

    let email_content = state
        .pipeline
        .draft_outcome(candidate_name, position, request.email_type, Some(&evaluation))
        .await;
    Ok(Json(EmailResponse { email_content }))
}

// ────────────────────────────────────────────────────────────────────────────
// Validation helpers
// ────────────────────────────────────────────────────────────────────────────

fn require_job_description(text: &str) -> Result<(), AppError> {
    if text.trim().is_empty() {
        return Err(AppError::Validation(
            "job description cannot be empty".to_string(),
        ));
    }
    Ok(())
}

fn require_batch_size(count: usize, max_resumes: usize) -> Result<(), AppError> {
    if count > max_resumes {
        warn!("Too many resumes uploaded: {count} (max: {max_resumes})");
        return Err(AppError::Validation(format!(
            "Maximum {max_resumes} resumes allowed"
        )));
    }
    Ok(())
}

/// Candidates are reported by filename, so a batch must not repeat one.
fn require_unique_filenames<'a>(
    filenames: impl IntoIterator<Item = &'a str>,
) -> Result<(), AppError> {
    let mut seen = HashSet::new();
    for filename in filenames {
        if !seen.insert(filename) {
            return Err(AppError::Validation(format!(
                "Duplicate resume filename: {filename}"
            )));
        }
    }
    Ok(())
}

fn position_or_default(position: Option<&str>) -> &str {
    position
        .map(str::trim)
        .filter(|p| !p.is_empty())
        .unwrap_or(DEFAULT_POSITION)
}
