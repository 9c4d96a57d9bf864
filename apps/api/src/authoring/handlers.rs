//! Axum route handlers for job description authoring and upload.

use axum::{
    extract::{Multipart, State},
    Json,
};
use serde::Serialize;
use tracing::info;

use crate::authoring::{generate_job_description, JobDescriptionRequest};
use crate::documents::{extract_text_blocking, is_supported, DocumentError};
use crate::errors::AppError;
use crate::state::AppState;

#[derive(Debug, Serialize)]
pub struct JobDescriptionResponse {
    pub job_description: String,
}

/// POST /api/v1/job-descriptions/generate
pub async fn handle_generate_job_description(
    State(state): State<AppState>,
    Json(request): Json<JobDescriptionRequest>,
) -> Result<Json<JobDescriptionResponse>, AppError> {
    request.validate()?;

    let job_description = generate_job_description(
        &request,
        state.pipeline.llm(),
        state.pipeline.settings(),
    )
    .await?;

    Ok(Json(JobDescriptionResponse { job_description }))
}

/// POST /api/v1/job-descriptions/upload
///
/// Decodes the first uploaded file into job description text.
pub async fn handle_upload_job_description(
    mut multipart: Multipart,
) -> Result<Json<JobDescriptionResponse>, AppError> {
    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| AppError::Validation(format!("Malformed upload: {e}")))?
    {
        let Some(filename) = field.file_name().map(str::to_string) else {
            continue;
        };
        if filename.trim().is_empty() {
            return Err(AppError::Validation("No file selected".to_string()));
        }
        if !is_supported(&filename) {
            return Err(DocumentError::Unsupported(filename).into());
        }

        let data = field
            .bytes()
            .await
            .map_err(|e| AppError::Validation(format!("Could not read {filename}: {e}")))?;
        let job_description = extract_text_blocking(filename.clone(), data.to_vec()).await?;
        info!("Job description extracted from {filename}");

        return Ok(Json(JobDescriptionResponse { job_description }));
    }

    Err(AppError::Validation("No file selected".to_string()))
}
