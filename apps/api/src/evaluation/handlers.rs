//! Axum route handler for the JSON evaluation endpoint.

use axum::{
    extract::{Multipart, State},
    Json,
};
use bytes::Bytes;

use crate::errors::AppError;
use crate::evaluation::models::{EvaluationRequest, EvaluationResult};
use crate::evaluation::run_evaluation;
use crate::state::AppState;

/// POST /recommend
///
/// Multipart body with fields `job_title`, `department`, `job_description`
/// and `resume_file`. Returns the schema-validated `EvaluationResult` as JSON.
pub async fn handle_recommend(
    State(state): State<AppState>,
    mut multipart: Multipart,
) -> Result<Json<EvaluationResult>, AppError> {
    let request = read_evaluation_request(&mut multipart).await?;
    let result = run_evaluation(state.backend.as_ref(), &request).await?;
    Ok(Json(result))
}

/// Collects the known multipart fields into a validated `EvaluationRequest`.
/// Unknown fields are ignored; missing or empty required fields are rejected.
pub(crate) async fn read_evaluation_request(
    multipart: &mut Multipart,
) -> Result<EvaluationRequest, AppError> {
    let mut job_title: Option<String> = None;
    let mut department: Option<String> = None;
    let mut job_description: Option<String> = None;
    let mut resume_bytes: Option<Bytes> = None;

    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| AppError::InvalidInput(format!("malformed multipart body: {e}")))?
    {
        match field.name().unwrap_or("") {
            "job_title" => job_title = Some(read_text(field, "job_title").await?),
            "department" => department = Some(read_text(field, "department").await?),
            "job_description" => {
                job_description = Some(read_text(field, "job_description").await?)
            }
            "resume_file" => {
                resume_bytes = Some(field.bytes().await.map_err(|e| {
                    AppError::InvalidInput(format!("could not read field 'resume_file': {e}"))
                })?)
            }
            _ => {}
        }
    }

    EvaluationRequest::from_parts(job_title, department, job_description, resume_bytes)
}

async fn read_text(
    field: axum::extract::multipart::Field<'_>,
    name: &str,
) -> Result<String, AppError> {
    field
        .text()
        .await
        .map_err(|e| AppError::InvalidInput(format!("could not read field '{name}': {e}")))
}
