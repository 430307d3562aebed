//! Resume evaluation — the single request/response pipeline behind both
//! front-ends.
//!
//! Flow: multipart fields → `EvaluationRequest` → extract resume text →
//! one completion call → schema-validated `EvaluationResult`.

pub mod client;
pub mod handlers;
pub mod models;
pub mod prompts;

use crate::errors::AppError;
use crate::extract::extract_resume_text;
use crate::llm_client::CompletionBackend;

use self::models::{EvaluationRequest, EvaluationResult};

/// Runs the full pipeline for one validated request: extraction, then the
/// upstream evaluation call.
pub async fn run_evaluation(
    backend: &dyn CompletionBackend,
    request: &EvaluationRequest,
) -> Result<EvaluationResult, AppError> {
    let resume_text = extract_resume_text(&request.resume_bytes)?;
    client::evaluate(backend, request, &resume_text).await
}
