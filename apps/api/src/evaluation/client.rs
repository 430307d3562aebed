//! AI Evaluation Client — assembles the prompt, makes the single upstream
//! call, and validates the response against the fixed result schema.

use tracing::debug;

use crate::errors::AppError;
use crate::evaluation::models::{EvaluationRequest, EvaluationResult, SCORE_MAX, SCORE_MIN};
use crate::evaluation::prompts::EVALUATION_PROMPT_TEMPLATE;
use crate::llm_client::{CompletionBackend, LlmError};

/// Evaluates extracted resume text against a job using one completion call.
///
/// Exactly one outbound call per invocation; no caching and no retries. The
/// same resume and job re-sent produce a fresh model call.
pub async fn evaluate(
    backend: &dyn CompletionBackend,
    request: &EvaluationRequest,
    resume_text: &str,
) -> Result<EvaluationResult, AppError> {
    let prompt = EVALUATION_PROMPT_TEMPLATE
        .replace("{job_title}", &request.job_title)
        .replace("{department}", request.department.as_str())
        .replace("{job_description}", &request.job_description)
        .replace("{resume_text}", resume_text);

    debug!(
        "evaluating resume for '{}' ({} char prompt)",
        request.job_title,
        prompt.len()
    );

    let raw = backend.complete(&prompt).await.map_err(map_llm_error)?;

    parse_evaluation(&raw)
}

fn map_llm_error(e: LlmError) -> AppError {
    match e {
        LlmError::Transport(msg) => AppError::Transport(msg),
        LlmError::Api { status, message } => AppError::Upstream { status, message },
        LlmError::Envelope { message, raw } => AppError::ResponseValidation { message, raw },
        LlmError::EmptyContent => AppError::ResponseValidation {
            message: "completion contained no content".to_string(),
            raw: String::new(),
        },
    }
}

/// Parses raw model output into an `EvaluationResult`.
///
/// Either every required field is present, well typed and in range, or the
/// result is never constructed. Nothing is coerced or dropped silently.
fn parse_evaluation(raw: &str) -> Result<EvaluationResult, AppError> {
    let stripped = strip_json_fences(raw);
    let candidate = extract_json_object(stripped).ok_or_else(|| AppError::ResponseValidation {
        message: "no JSON object found in model output".to_string(),
        raw: raw.to_string(),
    })?;

    let result: EvaluationResult =
        serde_json::from_str(candidate).map_err(|e| AppError::ResponseValidation {
            message: format!("response does not match the evaluation schema: {e}"),
            raw: raw.to_string(),
        })?;

    if !(SCORE_MIN..=SCORE_MAX).contains(&result.score) {
        return Err(AppError::ResponseValidation {
            message: format!(
                "score {} outside the {SCORE_MIN}-{SCORE_MAX} contract",
                result.score
            ),
            raw: raw.to_string(),
        });
    }

    Ok(result)
}

/// Strips ```json ... ``` or ``` ... ``` code fences from LLM output.
fn strip_json_fences(text: &str) -> &str {
    let text = text.trim();
    if let Some(stripped) = text.strip_prefix("```json") {
        stripped
            .trim_start()
            .strip_suffix("```")
            .map(|s| s.trim())
            .unwrap_or(stripped.trim_start())
    } else if let Some(stripped) = text.strip_prefix("```") {
        stripped
            .trim_start()
            .strip_suffix("```")
            .map(|s| s.trim())
            .unwrap_or(stripped.trim_start())
    } else {
        text
    }
}

/// Slices from the first `{` to the last `}`. Models sometimes wrap the JSON
/// object in prose even when told not to.
fn extract_json_object(text: &str) -> Option<&str> {
    let start = text.find('{')?;
    let end = text.rfind('}')?;
    (end >= start).then(|| &text[start..=end])
}
