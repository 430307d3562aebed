//! Request and result types for resume evaluation.
//!
//! Everything here is transient and request-scoped; nothing persists across
//! calls.

use std::collections::BTreeMap;
use std::fmt;

use bytes::Bytes;
use serde::{Deserialize, Serialize};

use crate::errors::AppError;

/// Score bounds of the evaluation contract. The prompt instructs the model to
/// stay inside them and validation rejects anything outside.
pub const SCORE_MIN: f64 = 0.0;
pub const SCORE_MAX: f64 = 100.0;

/// The recognized departments. Anything else is rejected before the upstream
/// call is made — no point paying for a completion on invalid input.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Department {
    Engineering,
    Marketing,
    Design,
    Data,
    Other,
}

impl Department {
    pub const ALL: [Department; 5] = [
        Department::Engineering,
        Department::Marketing,
        Department::Design,
        Department::Data,
        Department::Other,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Department::Engineering => "Engineering",
            Department::Marketing => "Marketing",
            Department::Design => "Design",
            Department::Data => "Data",
            Department::Other => "Other",
        }
    }

    pub fn parse(value: &str) -> Result<Self, AppError> {
        match value.trim() {
            "Engineering" => Ok(Department::Engineering),
            "Marketing" => Ok(Department::Marketing),
            "Design" => Ok(Department::Design),
            "Data" => Ok(Department::Data),
            "Other" => Ok(Department::Other),
            other => Err(AppError::InvalidInput(format!(
                "unrecognized department '{other}' (expected one of: Engineering, Marketing, Design, Data, Other)"
            ))),
        }
    }
}

impl fmt::Display for Department {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One incoming evaluation request. Owned by the handler, discarded after the
/// response is produced.
#[derive(Debug, Clone)]
pub struct EvaluationRequest {
    pub job_title: String,
    pub department: Department,
    pub job_description: String,
    pub resume_bytes: Bytes,
}

impl EvaluationRequest {
    /// Assembles a request from raw multipart fields, with field-level
    /// validation. All checks run before any network call.
    pub fn from_parts(
        job_title: Option<String>,
        department: Option<String>,
        job_description: Option<String>,
        resume_bytes: Option<Bytes>,
    ) -> Result<Self, AppError> {
        let job_title = required_text("job_title", job_title)?;
        let department_raw = required_text("department", department)?;
        let job_description = required_text("job_description", job_description)?;
        let resume_bytes = resume_bytes
            .filter(|b| !b.is_empty())
            .ok_or_else(|| AppError::InvalidInput("field 'resume_file' is required".to_string()))?;

        let department = Department::parse(&department_raw)?;

        Ok(Self {
            job_title,
            department,
            job_description,
            resume_bytes,
        })
    }
}

fn required_text(name: &str, value: Option<String>) -> Result<String, AppError> {
    value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
        .ok_or_else(|| {
            AppError::InvalidInput(format!("field '{name}' is required and must be non-empty"))
        })
}

/// Structured evaluation of one candidate for one job.
///
/// This is the pinned schema contract with the upstream model: exact field
/// names and types, score between `SCORE_MIN` and `SCORE_MAX`. Unknown fields
/// are rejected rather than silently dropped — a result either matches the
/// contract completely or is never constructed.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct EvaluationResult {
    pub score: f64,
    pub strengths: Vec<String>,
    pub concerns: Vec<String>,
    pub skill_match: BTreeMap<String, bool>,
    pub recommendation: String,
}
