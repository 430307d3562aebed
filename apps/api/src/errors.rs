#![allow(dead_code)]

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;

/// Application-level error type covering the whole request pipeline.
/// Implements `IntoResponse` so Axum handlers can return `Result<T, AppError>`.
#[derive(Debug, Error)]
pub enum AppError {
    /// Missing or out-of-range request fields. Raised before any upstream call.
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    /// The uploaded resume is not a readable PDF, or yields no extractable text.
    #[error("Document parse error: {0}")]
    DocumentParse(String),

    /// Network or timeout failure reaching the completion service.
    #[error("Upstream transport failure: {0}")]
    Transport(String),

    /// The completion service answered with a non-success status.
    #[error("Upstream error (status {status}): {message}")]
    Upstream { status: u16, message: String },

    /// The completion response could not be parsed or validated against the
    /// evaluation schema. The raw response is kept for logs only.
    #[error("Response validation error: {message}")]
    ResponseValidation { message: String, raw: String },

    #[error("Internal server error: {0}")]
    Internal(#[from] anyhow::Error),
}

impl AppError {
    /// Message safe to show an end user. Never includes the raw upstream
    /// response body.
    pub fn public_message(&self) -> String {
        match self {
            AppError::InvalidInput(msg) => msg.clone(),
            AppError::DocumentParse(msg) => {
                format!("Could not read the uploaded resume: {msg}")
            }
            AppError::Transport(_) => {
                "The evaluation service is unreachable. Please try again later.".to_string()
            }
            AppError::Upstream { status, .. } => {
                format!("The evaluation service returned an error (upstream status {status}).")
            }
            AppError::ResponseValidation { .. } => {
                "The evaluation service returned an unexpected response.".to_string()
            }
            AppError::Internal(_) => "An internal server error occurred.".to_string(),
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, code) = match &self {
            AppError::InvalidInput(_) => (StatusCode::UNPROCESSABLE_ENTITY, "INVALID_INPUT"),
            AppError::DocumentParse(_) => (StatusCode::BAD_REQUEST, "DOCUMENT_PARSE_ERROR"),
            AppError::Transport(msg) => {
                tracing::error!("Transport failure: {msg}");
                (StatusCode::BAD_GATEWAY, "UPSTREAM_UNAVAILABLE")
            }
            AppError::Upstream { status, message } => {
                tracing::error!("Upstream error (status {status}): {message}");
                (StatusCode::BAD_GATEWAY, "UPSTREAM_ERROR")
            }
            AppError::ResponseValidation { message, raw } => {
                tracing::error!("Response validation failed: {message}; raw response: {raw}");
                (StatusCode::INTERNAL_SERVER_ERROR, "RESPONSE_VALIDATION_ERROR")
            }
            AppError::Internal(e) => {
                tracing::error!("Internal error: {e:?}");
                (StatusCode::INTERNAL_SERVER_ERROR, "INTERNAL_ERROR")
            }
        };

        let body = Json(json!({
            "error": {
                "code": code,
                "message": self.public_message()
            }
        }));

        (status, body).into_response()
    }
}
