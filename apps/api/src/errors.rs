use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;

use crate::generation::gate::LocationVerdict;
use crate::llm::LlmError;

/// Application-level error type.
/// Implements `IntoResponse` so Axum handlers can return `Result<T, AppError>`.
///
/// Every pipeline stage either recovers internally (retries, JSON repairs)
/// or converts its failure into one of these terminal kinds.
#[derive(Debug, Error)]
pub enum AppError {
    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Validation error: {0}")]
    Validation(String),

    /// KeywordGate rejection — a product policy outcome, not a system error.
    /// Carries the verdict so the response can explain the rejection without
    /// re-deriving it.
    #[error("{message}")]
    PolicyRejection {
        message: String,
        verdict: LocationVerdict,
    },

    #[error("LLM error: {0}")]
    Llm(#[from] LlmError),

    /// The model answered but declined to produce resume JSON.
    #[error("{0}")]
    ModelRefused(String),

    /// JSON unrecoverable after all repair passes.
    #[error("AI returned invalid JSON: {0}. Please try again.")]
    MalformedOutput(String),

    /// A required top-level content field was absent.
    #[error("AI response missing required field: {0}")]
    MissingField(&'static str),

    #[error("PDF rendering failed: {0}")]
    Render(String),

    #[error("Internal server error: {0}")]
    Internal(#[from] anyhow::Error),
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, message, location_type) = match &self {
            AppError::NotFound(msg) => (StatusCode::NOT_FOUND, msg.clone(), None),
            AppError::Validation(msg) => (StatusCode::BAD_REQUEST, msg.clone(), None),
            AppError::PolicyRejection { message, verdict } => (
                StatusCode::BAD_REQUEST,
                message.clone(),
                verdict.rejection_tag(),
            ),
            AppError::Llm(e) => {
                tracing::error!("LLM error: {e}");
                (StatusCode::INTERNAL_SERVER_ERROR, e.to_string(), None)
            }
            AppError::ModelRefused(msg) => {
                tracing::error!("Model refused: {msg}");
                (StatusCode::INTERNAL_SERVER_ERROR, msg.clone(), None)
            }
            AppError::MalformedOutput(_) | AppError::MissingField(_) => {
                tracing::error!("{self}");
                (StatusCode::INTERNAL_SERVER_ERROR, self.to_string(), None)
            }
            AppError::Render(msg) => {
                tracing::error!("Render error: {msg}");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    format!("PDF generation failed: {msg}"),
                    None,
                )
            }
            AppError::Internal(e) => {
                tracing::error!("Internal error: {e:?}");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "An internal server error occurred".to_string(),
                    None,
                )
            }
        };

        let body = match location_type {
            Some(tag) => json!({ "error": message, "locationType": tag }),
            None => json!({ "error": message }),
        };

        (status, Json(body)).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn policy_rejection_maps_to_400() {
        let err = AppError::PolicyRejection {
            message: "This position is HYBRID".to_string(),
            verdict: LocationVerdict::Hybrid,
        };
        let response = err.into_response();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }

    #[test]
    fn not_found_maps_to_404() {
        let response = AppError::NotFound("Profile \"zz\" not found".to_string()).into_response();
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
    }
}
