//! Axum route handlers for the Generation API.

use axum::{
    extract::State,
    http::header,
    response::{IntoResponse, Response},
    Json,
};
use bytes::Bytes;
use serde::Deserialize;

use crate::errors::AppError;
use crate::generation::orchestrator::GenerationRequest;
use crate::llm::Provider;
use crate::state::AppState;

// ────────────────────────────────────────────────────────────────────────────
// Request types
// ────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Deserialize)]
pub struct GenerateRequest {
    pub profile: String,
    pub jd: String,
    #[serde(rename = "roleName")]
    pub role_name: String,
    #[serde(rename = "companyName")]
    pub company_name: Option<String>,
    /// "claude" (default) or "openai".
    pub provider: Option<String>,
    pub model: Option<String>,
    pub template: Option<String>,
}

// ────────────────────────────────────────────────────────────────────────────
// Handlers
// ────────────────────────────────────────────────────────────────────────────

/// POST /api/v1/generate
///
/// Runs the full tailoring pipeline and streams the finished PDF back as a
/// file download.
pub async fn handle_generate(
    State(state): State<AppState>,
    Json(request): Json<GenerateRequest>,
) -> Result<Response, AppError> {
    let provider = match request.provider.as_deref() {
        None => Provider::Claude,
        Some(name) => name
            .parse::<Provider>()
            .map_err(|e| AppError::Validation(e.to_string()))?,
    };

    let generated = state
        .pipeline
        .generate(&GenerationRequest {
            profile: request.profile,
            job_description: request.jd,
            role_name: request.role_name,
            company_name: request.company_name,
            provider,
            model: request.model,
            template: request.template,
        })
        .await?;

    let headers = [
        (header::CONTENT_TYPE, "application/pdf".to_string()),
        (
            header::CONTENT_DISPOSITION,
            format!("attachment; filename=\"{}\"", generated.filename),
        ),
    ];
    Ok((headers, Bytes::from(generated.pdf)).into_response())
}
