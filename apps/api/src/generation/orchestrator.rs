//! GenerationOrchestrator — drives one request through the full pipeline:
//! gate, profile lookup, prompt build, LLM call, extraction and recovery,
//! validation, assembly, rendering, filename derivation.
//!
//! The keyword gate runs before anything touches a provider, so a rejected
//! job description never spends tokens. Truncated responses get one salvage
//! attempt on the partial output and then a single retry with the concise
//! prompt preset; the retried response is used unconditionally.

use std::sync::Arc;

use regex::Regex;
use std::sync::OnceLock;
use tracing::{info, warn};

use crate::errors::AppError;
use crate::generation::{assemble, extract, gate, prompt, recover, roles, validate};
use crate::generation::extract::ExtractError;
use crate::generation::recover::RecoverError;
use crate::llm::{CallOptions, LlmGateway, NormalizedResponse, PromptInput, Provider, StopReason};
use crate::models::content::ResumeContent;
use crate::render::TemplateRegistry;
use crate::store::mapping;
use crate::store::profiles::ProfileStore;
use crate::store::prompts::PromptStore;

/// One validated generation request.
#[derive(Debug, Clone)]
pub struct GenerationRequest {
    /// Profile slug, resolved against the static mapping.
    pub profile: String,
    pub job_description: String,
    pub role_name: String,
    pub company_name: Option<String>,
    pub provider: Provider,
    pub model: Option<String>,
    pub template: Option<String>,
}

#[derive(Debug)]
pub struct GeneratedResume {
    pub filename: String,
    pub pdf: Vec<u8>,
}

/// The wired pipeline, shared across requests.
pub struct Pipeline {
    pub profiles: Arc<ProfileStore>,
    pub prompts: Arc<PromptStore>,
    pub llm: Arc<LlmGateway>,
    pub templates: Arc<TemplateRegistry>,
}

fn extract_text(response: &NormalizedResponse) -> Result<String, AppError> {
    extract::extract(response).map_err(|e| match e {
        ExtractError::ModelRefused => AppError::ModelRefused(e.to_string()),
        ExtractError::EmptyResponse => AppError::Internal(anyhow::anyhow!(e)),
    })
}

/// Extract, recover and validate one response into typed content.
fn content_from(response: &NormalizedResponse) -> Result<ResumeContent, AppError> {
    let text = extract_text(response)?;
    let value = recover::recover(&text).map_err(|e| match e {
        RecoverError::NoJsonFound => AppError::MalformedOutput("no JSON object found".to_string()),
        RecoverError::Unrecoverable(msg) => AppError::MalformedOutput(msg),
    })?;
    validate::validate(value)
}

fn disallowed_chars() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| Regex::new(r"[^A-Za-z0-9_-]").unwrap())
}

fn whitespace_runs() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| Regex::new(r"\s+").unwrap())
}

/// Collapses a free-text segment to a filename-safe token.
fn sanitize_segment(segment: &str) -> String {
    let underscored = whitespace_runs().replace_all(segment.trim(), "_");
    disallowed_chars().replace_all(&underscored, "").to_string()
}

/// Derives the download filename from the candidate name, target role and
/// optional company: `First_Last_Role[_Company].pdf`. Middle name tokens
/// are dropped; a nameless profile falls back to "resume".
pub fn derive_filename(candidate_name: &str, role_name: &str, company_name: Option<&str>) -> String {
    let tokens: Vec<&str> = candidate_name.split_whitespace().collect();
    let base = match tokens.as_slice() {
        [] => "resume".to_string(),
        [only] => sanitize_segment(only),
        [first, .., last] => format!("{}_{}", sanitize_segment(first), sanitize_segment(last)),
    };

    let mut filename = format!("{}_{}", base, sanitize_segment(role_name));
    if let Some(company) = company_name {
        let company = sanitize_segment(company);
        if !company.is_empty() {
            filename.push('_');
            filename.push_str(&company);
        }
    }
    filename.push_str(".pdf");
    filename
}

impl Pipeline {
    /// Runs the full generation pipeline for one request.
    pub async fn generate(&self, request: &GenerationRequest) -> Result<GeneratedResume, AppError> {
        if request.profile.trim().is_empty()
            || request.job_description.trim().is_empty()
            || request.role_name.trim().is_empty()
        {
            return Err(AppError::Validation(
                "Missing required fields: profile, jd, and roleName are required".to_string(),
            ));
        }

        // Policy gate first. A rejected posting never reaches a provider.
        let verdict = gate::evaluate(&request.job_description);
        if let Some(message) = verdict.rejection_message() {
            info!(profile = %request.profile, ?verdict, "Job description rejected by gate");
            return Err(AppError::PolicyRejection {
                message: message.to_string(),
                verdict,
            });
        }

        let profile_config = mapping::profile_by_slug(&request.profile).ok_or_else(|| {
            AppError::NotFound(format!("Unknown profile \"{}\"", request.profile))
        })?;
        let profile = self.profiles.load(profile_config.resume)?;

        let prompt_name = profile_config
            .prompt
            .unwrap_or_else(|| roles::detect_role(&request.job_description, &request.role_name));
        let template_text = self.prompts.load(prompt_name)?;

        let opts = || CallOptions {
            model: request.model.clone(),
            ..CallOptions::default()
        };
        let full_prompt = prompt::build_prompt(
            &template_text,
            &profile,
            &request.job_description,
            &prompt::FULL,
        );
        let response = self
            .llm
            .call(&PromptInput::Text(full_prompt), request.provider, opts())
            .await?;

        let content = if response.stop_reason == StopReason::MaxTokens {
            // Truncated. Try to salvage the partial output before paying
            // for a second call.
            match content_from(&response) {
                Ok(content) => {
                    info!("Truncated response salvaged without a retry");
                    content
                }
                Err(salvage_err) => {
                    warn!(
                        "Response hit the token limit and could not be salvaged \
                         ({salvage_err}); retrying with reduced targets"
                    );
                    let concise_prompt = prompt::build_prompt(
                        &template_text,
                        &profile,
                        &request.job_description,
                        &prompt::CONCISE,
                    );
                    let retried = self
                        .llm
                        .call(&PromptInput::Text(concise_prompt), request.provider, opts())
                        .await?;
                    content_from(&retried)?
                }
            }
        } else {
            content_from(&response)?
        };

        let document = assemble::assemble(&profile, &content);
        let template_name = request.template.as_deref().unwrap_or(profile_config.template);
        let template = self.templates.resolve(Some(template_name))?;
        let pdf = template.render(&document)?;

        let filename = derive_filename(
            &profile.name,
            &request.role_name,
            request.company_name.as_deref(),
        );
        info!(
            filename = %filename,
            bytes = pdf.len(),
            template = template_name,
            "Resume generated"
        );
        Ok(GeneratedResume { filename, pdf })
    }
}
