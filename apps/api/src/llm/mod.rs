//! LLM Gateway — the single point of entry for all provider calls.
//!
//! ARCHITECTURAL RULE: no other module may talk to a provider API directly.
//! The gateway owns default-model resolution, the per-attempt timeout, and
//! the retry loop; the per-provider wire shapes live in `claude` / `openai`
//! and are normalized into one response type at the seam, so everything
//! downstream is provider-agnostic.

use std::fmt;
use std::str::FromStr;
use std::time::Duration;

use serde::{Deserialize, Serialize};
use serde_json::Value;
use thiserror::Error;
use tracing::{debug, info, warn};

pub mod claude;
pub mod openai;

use crate::config::Config;
use claude::ClaudeClient;
use openai::OpenAiClient;

/// Default model per provider, first entry in each catalog.
const CLAUDE_MODELS: &[&str] = &["claude-haiku-4-5-20251001"];
const OPENAI_MODELS: &[&str] = &[
    "gpt-5.2-chat-latest",
    "gpt-5.2",
    "gpt-5.2-pro",
    "gpt-5",
    "gpt-5-mini",
    "gpt-5-nano",
    "gpt-5.1",
    "gpt-4.1",
    "gpt-4.1-mini",
    "gpt-4.1-nano",
    "gpt-4o",
    "gpt-4o-mini",
    "gpt-4-turbo",
    "gpt-4-turbo-preview",
    "gpt-4",
    "gpt-3.5-turbo",
];

pub const DEFAULT_MAX_TOKENS: u32 = 8000;
pub const DEFAULT_RETRIES: u32 = 2;
pub const DEFAULT_TIMEOUT: Duration = Duration::from_millis(120_000);

// ────────────────────────────────────────────────────────────────────────────
// Errors
// ────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Error)]
pub enum LlmError {
    #[error("Unsupported provider: {0}. Supported: claude, openai")]
    UnsupportedProvider(String),

    #[error("{0} API key not configured")]
    ProviderUnavailable(&'static str),

    #[error("No default model available for provider: {0}. Please specify a model.")]
    NoDefaultModel(Provider),

    #[error("AI request timed out after {0:?}")]
    Timeout(Duration),

    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("API error (status {status}): {message}")]
    Api { status: u16, message: String },

    #[error("JSON parse error: {0}")]
    Parse(#[from] serde_json::Error),
}

// ────────────────────────────────────────────────────────────────────────────
// Provider-agnostic request/response model
// ────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Provider {
    Claude,
    #[serde(rename = "openai")]
    OpenAi,
}

impl Provider {
    pub fn as_str(&self) -> &'static str {
        match self {
            Provider::Claude => "claude",
            Provider::OpenAi => "openai",
        }
    }
}

impl fmt::Display for Provider {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Provider {
    type Err = LlmError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "claude" => Ok(Provider::Claude),
            "openai" => Ok(Provider::OpenAi),
            other => Err(LlmError::UnsupportedProvider(other.to_string())),
        }
    }
}

/// A role-tagged chat message. Role is free text ("system"/"user"/"assistant").
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChatMessage {
    pub role: String,
    pub content: String,
}

/// Either a bare prompt or a structured message list. A "system" message is
/// extracted and delivered however the selected provider expects it.
#[derive(Debug, Clone)]
pub enum PromptInput {
    Text(String),
    Messages(Vec<ChatMessage>),
}

impl PromptInput {
    /// Splits into (system instruction, non-system messages).
    /// Bare text becomes a single user message with no system slot.
    fn split_system(&self) -> (Option<String>, Vec<ChatMessage>) {
        match self {
            PromptInput::Text(text) => (
                None,
                vec![ChatMessage {
                    role: "user".to_string(),
                    content: text.clone(),
                }],
            ),
            PromptInput::Messages(messages) => {
                let system = messages
                    .iter()
                    .find(|m| m.role == "system")
                    .map(|m| m.content.clone());
                let rest = messages
                    .iter()
                    .filter(|m| m.role != "system")
                    .cloned()
                    .collect();
                (system, rest)
            }
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StopReason {
    Stop,
    MaxTokens,
}

#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize)]
pub struct Usage {
    pub input_tokens: u32,
    pub output_tokens: u32,
}

/// The provider-agnostic response contract both backends produce.
/// Content blocks stay raw JSON values — provider payloads are
/// heterogeneous and the extractor handles each shape defensively.
#[derive(Debug, Clone)]
pub struct NormalizedResponse {
    pub provider: Provider,
    pub model: String,
    pub content: Vec<Value>,
    pub usage: Usage,
    pub stop_reason: StopReason,
}

// ────────────────────────────────────────────────────────────────────────────
// Backend trait
// ────────────────────────────────────────────────────────────────────────────

/// One provider backend. Implementations translate the normalized request
/// into their wire shape and their wire response back out; they do NOT
/// retry or time out — the gateway owns both.
#[async_trait::async_trait]
pub trait ProviderClient: Send + Sync {
    async fn send(
        &self,
        system: Option<&str>,
        messages: &[ChatMessage],
        model: &str,
        max_tokens: u32,
    ) -> Result<NormalizedResponse, LlmError>;
}

// ────────────────────────────────────────────────────────────────────────────
// Gateway
// ────────────────────────────────────────────────────────────────────────────

/// Options for a single gateway call. Defaults match the product contract:
/// 8000 max tokens, 2 attempts, 120s per-attempt timeout.
#[derive(Debug, Clone)]
pub struct CallOptions {
    pub model: Option<String>,
    pub max_tokens: u32,
    pub retries: u32,
    pub timeout: Duration,
}

impl Default for CallOptions {
    fn default() -> Self {
        Self {
            model: None,
            max_tokens: DEFAULT_MAX_TOKENS,
            retries: DEFAULT_RETRIES,
            timeout: DEFAULT_TIMEOUT,
        }
    }
}

/// Provider-agnostic LLM client. A provider whose API key is unset is
/// simply absent; calling it yields `ProviderUnavailable`.
pub struct LlmGateway {
    claude: Option<Box<dyn ProviderClient>>,
    openai: Option<Box<dyn ProviderClient>>,
    claude_default_model: Option<String>,
    openai_default_model: Option<String>,
}

impl LlmGateway {
    pub fn new(config: &Config) -> Self {
        let claude = config
            .anthropic_api_key
            .clone()
            .map(|key| Box::new(ClaudeClient::new(key)) as Box<dyn ProviderClient>);
        let openai = config
            .openai_api_key
            .clone()
            .map(|key| Box::new(OpenAiClient::new(key)) as Box<dyn ProviderClient>);

        info!(
            claude = claude.is_some(),
            openai = openai.is_some(),
            "LLM gateway initialized"
        );

        Self {
            claude,
            openai,
            claude_default_model: config.anthropic_model.clone(),
            openai_default_model: config.openai_model.clone(),
        }
    }

    /// Gateway over arbitrary backends, bypassing client construction.
    /// Retry, timeout, and model resolution behave exactly as in `new`.
    #[cfg(test)]
    pub(crate) fn with_backends(
        claude: Option<Box<dyn ProviderClient>>,
        openai: Option<Box<dyn ProviderClient>>,
    ) -> Self {
        Self {
            claude,
            openai,
            claude_default_model: None,
            openai_default_model: None,
        }
    }

    pub fn available_models(provider: Provider) -> &'static [&'static str] {
        match provider {
            Provider::Claude => CLAUDE_MODELS,
            Provider::OpenAi => OPENAI_MODELS,
        }
    }

    /// Resolves the model for a call: explicit request > env override >
    /// first catalog entry. An out-of-catalog request is attempted anyway
    /// (the upstream API is the arbiter) with a warning.
    fn resolve_model(&self, provider: Provider, requested: Option<&str>) -> Result<String, LlmError> {
        if let Some(model) = requested {
            if !Self::available_models(provider).contains(&model) {
                warn!("Model {model} not in allowed list, but attempting to use it anyway.");
            }
            return Ok(model.to_string());
        }

        let override_model = match provider {
            Provider::Claude => self.claude_default_model.as_deref(),
            Provider::OpenAi => self.openai_default_model.as_deref(),
        };
        if let Some(model) = override_model {
            return Ok(model.to_string());
        }

        Self::available_models(provider)
            .first()
            .map(|m| m.to_string())
            .ok_or(LlmError::NoDefaultModel(provider))
    }

    fn backend(&self, provider: Provider) -> Result<&dyn ProviderClient, LlmError> {
        match provider {
            Provider::Claude => self
                .claude
                .as_deref()
                .ok_or(LlmError::ProviderUnavailable("Anthropic")),
            Provider::OpenAi => self
                .openai
                .as_deref()
                .ok_or(LlmError::ProviderUnavailable("OpenAI")),
        }
    }

    /// Calls the provider with the normalized request.
    ///
    /// Each attempt races the upstream call against the timeout; a fired
    /// timer counts as a failed attempt. Retries are immediate with no
    /// backoff. A timed-out upstream request is abandoned, not cancelled at
    /// the transport level.
    pub async fn call(
        &self,
        input: &PromptInput,
        provider: Provider,
        opts: CallOptions,
    ) -> Result<NormalizedResponse, LlmError> {
        let backend = self.backend(provider)?;
        let model = self.resolve_model(provider, opts.model.as_deref())?;
        let (system, messages) = input.split_system();

        let mut retries = opts.retries.max(1);
        loop {
            let attempt = tokio::time::timeout(
                opts.timeout,
                backend.send(system.as_deref(), &messages, &model, opts.max_tokens),
            )
            .await;

            let err = match attempt {
                Ok(Ok(response)) => {
                    debug!(
                        provider = %provider,
                        model = %response.model,
                        input_tokens = response.usage.input_tokens,
                        output_tokens = response.usage.output_tokens,
                        stop_reason = ?response.stop_reason,
                        "LLM call succeeded"
                    );
                    return Ok(response);
                }
                Ok(Err(e)) => e,
                Err(_) => LlmError::Timeout(opts.timeout),
            };

            retries -= 1;
            if retries == 0 {
                return Err(err);
            }
            warn!("LLM call failed ({err}), retrying... ({retries} attempts left)");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn keyless_gateway() -> LlmGateway {
        LlmGateway::with_backends(None, None)
    }

    #[test]
    fn provider_parses_known_names() {
        assert_eq!("claude".parse::<Provider>().unwrap(), Provider::Claude);
        assert_eq!("openai".parse::<Provider>().unwrap(), Provider::OpenAi);
        assert!(matches!(
            "gemini".parse::<Provider>(),
            Err(LlmError::UnsupportedProvider(_))
        ));
    }

    #[test]
    fn default_model_is_first_catalog_entry() {
        let gateway = keyless_gateway();
        assert_eq!(
            gateway.resolve_model(Provider::Claude, None).unwrap(),
            "claude-haiku-4-5-20251001"
        );
        assert_eq!(
            gateway.resolve_model(Provider::OpenAi, None).unwrap(),
            "gpt-5.2-chat-latest"
        );
    }

    #[test]
    fn explicit_model_wins_even_when_not_in_catalog() {
        let gateway = keyless_gateway();
        assert_eq!(
            gateway
                .resolve_model(Provider::Claude, Some("claude-experimental"))
                .unwrap(),
            "claude-experimental"
        );
    }

    #[test]
    fn split_system_extracts_system_message() {
        let input = PromptInput::Messages(vec![
            ChatMessage {
                role: "system".to_string(),
                content: "be terse".to_string(),
            },
            ChatMessage {
                role: "user".to_string(),
                content: "hello".to_string(),
            },
        ]);
        let (system, messages) = input.split_system();
        assert_eq!(system.as_deref(), Some("be terse"));
        assert_eq!(messages.len(), 1);
        assert_eq!(messages[0].role, "user");
    }

    #[test]
    fn split_system_on_bare_text_builds_single_user_message() {
        let (system, messages) = PromptInput::Text("prompt".to_string()).split_system();
        assert!(system.is_none());
        assert_eq!(messages.len(), 1);
        assert_eq!(messages[0].role, "user");
        assert_eq!(messages[0].content, "prompt");
    }

    #[tokio::test]
    async fn missing_key_surfaces_provider_unavailable() {
        let gateway = keyless_gateway();
        let result = gateway
            .call(
                &PromptInput::Text("hi".to_string()),
                Provider::Claude,
                CallOptions::default(),
            )
            .await;
        assert!(matches!(result, Err(LlmError::ProviderUnavailable(_))));
    }
}
