//! Anthropic Messages API backend.
//!
//! Claude takes the system instruction as a dedicated request field, unlike
//! the OpenAI backend which prepends it to the message list. The gateway
//! hides that difference; this module only speaks Anthropic's wire shape.

use serde::{Deserialize, Serialize};
use serde_json::Value;

use super::{ChatMessage, LlmError, NormalizedResponse, Provider, ProviderClient, StopReason, Usage};

const ANTHROPIC_API_URL: &str = "https://api.anthropic.com/v1/messages";
const ANTHROPIC_VERSION: &str = "2023-06-01";
const TEMPERATURE: f32 = 0.7;

#[derive(Debug, Serialize)]
struct AnthropicRequest<'a> {
    model: &'a str,
    max_tokens: u32,
    temperature: f32,
    #[serde(skip_serializing_if = "Option::is_none")]
    system: Option<&'a str>,
    messages: &'a [ChatMessage],
}

/// Raw Anthropic response. Content blocks are kept as raw JSON values and
/// passed through untouched — the extractor deals with block shapes.
#[derive(Debug, Deserialize)]
pub struct ClaudeResponse {
    pub model: String,
    #[serde(default)]
    pub content: Vec<Value>,
    #[serde(default)]
    pub usage: ClaudeUsage,
    #[serde(default)]
    pub stop_reason: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
pub struct ClaudeUsage {
    #[serde(default)]
    pub input_tokens: u32,
    #[serde(default)]
    pub output_tokens: u32,
}

impl ClaudeResponse {
    /// Maps Anthropic's finish vocabulary onto the shared contract:
    /// `"max_tokens"` means truncation, anything else counts as a clean stop.
    pub fn normalize(self) -> NormalizedResponse {
        let stop_reason = match self.stop_reason.as_deref() {
            Some("max_tokens") => StopReason::MaxTokens,
            _ => StopReason::Stop,
        };
        NormalizedResponse {
            provider: Provider::Claude,
            model: self.model,
            content: self.content,
            usage: Usage {
                input_tokens: self.usage.input_tokens,
                output_tokens: self.usage.output_tokens,
            },
            stop_reason,
        }
    }
}

#[derive(Debug, Deserialize)]
struct AnthropicError {
    error: AnthropicErrorBody,
}

#[derive(Debug, Deserialize)]
struct AnthropicErrorBody {
    message: String,
}

pub struct ClaudeClient {
    client: reqwest::Client,
    api_key: String,
}

impl ClaudeClient {
    pub fn new(api_key: String) -> Self {
        Self {
            client: reqwest::Client::new(),
            api_key,
        }
    }
}

#[async_trait::async_trait]
impl ProviderClient for ClaudeClient {
    async fn send(
        &self,
        system: Option<&str>,
        messages: &[ChatMessage],
        model: &str,
        max_tokens: u32,
    ) -> Result<NormalizedResponse, LlmError> {
        let request_body = AnthropicRequest {
            model,
            max_tokens,
            temperature: TEMPERATURE,
            system,
            messages,
        };

        let response = self
            .client
            .post(ANTHROPIC_API_URL)
            .header("x-api-key", &self.api_key)
            .header("anthropic-version", ANTHROPIC_VERSION)
            .header("content-type", "application/json")
            .json(&request_body)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            let message = serde_json::from_str::<AnthropicError>(&body)
                .map(|e| e.error.message)
                .unwrap_or(body);
            return Err(LlmError::Api {
                status: status.as_u16(),
                message,
            });
        }

        let raw: ClaudeResponse = response.json().await?;
        Ok(raw.normalize())
    }
}
