//! OpenAI chat-completions backend.
//!
//! OpenAI has no dedicated system slot on this endpoint; a system
//! instruction is prepended to the message list. The response is reshaped
//! into the same normalized contract the Claude backend produces, mapping
//! `finish_reason: "length"` to `MaxTokens`.

use serde::{Deserialize, Serialize};
use serde_json::json;

use super::{ChatMessage, LlmError, NormalizedResponse, Provider, ProviderClient, StopReason, Usage};

const OPENAI_API_URL: &str = "https://api.openai.com/v1/chat/completions";
const TEMPERATURE: f32 = 0.7;

#[derive(Debug, Serialize)]
struct ChatRequest<'a> {
    model: &'a str,
    max_tokens: u32,
    temperature: f32,
    messages: Vec<ChatMessage>,
}

#[derive(Debug, Deserialize)]
pub struct OpenAiResponse {
    pub model: String,
    #[serde(default)]
    pub choices: Vec<ChatChoice>,
    #[serde(default)]
    pub usage: OpenAiUsage,
}

#[derive(Debug, Deserialize)]
pub struct ChatChoice {
    pub message: ChoiceMessage,
    #[serde(default)]
    pub finish_reason: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct ChoiceMessage {
    #[serde(default)]
    pub content: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
pub struct OpenAiUsage {
    #[serde(default)]
    pub prompt_tokens: u32,
    #[serde(default)]
    pub completion_tokens: u32,
}

impl OpenAiResponse {
    /// Reshapes the first choice into the normalized contract: a single
    /// `{"text": …}` content block, Claude-style usage field names, and the
    /// shared stop-reason vocabulary.
    pub fn normalize(self) -> NormalizedResponse {
        let (content, stop_reason) = match self.choices.into_iter().next() {
            Some(choice) => {
                let stop = match choice.finish_reason.as_deref() {
                    Some("length") => StopReason::MaxTokens,
                    _ => StopReason::Stop,
                };
                let text = choice.message.content.unwrap_or_default();
                (vec![json!({ "text": text })], stop)
            }
            // No choices at all — empty content, the extractor rejects it.
            None => (Vec::new(), StopReason::Stop),
        };

        NormalizedResponse {
            provider: Provider::OpenAi,
            model: self.model,
            content,
            usage: Usage {
                input_tokens: self.usage.prompt_tokens,
                output_tokens: self.usage.completion_tokens,
            },
            stop_reason,
        }
    }
}

#[derive(Debug, Deserialize)]
struct OpenAiError {
    error: OpenAiErrorBody,
}

#[derive(Debug, Deserialize)]
struct OpenAiErrorBody {
    message: String,
}

pub struct OpenAiClient {
    client: reqwest::Client,
    api_key: String,
}

impl OpenAiClient {
    pub fn new(api_key: String) -> Self {
        Self {
            client: reqwest::Client::new(),
            api_key,
        }
    }
}

#[async_trait::async_trait]
impl ProviderClient for OpenAiClient {
    async fn send(
        &self,
        system: Option<&str>,
        messages: &[ChatMessage],
        model: &str,
        max_tokens: u32,
    ) -> Result<NormalizedResponse, LlmError> {
        let mut all_messages = Vec::with_capacity(messages.len() + 1);
        if let Some(system) = system {
            all_messages.push(ChatMessage {
                role: "system".to_string(),
                content: system.to_string(),
            });
        }
        all_messages.extend_from_slice(messages);

        let request_body = ChatRequest {
            model,
            max_tokens,
            temperature: TEMPERATURE,
            messages: all_messages,
        };

        let response = self
            .client
            .post(OPENAI_API_URL)
            .bearer_auth(&self.api_key)
            .json(&request_body)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            let message = serde_json::from_str::<OpenAiError>(&body)
                .map(|e| e.error.message)
                .unwrap_or(body);
            return Err(LlmError::Api {
                status: status.as_u16(),
                message,
            });
        }

        let raw: OpenAiResponse = response.json().await?;
        Ok(raw.normalize())
    }
}
