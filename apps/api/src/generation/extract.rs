//! ResponseExtractor — pulls the assistant's text out of a normalized
//! response and short-circuits on refusals before any JSON work happens.
//!
//! Content blocks are heterogeneous across providers: a block may be a bare
//! string, an object carrying a `text` field, or any other JSON value
//! (stringified as-is). All blocks are joined into one string.

use serde_json::Value;
use thiserror::Error;

use crate::llm::NormalizedResponse;

#[derive(Debug, Error)]
pub enum ExtractError {
    #[error("AI response has no content")]
    EmptyResponse,

    #[error(
        "AI refused to generate resume. The prompt may be too complex. Please try \
         again with a shorter job description or simpler requirements."
    )]
    ModelRefused,
}

const REFUSAL_PREFIXES: &[&str] = &["i'm sorry", "i cannot", "i apologize"];

fn block_text(block: &Value) -> String {
    match block {
        Value::String(s) => s.clone(),
        Value::Object(map) => match map.get("text").and_then(Value::as_str) {
            Some(text) => text.to_string(),
            None => block.to_string(),
        },
        other => other.to_string(),
    }
}

/// Joins all content blocks into the assistant's answer text.
pub fn extract(response: &NormalizedResponse) -> Result<String, ExtractError> {
    if response.content.is_empty() {
        return Err(ExtractError::EmptyResponse);
    }

    let content = response
        .content
        .iter()
        .map(block_text)
        .collect::<Vec<_>>()
        .join("")
        .trim()
        .to_string();

    let lowered = content.to_lowercase();
    if REFUSAL_PREFIXES.iter().any(|p| lowered.starts_with(p)) {
        return Err(ExtractError::ModelRefused);
    }

    Ok(content)
}
