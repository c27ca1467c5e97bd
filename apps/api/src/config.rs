use anyhow::{Context, Result};

/// Application configuration loaded from environment variables.
///
/// Provider API keys are optional: a missing key disables that provider
/// only (callers get `ProviderUnavailable`), it is never fatal at startup.
#[derive(Debug, Clone)]
pub struct Config {
    pub port: u16,
    pub rust_log: String,
    /// Directory of candidate profile JSON files.
    pub profiles_dir: String,
    /// Directory of prompt template `.txt` files (must contain `default.txt`).
    pub prompts_dir: String,
    pub anthropic_api_key: Option<String>,
    pub openai_api_key: Option<String>,
    /// Optional per-provider default-model overrides.
    pub anthropic_model: Option<String>,
    pub openai_model: Option<String>,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok(); // load .env if present; ignore if missing

        Ok(Config {
            port: std::env::var("PORT")
                .unwrap_or_else(|_| "8080".to_string())
                .parse::<u16>()
                .context("PORT must be a valid port number")?,
            rust_log: std::env::var("RUST_LOG").unwrap_or_else(|_| "info".to_string()),
            profiles_dir: std::env::var("PROFILES_DIR").unwrap_or_else(|_| "resumes".to_string()),
            prompts_dir: std::env::var("PROMPTS_DIR").unwrap_or_else(|_| "prompts".to_string()),
            anthropic_api_key: optional_env("ANTHROPIC_API_KEY"),
            openai_api_key: optional_env("OPENAI_API_KEY"),
            anthropic_model: optional_env("ANTHROPIC_MODEL"),
            openai_model: optional_env("OPENAI_MODEL"),
        })
    }
}

/// Returns `None` for unset OR empty variables, so `FOO=` in a `.env`
/// behaves like an absent key.
fn optional_env(key: &str) -> Option<String> {
    match std::env::var(key) {
        Ok(v) if !v.trim().is_empty() => Some(v),
        _ => None,
    }
}
