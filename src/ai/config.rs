//! Gemini configuration parsed from environment variables.

use super::types::AiError;

pub const DEFAULT_GEMINI_BASE_URL: &str = "https://generativelanguage.googleapis.com";
/// Only model currently supporting the maps-grounding tool.
pub const DEFAULT_GEMINI_MODEL: &str = "gemini-2.5-flash";
pub const DEFAULT_REQUEST_TIMEOUT_SECS: u64 = 30;
pub const DEFAULT_CONNECT_TIMEOUT_SECS: u64 = 10;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GeminiTimeouts {
    pub request_secs: u64,
    pub connect_secs: u64,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GeminiConfig {
    pub api_key: String,
    pub model: String,
    pub base_url: String,
    pub timeouts: GeminiTimeouts,
}

impl GeminiConfig {
    /// Build typed Gemini config from environment variables.
    ///
    /// Required:
    /// - `GEMINI_API_KEY`
    ///
    /// Optional:
    /// - `GEMINI_MODEL`: default `gemini-2.5-flash`
    /// - `GEMINI_BASE_URL`: default Google API base URL
    /// - `GEMINI_REQUEST_TIMEOUT_SECS`: default 30
    /// - `GEMINI_CONNECT_TIMEOUT_SECS`: default 10
    ///
    /// # Errors
    ///
    /// Returns [`AiError::MissingApiKey`] when `GEMINI_API_KEY` is unset.
    pub fn from_env() -> Result<Self, AiError> {
        let api_key = std::env::var("GEMINI_API_KEY")
            .map_err(|_| AiError::MissingApiKey { var: "GEMINI_API_KEY".into() })?;

        let model =
            std::env::var("GEMINI_MODEL").unwrap_or_else(|_| DEFAULT_GEMINI_MODEL.to_string());
        let base_url = normalize_base_url(std::env::var("GEMINI_BASE_URL").ok().as_deref());
        let timeouts = GeminiTimeouts {
            request_secs: parse_secs(
                std::env::var("GEMINI_REQUEST_TIMEOUT_SECS").ok().as_deref(),
                DEFAULT_REQUEST_TIMEOUT_SECS,
            ),
            connect_secs: parse_secs(
                std::env::var("GEMINI_CONNECT_TIMEOUT_SECS").ok().as_deref(),
                DEFAULT_CONNECT_TIMEOUT_SECS,
            ),
        };

        Ok(Self { api_key, model, base_url, timeouts })
    }
}

fn normalize_base_url(raw: Option<&str>) -> String {
    raw.unwrap_or(DEFAULT_GEMINI_BASE_URL)
        .trim_end_matches('/')
        .to_string()
}

fn parse_secs(raw: Option<&str>, default: u64) -> u64 {
    raw.and_then(|v| v.parse::<u64>().ok()).unwrap_or(default)
}

#[cfg(test)]
#[path = "config_test.rs"]
mod tests;
