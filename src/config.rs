//! Configuration management for the ops assistant.
//!
//! Configuration can be set via environment variables:
//! - `GEMINI_API_KEY` - Required. API key for the planning model.
//! - `DEFAULT_MODEL` - Optional. Gemini model used for planning. Defaults to `gemini-2.0-flash`.
//! - `LLM_TEMPERATURE` - Optional. Sampling temperature. Defaults to `0.2`.
//! - `LLM_MAX_OUTPUT_TOKENS` - Optional. Output token cap. Defaults to `1000`.
//! - `NEWS_API_KEY` - Optional. NewsAPI key; the news tool fails at run time without it.
//! - `HOST` - Optional. Server host. Defaults to `127.0.0.1`.
//! - `PORT` - Optional. Server port. Defaults to `3000`.
//! - `TOOL_MAX_ATTEMPTS` - Optional. Attempts per outbound tool call. Defaults to `3`.
//! - `TOOL_RETRY_BASE_SECS` - Optional. First retry delay. Defaults to `2`.
//! - `TOOL_RETRY_MAX_SECS` - Optional. Retry delay cap. Defaults to `10`.

use std::str::FromStr;
use std::time::Duration;

use thiserror::Error;

use crate::tools::RetryPolicy;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Missing required environment variable: {0}")]
    MissingEnvVar(String),

    #[error("Invalid value for {0}: {1}")]
    InvalidValue(String, String),
}

/// Language-model settings.
#[derive(Debug, Clone)]
pub struct LlmConfig {
    /// Gemini API key
    pub api_key: String,

    /// Model identifier, e.g. `gemini-2.0-flash`
    pub model: String,

    pub temperature: f32,

    pub max_output_tokens: u32,
}

/// Assistant configuration.
#[derive(Debug, Clone)]
pub struct Config {
    /// Planning model settings
    pub llm: LlmConfig,

    /// NewsAPI key used by the news tool
    pub news_api_key: Option<String>,

    /// Server host
    pub host: String,

    /// Server port
    pub port: u16,

    /// Retry policy handed to tools for their outbound calls
    pub retry: RetryPolicy,
}

impl Config {
    /// Load configuration from environment variables.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::MissingEnvVar` if `GEMINI_API_KEY` is not set, and
    /// `ConfigError::InvalidValue` for unparseable numeric settings.
    pub fn from_env() -> Result<Self, ConfigError> {
        let api_key = std::env::var("GEMINI_API_KEY")
            .ok()
            .filter(|v| !v.trim().is_empty())
            .ok_or_else(|| ConfigError::MissingEnvVar("GEMINI_API_KEY".to_string()))?;

        let llm = LlmConfig {
            api_key,
            model: std::env::var("DEFAULT_MODEL")
                .unwrap_or_else(|_| "gemini-2.0-flash".to_string()),
            temperature: parse_env("LLM_TEMPERATURE", 0.2)?,
            max_output_tokens: parse_env("LLM_MAX_OUTPUT_TOKENS", 1000)?,
        };

        let news_api_key = std::env::var("NEWS_API_KEY")
            .ok()
            .filter(|v| !v.trim().is_empty());

        let host = std::env::var("HOST").unwrap_or_else(|_| "127.0.0.1".to_string());
        let port = parse_env("PORT", 3000)?;

        let max_attempts: u32 = parse_env("TOOL_MAX_ATTEMPTS", 3)?;
        if max_attempts == 0 {
            return Err(ConfigError::InvalidValue(
                "TOOL_MAX_ATTEMPTS".to_string(),
                "must be at least 1".to_string(),
            ));
        }
        let retry = RetryPolicy {
            max_attempts,
            base_delay: Duration::from_secs(parse_env("TOOL_RETRY_BASE_SECS", 2)?),
            max_delay: Duration::from_secs(parse_env("TOOL_RETRY_MAX_SECS", 10)?),
            ..RetryPolicy::default()
        };

        Ok(Self {
            llm,
            news_api_key,
            host,
            port,
            retry,
        })
    }

    /// Create a config with default values (useful for testing).
    pub fn new(api_key: String) -> Self {
        Self {
            llm: LlmConfig {
                api_key,
                model: "gemini-2.0-flash".to_string(),
                temperature: 0.2,
                max_output_tokens: 1000,
            },
            news_api_key: None,
            host: "127.0.0.1".to_string(),
            port: 3000,
            retry: RetryPolicy::default(),
        }
    }
}

/// Parse an optional environment variable, using `default` when it is unset.
fn parse_env<T>(key: &str, default: T) -> Result<T, ConfigError>
where
    T: FromStr,
    T::Err: std::fmt::Display,
{
    match std::env::var(key) {
        Ok(raw) => parse_value(key, &raw),
        Err(_) => Ok(default),
    }
}

fn parse_value<T>(key: &str, raw: &str) -> Result<T, ConfigError>
where
    T: FromStr,
    T::Err: std::fmt::Display,
{
    raw.trim()
        .parse()
        .map_err(|e: T::Err| ConfigError::InvalidValue(key.to_string(), e.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_value_trims_whitespace() {
        let port: u16 = parse_value("PORT", " 8080 ").unwrap();
        assert_eq!(port, 8080);
    }

    #[test]
    fn parse_value_reports_key() {
        let err = parse_value::<u16>("PORT", "eighty").unwrap_err();
        assert!(err.to_string().starts_with("Invalid value for PORT"));
    }

    #[test]
    fn new_uses_documented_defaults() {
        let config = Config::new("k".to_string());
        assert_eq!(config.llm.model, "gemini-2.0-flash");
        assert_eq!(config.llm.max_output_tokens, 1000);
        assert_eq!(config.port, 3000);
        assert_eq!(config.retry.max_attempts, 3);
        assert!(config.news_api_key.is_none());
    }
}
