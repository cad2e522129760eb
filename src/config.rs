//! Configuration management for planact.
//!
//! Configuration can be set via environment variables:
//! - `OPENAI_API_KEY` - Required. API key for the chat-completions endpoint.
//! - `OPENAI_BASE_URL` - Optional. Endpoint base URL. Defaults to `https://api.openai.com/v1`.
//! - `DEFAULT_MODEL` - Optional. Model used for planning and synthesis. Defaults to `gpt-4o`.
//! - `LLM_TEMPERATURE` - Optional. Sampling temperature. Defaults to `0`.
//! - `LLM_TIMEOUT_SECS` - Optional. Per-request timeout for model calls. Unset means none.
//! - `WIKIPEDIA_API_URL` - Optional. Defaults to `https://en.wikipedia.org/api/rest_v1`.
//! - `WOLFRAM_ALPHA_APPID` - Optional. Wolfram|Alpha application id. Defaults to empty.
//! - `WOLFRAM_API_URL` - Optional. Defaults to `https://api.wolframalpha.com`.
//! - `SQLITE_PATH` - Optional. Database used by the SQL tool. Defaults to `data.db`.
//!
//! The resulting [`Config`] is passed explicitly into the model client and each
//! tool; nothing writes back into the process environment.

use std::path::PathBuf;
use std::time::Duration;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Missing required environment variable: {0}")]
    MissingEnvVar(String),

    #[error("Invalid value for {0}: {1}")]
    InvalidValue(String, String),
}

/// Settings for the chat-completions endpoint.
#[derive(Debug, Clone)]
pub struct LlmConfig {
    /// Bearer token for the endpoint
    pub api_key: String,

    /// Base URL, without the `/chat/completions` suffix
    pub base_url: String,

    /// Model identifier used for both planning and synthesis
    pub model: String,

    /// Sampling temperature (0 = deterministic)
    pub temperature: f32,

    /// Request timeout; `None` leaves the call unbounded
    pub timeout: Option<Duration>,
}

/// Settings for the three built-in tools.
#[derive(Debug, Clone)]
pub struct ToolsConfig {
    /// Wikipedia REST API root
    pub wikipedia_api_url: String,

    /// Wolfram|Alpha API root
    pub wolfram_api_url: String,

    /// Wolfram|Alpha application id
    pub wolfram_app_id: String,

    /// SQLite database file for the SQL tool
    pub sqlite_path: PathBuf,
}

impl Default for ToolsConfig {
    fn default() -> Self {
        Self {
            wikipedia_api_url: "https://en.wikipedia.org/api/rest_v1".to_string(),
            wolfram_api_url: "https://api.wolframalpha.com".to_string(),
            wolfram_app_id: String::new(),
            sqlite_path: PathBuf::from("data.db"),
        }
    }
}

/// Agent configuration.
#[derive(Debug, Clone)]
pub struct Config {
    /// Model endpoint configuration
    pub llm: LlmConfig,

    /// Tool configuration
    pub tools: ToolsConfig,
}

impl Config {
    /// Load configuration from environment variables.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::MissingEnvVar` if `OPENAI_API_KEY` is not set, and
    /// `ConfigError::InvalidValue` if a numeric variable fails to parse.
    pub fn from_env() -> Result<Self, ConfigError> {
        let api_key = std::env::var("OPENAI_API_KEY")
            .map_err(|_| ConfigError::MissingEnvVar("OPENAI_API_KEY".to_string()))?;

        let base_url = std::env::var("OPENAI_BASE_URL")
            .unwrap_or_else(|_| "https://api.openai.com/v1".to_string());

        let model = std::env::var("DEFAULT_MODEL").unwrap_or_else(|_| "gpt-4o".to_string());

        let temperature = std::env::var("LLM_TEMPERATURE")
            .ok()
            .map(|v| parse_temperature(&v))
            .transpose()?
            .unwrap_or(0.0);

        let timeout = std::env::var("LLM_TIMEOUT_SECS")
            .ok()
            .map(|v| {
                v.trim()
                    .parse::<u64>()
                    .map(Duration::from_secs)
                    .map_err(|e| ConfigError::InvalidValue("LLM_TIMEOUT_SECS".to_string(), format!("{}", e)))
            })
            .transpose()?;

        let defaults = ToolsConfig::default();
        let tools = ToolsConfig {
            wikipedia_api_url: std::env::var("WIKIPEDIA_API_URL")
                .unwrap_or(defaults.wikipedia_api_url),
            wolfram_api_url: std::env::var("WOLFRAM_API_URL").unwrap_or(defaults.wolfram_api_url),
            wolfram_app_id: std::env::var("WOLFRAM_ALPHA_APPID").unwrap_or_default(),
            sqlite_path: std::env::var("SQLITE_PATH")
                .map(PathBuf::from)
                .unwrap_or(defaults.sqlite_path),
        };

        Ok(Self {
            llm: LlmConfig {
                api_key,
                base_url: trim_base_url(base_url),
                model,
                temperature,
                timeout,
            },
            tools,
        })
    }

    /// Create a config with default values (useful for testing).
    pub fn new(api_key: impl Into<String>) -> Self {
        Self {
            llm: LlmConfig {
                api_key: api_key.into(),
                base_url: "https://api.openai.com/v1".to_string(),
                model: "gpt-4o".to_string(),
                temperature: 0.0,
                timeout: None,
            },
            tools: ToolsConfig::default(),
        }
    }
}

fn parse_temperature(value: &str) -> Result<f32, ConfigError> {
    let parsed = value
        .trim()
        .parse::<f32>()
        .map_err(|e| ConfigError::InvalidValue("LLM_TEMPERATURE".to_string(), format!("{}", e)))?;
    if !(0.0..=2.0).contains(&parsed) {
        return Err(ConfigError::InvalidValue(
            "LLM_TEMPERATURE".to_string(),
            format!("expected a value between 0 and 2, got: {}", parsed),
        ));
    }
    Ok(parsed)
}

/// Strip trailing slashes so paths can be appended with `format!`.
pub(crate) fn trim_base_url(url: String) -> String {
    url.trim_end_matches('/').to_string()
}
