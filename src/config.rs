//! Generation settings resolved once at startup.

use std::env;
use std::time::Duration;

use tracing::warn;

use crate::commit::prompt::SYSTEM_PROMPT;
use crate::error::ConfigError;

pub const DEFAULT_MODEL: &str = "llama-3.1-8b-instant";
pub const DEFAULT_ENDPOINT: &str = "https://api.groq.com/openai/v1/chat/completions";
pub const DEFAULT_TEMPERATURE: f32 = 1.0;
pub const DEFAULT_MAX_TOKENS: u32 = 512;
pub const DEFAULT_TOP_P: f32 = 1.0;
pub const DEFAULT_ATTEMPTS: usize = 3;

/// Upper bound on candidates per batch.
pub const MAX_ATTEMPTS: usize = 10;

/// Default timeout for a single completion request.
const DEFAULT_TIMEOUT_SECS: u64 = 60;

/// Environment variable to override the default request timeout.
const TIMEOUT_ENV_VAR: &str = "AUTOCOMMIT_TIMEOUT";

/// Everything the candidate generator needs to talk to the completion service.
#[derive(Debug, Clone)]
pub struct GenerationConfig {
    pub api_key: String,
    pub model: String,
    pub endpoint: String,
    pub system_prompt: String,
    pub temperature: f32,
    pub max_tokens: u32,
    pub top_p: f32,
    pub attempts: usize,
}

impl GenerationConfig {
    /// Build a config with default sampling parameters for the given key.
    pub fn new(api_key: impl Into<String>) -> Self {
        Self {
            api_key: api_key.into(),
            model: DEFAULT_MODEL.to_string(),
            endpoint: DEFAULT_ENDPOINT.to_string(),
            system_prompt: SYSTEM_PROMPT.to_string(),
            temperature: DEFAULT_TEMPERATURE,
            max_tokens: DEFAULT_MAX_TOKENS,
            top_p: DEFAULT_TOP_P,
            attempts: DEFAULT_ATTEMPTS,
        }
    }

    /// Check that every field is usable before any request is made.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.api_key.trim().is_empty() {
            return Err(ConfigError::MissingField {
                name: "api_key",
                hint: "--api-key or the GROQ_API_KEY environment variable",
            });
        }
        if self.model.trim().is_empty() {
            return Err(ConfigError::MissingField {
                name: "model",
                hint: "--model or the AUTOCOMMIT_MODEL environment variable",
            });
        }
        if self.system_prompt.trim().is_empty() {
            return Err(ConfigError::MissingField {
                name: "system_prompt",
                hint: "a non-empty system prompt",
            });
        }
        if !(1..=MAX_ATTEMPTS).contains(&self.attempts) {
            return Err(ConfigError::OutOfRange {
                name: "attempts",
                value: self.attempts.to_string(),
                expected: "1..=10",
            });
        }
        if !(0.0..=2.0).contains(&self.temperature) {
            return Err(ConfigError::OutOfRange {
                name: "temperature",
                value: self.temperature.to_string(),
                expected: "0.0..=2.0",
            });
        }
        if !(self.top_p > 0.0 && self.top_p <= 1.0) {
            return Err(ConfigError::OutOfRange {
                name: "top_p",
                value: self.top_p.to_string(),
                expected: "(0.0, 1.0]",
            });
        }
        if self.max_tokens == 0 {
            return Err(ConfigError::OutOfRange {
                name: "max_tokens",
                value: "0".to_string(),
                expected: "at least 1",
            });
        }
        Ok(())
    }
}

/// Get the configured request timeout.
///
/// Reads from AUTOCOMMIT_TIMEOUT if set, otherwise uses 60 seconds.
/// Invalid values are logged and replaced by the default.
pub fn request_timeout() -> Duration {
    match env::var(TIMEOUT_ENV_VAR) {
        Ok(v) if !v.is_empty() => match v.parse::<u64>() {
            Ok(secs) if secs > 0 => Duration::from_secs(secs),
            _ => {
                warn!(
                    "Invalid {} value '{}', using default {}s",
                    TIMEOUT_ENV_VAR, v, DEFAULT_TIMEOUT_SECS
                );
                Duration::from_secs(DEFAULT_TIMEOUT_SECS)
            }
        },
        _ => Duration::from_secs(DEFAULT_TIMEOUT_SECS),
    }
}
