//! Chat-completions client for the commit message model.

use std::time::Duration;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::config::{GenerationConfig, request_timeout};
use crate::error::LlmError;

use super::retry::retry_with_backoff;

/// One completion call: system instruction, user text and sampling parameters.
#[derive(Debug, Clone, PartialEq)]
pub struct CompletionRequest {
    pub system_prompt: String,
    pub user_text: String,
    pub model: String,
    pub temperature: f32,
    pub max_tokens: u32,
    pub top_p: f32,
}

/// A text-completion service. Returns the raw model output, unparsed.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait CompletionClient: Send + Sync {
    async fn complete(&self, request: &CompletionRequest) -> Result<String, LlmError>;
}

#[derive(Serialize)]
struct ChatMessage<'a> {
    role: &'static str,
    content: &'a str,
}

#[derive(Serialize)]
struct ChatRequest<'a> {
    model: &'a str,
    messages: [ChatMessage<'a>; 2],
    temperature: f32,
    max_tokens: u32,
    top_p: f32,
    stream: bool,
}

impl<'a> From<&'a CompletionRequest> for ChatRequest<'a> {
    fn from(request: &'a CompletionRequest) -> Self {
        Self {
            model: &request.model,
            messages: [
                ChatMessage {
                    role: "system",
                    content: &request.system_prompt,
                },
                ChatMessage {
                    role: "user",
                    content: &request.user_text,
                },
            ],
            temperature: request.temperature,
            max_tokens: request.max_tokens,
            top_p: request.top_p,
            stream: false,
        }
    }
}

#[derive(Deserialize)]
struct ChatResponse {
    #[serde(default)]
    choices: Vec<ChatChoice>,
}

#[derive(Deserialize)]
struct ChatChoice {
    message: ChatChoiceMessage,
}

#[derive(Deserialize)]
struct ChatChoiceMessage {
    content: Option<String>,
}

/// Client for an OpenAI-compatible `/chat/completions` endpoint (Groq by default).
pub struct ChatClient {
    http: reqwest::Client,
    endpoint: String,
    api_key: String,
}

impl ChatClient {
    pub fn new(
        endpoint: impl Into<String>,
        api_key: impl Into<String>,
        timeout: Duration,
    ) -> Result<Self, LlmError> {
        let http = reqwest::Client::builder()
            .user_agent(concat!("autocommit/", env!("CARGO_PKG_VERSION")))
            .timeout(timeout)
            .build()
            .map_err(LlmError::ClientBuild)?;

        Ok(Self {
            http,
            endpoint: endpoint.into(),
            api_key: api_key.into(),
        })
    }

    /// Build a client for the endpoint and key in `config`.
    ///
    /// The request timeout comes from `AUTOCOMMIT_TIMEOUT` (default 60s).
    pub fn from_config(config: &GenerationConfig) -> Result<Self, LlmError> {
        Self::new(&config.endpoint, &config.api_key, request_timeout())
    }

    async fn send_once(&self, request: &CompletionRequest) -> Result<String, LlmError> {
        let body = ChatRequest::from(request);

        let response = self
            .http
            .post(&self.endpoint)
            .bearer_auth(&self.api_key)
            .json(&body)
            .send()
            .await
            .map_err(LlmError::Http)?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(LlmError::Status {
                status: status.as_u16(),
                body: body.chars().take(500).collect(),
            });
        }

        let text = response.text().await.map_err(LlmError::Http)?;
        let envelope: ChatResponse =
            serde_json::from_str(&text).map_err(|e| LlmError::InvalidEnvelope(e.to_string()))?;

        let content = envelope
            .choices
            .into_iter()
            .next()
            .and_then(|choice| choice.message.content)
            .ok_or(LlmError::EmptyChoices)?;

        debug!("Completion: {} chars", content.len());
        Ok(content)
    }
}

#[async_trait]
impl CompletionClient for ChatClient {
    async fn complete(&self, request: &CompletionRequest) -> Result<String, LlmError> {
        retry_with_backoff(
            || self.send_once(request),
            LlmError::is_transient,
            |e| LlmError::RetriesExhausted(Box::new(e)),
        )
        .await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn request() -> CompletionRequest {
        CompletionRequest {
            system_prompt: "You write commits.".to_string(),
            user_text: "+fn main() {}".to_string(),
            model: "llama-3.1-8b-instant".to_string(),
            temperature: 1.0,
            max_tokens: 512,
            top_p: 1.0,
        }
    }

    #[test]
    fn test_chat_request_shape() {
        let req = request();
        let value = serde_json::to_value(ChatRequest::from(&req)).unwrap();
        assert_eq!(value["model"], "llama-3.1-8b-instant");
        assert_eq!(value["messages"][0]["role"], "system");
        assert_eq!(value["messages"][0]["content"], "You write commits.");
        assert_eq!(value["messages"][1]["role"], "user");
        assert_eq!(value["messages"][1]["content"], "+fn main() {}");
        assert_eq!(value["max_tokens"], 512);
        assert_eq!(value["stream"], false);
    }

    #[test]
    fn test_transient_classification() {
        let rate_limited = LlmError::Status {
            status: 429,
            body: String::new(),
        };
        let server = LlmError::Status {
            status: 502,
            body: String::new(),
        };
        let unauthorized = LlmError::Status {
            status: 401,
            body: String::new(),
        };
        assert!(rate_limited.is_transient());
        assert!(server.is_transient());
        assert!(!unauthorized.is_transient());
        assert!(!LlmError::EmptyChoices.is_transient());
    }
}
