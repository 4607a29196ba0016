//! OpenAI-compatible upstream provider
//!
//! Works with any API that implements the OpenAI chat completions format:
//! OpenAI itself, Groq, vLLM, LM Studio, LocalAI, and so on. The relay
//! forwards the accumulated conversation in one non-streaming request and
//! hands back `choices[0].message`.

use reqwest::Client;
use serde::{Deserialize, Serialize};

use crate::conversation::Message;

use super::ProviderError;

/// Chat completion request. `messages` is the full session history, not
/// just the latest turn, so the model sees complete context.
#[derive(Debug, Serialize)]
struct ChatCompletionRequest<'a> {
    model: &'a str,
    messages: &'a [Message],
    stream: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    max_tokens: Option<u32>,
}

// `choices` defaults to empty so that a 200 body holding only a provider
// error envelope still parses and reaches the envelope fallback below.
#[derive(Debug, Deserialize)]
struct ChatCompletionResponse {
    #[serde(default)]
    choices: Vec<Choice>,
}

#[derive(Debug, Deserialize)]
struct Choice {
    message: Message,
}

/// Error envelope some providers return in place of a completion.
#[derive(Debug, Deserialize)]
struct ErrorResponse {
    error: ApiError,
}

#[derive(Debug, Deserialize)]
struct ApiError {
    message: String,
    #[serde(rename = "type")]
    #[allow(dead_code)]
    error_type: Option<String>,
}

/// Upstream connection settings
#[derive(Debug, Clone)]
pub struct UpstreamConfig {
    /// Base URL for the API (e.g., https://api.openai.com/v1)
    pub base_url: String,
    /// API key (optional for local servers)
    pub api_key: Option<String>,
    /// Optional cap on completion length, forwarded as `max_tokens`
    pub max_tokens: Option<u32>,
    /// Request timeout in seconds
    pub timeout_secs: u64,
}

impl Default for UpstreamConfig {
    fn default() -> Self {
        Self {
            base_url: "https://api.openai.com/v1".to_string(),
            api_key: None,
            max_tokens: None,
            timeout_secs: 120,
        }
    }
}

/// OpenAI-compatible API provider
pub struct OpenAICompatProvider {
    config: UpstreamConfig,
    client: Client,
}

impl OpenAICompatProvider {
    /// Create a new provider with the given configuration
    pub fn new(config: UpstreamConfig) -> Self {
        let client = Client::builder()
            .timeout(std::time::Duration::from_secs(config.timeout_secs))
            .build()
            .expect("Failed to build HTTP client");

        Self { config, client }
    }

    /// Send a chat completion request and return the assistant message.
    pub async fn chat(&self, messages: &[Message], model: &str) -> Result<Message, ProviderError> {
        let url = format!("{}/chat/completions", self.config.base_url);

        let request = ChatCompletionRequest {
            model,
            messages,
            stream: false,
            max_tokens: self.config.max_tokens,
        };

        tracing::debug!(
            model,
            message_count = messages.len(),
            "sending chat completion request upstream"
        );

        let mut req_builder = self.client.post(&url);

        if let Some(ref api_key) = self.config.api_key {
            req_builder = req_builder.header("Authorization", format!("Bearer {}", api_key));
        }

        let response = req_builder
            .header("Content-Type", "application/json")
            .json(&request)
            .send()
            .await?;

        let status = response.status();
        let body = response.text().await?;

        if !status.is_success() {
            tracing::warn!(status = status.as_u16(), "upstream returned an error");
            return Err(ProviderError::Upstream {
                status: status.as_u16(),
                body,
            });
        }

        let completion: ChatCompletionResponse = serde_json::from_str(&body).map_err(|e| {
            ProviderError::InvalidResponse(format!("failed to parse upstream response: {}", e))
        })?;

        let choice = completion.choices.into_iter().next().ok_or_else(|| {
            // Some providers put their error envelope in a 200 body.
            match serde_json::from_str::<ErrorResponse>(&body) {
                Ok(envelope) => ProviderError::NoCompletion(envelope.error.message),
                Err(_) => ProviderError::NoCompletion("no choices in response".to_string()),
            }
        })?;

        Ok(choice.message)
    }
}
