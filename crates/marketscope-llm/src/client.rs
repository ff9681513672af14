//! Client for OpenAI-compatible chat completions.

use std::time::Duration;

use marketscope_core::AppConfig;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::error::LlmError;

/// Longest slice of an error body kept in [`LlmError::Api`].
const MAX_ERROR_BODY_CHARS: usize = 300;

/// Connection settings for [`OpenAiClient`].
#[derive(Clone)]
pub struct LlmSettings {
    /// API base, e.g. `https://api.openai.com/v1` (no trailing slash).
    pub base_url: String,
    pub api_key: String,
    pub model: String,
    pub timeout_secs: u64,
    pub user_agent: String,
}

impl std::fmt::Debug for LlmSettings {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("LlmSettings")
            .field("base_url", &self.base_url)
            .field("api_key", &"[redacted]")
            .field("model", &self.model)
            .field("timeout_secs", &self.timeout_secs)
            .field("user_agent", &self.user_agent)
            .finish()
    }
}

impl LlmSettings {
    #[must_use]
    pub fn from_app_config(config: &AppConfig) -> Self {
        Self {
            base_url: config.openai_base_url.clone(),
            api_key: config.openai_api_key.clone(),
            model: config.openai_model.clone(),
            timeout_secs: config.llm_timeout_secs,
            user_agent: config.user_agent.clone(),
        }
    }
}

/// One completion request: a system instruction plus a user message.
#[derive(Debug, Clone)]
pub struct ChatRequest<'a> {
    pub system: &'a str,
    pub user: &'a str,
    pub temperature: f32,
    pub max_tokens: u32,
    /// Ask the API to constrain output to a JSON object.
    pub json_output: bool,
}

#[derive(Serialize)]
struct ChatMessage<'a> {
    role: &'static str,
    content: &'a str,
}

#[derive(Serialize)]
struct ResponseFormat {
    #[serde(rename = "type")]
    kind: &'static str,
}

#[derive(Serialize)]
struct ChatCompletionBody<'a> {
    model: &'a str,
    messages: [ChatMessage<'a>; 2],
    temperature: f32,
    max_tokens: u32,
    #[serde(skip_serializing_if = "Option::is_none")]
    response_format: Option<ResponseFormat>,
}

#[derive(Deserialize)]
struct ChatCompletionResponse {
    #[serde(default)]
    choices: Vec<Choice>,
}

#[derive(Deserialize)]
struct Choice {
    message: AssistantMessage,
}

#[derive(Deserialize)]
struct AssistantMessage {
    #[serde(default)]
    content: Option<String>,
}

/// Minimal chat-completions client. No retries.
pub struct OpenAiClient {
    client: reqwest::Client,
    endpoint: String,
    api_key: String,
    model: String,
}

impl OpenAiClient {
    /// # Errors
    ///
    /// Returns [`LlmError::Http`] if the underlying `reqwest::Client` cannot
    /// be constructed.
    pub fn new(settings: LlmSettings) -> Result<Self, LlmError> {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(settings.timeout_secs))
            .connect_timeout(Duration::from_secs(10))
            .user_agent(settings.user_agent.as_str())
            .build()?;
        Ok(Self {
            client,
            endpoint: format!("{}/chat/completions", settings.base_url),
            api_key: settings.api_key,
            model: settings.model,
        })
    }

    /// Send one completion request and return the trimmed reply text.
    ///
    /// # Errors
    ///
    /// - [`LlmError::Http`] on network failure or timeout.
    /// - [`LlmError::Api`] on a non-2xx status, with the API's error message
    ///   when the body carries one.
    /// - [`LlmError::Deserialize`] if the body is not a completion response.
    /// - [`LlmError::EmptyReply`] if there is no text content.
    pub async fn complete(&self, request: &ChatRequest<'_>) -> Result<String, LlmError> {
        let body = ChatCompletionBody {
            model: &self.model,
            messages: [
                ChatMessage {
                    role: "system",
                    content: request.system,
                },
                ChatMessage {
                    role: "user",
                    content: request.user,
                },
            ],
            temperature: request.temperature,
            max_tokens: request.max_tokens,
            response_format: request.json_output.then_some(ResponseFormat {
                kind: "json_object",
            }),
        };

        let response = self
            .client
            .post(&self.endpoint)
            .bearer_auth(&self.api_key)
            .json(&body)
            .send()
            .await?;

        let status = response.status();
        let text = response.text().await?;

        if !status.is_success() {
            return Err(LlmError::Api {
                status: status.as_u16(),
                message: api_error_message(&text),
            });
        }

        let parsed: ChatCompletionResponse =
            serde_json::from_str(&text).map_err(|source| LlmError::Deserialize {
                context: "chat completion".to_string(),
                source,
            })?;

        let content = parsed
            .choices
            .into_iter()
            .next()
            .and_then(|choice| choice.message.content)
            .map(|c| c.trim().to_string())
            .filter(|c| !c.is_empty())
            .ok_or(LlmError::EmptyReply)?;

        tracing::debug!(model = %self.model, chars = content.len(), "completion received");
        Ok(content)
    }
}

/// Pull `error.message` out of an API error body, or fall back to the raw text.
fn api_error_message(body: &str) -> String {
    let from_json = serde_json::from_str::<Value>(body).ok().and_then(|v| {
        v.get("error")
            .and_then(|e| e.get("message").or(Some(e)))
            .and_then(Value::as_str)
            .map(str::to_string)
    });
    from_json.unwrap_or_else(|| body.trim().chars().take(MAX_ERROR_BODY_CHARS).collect())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn api_error_message_prefers_json_message() {
        let body = r#"{"error":{"message":"Incorrect API key provided","type":"invalid_request_error"}}"#;
        assert_eq!(api_error_message(body), "Incorrect API key provided");
    }

    #[test]
    fn api_error_message_accepts_string_error() {
        assert_eq!(api_error_message(r#"{"error":"model not found"}"#), "model not found");
    }

    #[test]
    fn api_error_message_falls_back_to_raw_body() {
        assert_eq!(api_error_message("  Bad Gateway \n"), "Bad Gateway");
    }

    #[test]
    fn settings_debug_redacts_key() {
        let settings = LlmSettings {
            base_url: "https://api.openai.com/v1".into(),
            api_key: "sk-secret".into(),
            model: "gpt-4o-mini".into(),
            timeout_secs: 30,
            user_agent: "ua".into(),
        };
        assert!(!format!("{settings:?}").contains("sk-secret"));
    }

    #[test]
    fn json_output_adds_response_format() {
        let body = ChatCompletionBody {
            model: "m",
            messages: [
                ChatMessage {
                    role: "system",
                    content: "s",
                },
                ChatMessage {
                    role: "user",
                    content: "u",
                },
            ],
            temperature: 0.2,
            max_tokens: 64,
            response_format: Some(ResponseFormat {
                kind: "json_object",
            }),
        };
        let json = serde_json::to_value(&body).unwrap();
        assert_eq!(json["response_format"]["type"], "json_object");
        assert_eq!(json["messages"][1]["role"], "user");
    }
}
