use marketscope_core::CapabilityError;
use thiserror::Error;

/// Errors returned by the chat-completions client.
#[derive(Debug, Error)]
pub enum LlmError {
    /// Network, TLS, or timeout failure from the underlying HTTP client.
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// The API answered with a non-2xx status.
    #[error("API error {status}: {message}")]
    Api { status: u16, message: String },

    /// The response body could not be deserialized into the expected type.
    #[error("JSON deserialization error for {context}: {source}")]
    Deserialize {
        context: String,
        #[source]
        source: serde_json::Error,
    },

    /// The completion had no choices or no text content.
    #[error("model returned an empty reply")]
    EmptyReply,

    /// The reply text did not have the requested structure.
    #[error("unusable model reply: {0}")]
    Malformed(String),
}

impl LlmError {
    /// Convert into the pipeline-facing error, naming the calling capability.
    #[must_use]
    pub fn into_capability(self, capability: &'static str) -> CapabilityError {
        match self {
            LlmError::Http(e) if e.is_timeout() => CapabilityError::Timeout { capability },
            LlmError::Http(e) => CapabilityError::Request {
                capability,
                message: e.to_string(),
            },
            LlmError::Api { status, message } => CapabilityError::Request {
                capability,
                message: format!("HTTP {status}: {message}"),
            },
            LlmError::Deserialize { .. } | LlmError::EmptyReply | LlmError::Malformed(_) => {
                CapabilityError::Malformed {
                    capability,
                    message: self.to_string(),
                }
            }
        }
    }
}
