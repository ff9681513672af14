//! Chat-completion backed [`Summarizer`].

use std::sync::Arc;

use async_trait::async_trait;
use marketscope_core::{AppConfig, CapabilityError, Summarizer, SummaryPrompt};

use crate::client::{ChatRequest, OpenAiClient};

const CAPABILITY: &str = "summary model";

pub struct OpenAiSummarizer {
    client: Arc<OpenAiClient>,
    temperature: f32,
    max_tokens: u32,
}

impl OpenAiSummarizer {
    #[must_use]
    pub fn new(client: Arc<OpenAiClient>, temperature: f32, max_tokens: u32) -> Self {
        Self {
            client,
            temperature,
            max_tokens,
        }
    }

    #[must_use]
    pub fn from_app_config(client: Arc<OpenAiClient>, config: &AppConfig) -> Self {
        Self::new(client, config.summary_temperature, config.summary_max_tokens)
    }
}

#[async_trait]
impl Summarizer for OpenAiSummarizer {
    async fn summarize(&self, prompt: &SummaryPrompt) -> Result<String, CapabilityError> {
        let request = ChatRequest {
            system: &prompt.system,
            user: &prompt.user,
            temperature: self.temperature,
            max_tokens: self.max_tokens,
            json_output: false,
        };
        self.client
            .complete(&request)
            .await
            .map_err(|e| e.into_capability(CAPABILITY))
    }
}
