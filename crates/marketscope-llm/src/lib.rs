//! Hosted language-model capabilities for MarketScope.
//!
//! All calls go through [`OpenAiClient`], a minimal client for the
//! OpenAI-compatible `/chat/completions` endpoint.

pub mod client;
pub mod error;
pub mod summarizer;
pub mod trends;

pub use client::{ChatRequest, LlmSettings, OpenAiClient};
pub use error::LlmError;
pub use summarizer::OpenAiSummarizer;
pub use trends::LlmTrendSource;
