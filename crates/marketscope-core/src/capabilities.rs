//! Capability seams between the pipeline and the outside world.
//!
//! Real implementations are HTTP clients; tests substitute in-memory stubs.

use async_trait::async_trait;

use crate::error::CapabilityError;
use crate::prompt::SummaryPrompt;
use crate::types::{Article, Directive, TrendPoint};

/// Fetches news items about a directive.
#[async_trait]
pub trait NewsSource: Send + Sync {
    /// Return articles in feed order. An empty `Vec` means the feed had no
    /// entries; the pipeline substitutes a placeholder.
    async fn articles(&self, directive: &Directive) -> Result<Vec<Article>, CapabilityError>;
}

/// Produces labeled trend points for a directive.
#[async_trait]
pub trait TrendSource: Send + Sync {
    async fn trends(&self, directive: &Directive) -> Result<Vec<TrendPoint>, CapabilityError>;
}

/// Completes a summary prompt and returns the raw reply text.
#[async_trait]
pub trait Summarizer: Send + Sync {
    async fn summarize(&self, prompt: &SummaryPrompt) -> Result<String, CapabilityError>;
}
