//! Trend points requested from the language model as strict JSON.

use std::sync::Arc;

use async_trait::async_trait;
use marketscope_core::{CapabilityError, Directive, TrendPoint, TrendSource};
use serde_json::Value;

use crate::client::{ChatRequest, OpenAiClient};
use crate::error::LlmError;

const CAPABILITY: &str = "trend model";

/// Number of points kept from a reply.
const TREND_POINTS: usize = 4;

const SYSTEM_PROMPT: &str = "You are a market trend analyst. Respond with JSON only.";

/// Asks the model for a handful of labeled 0-100 trend points.
///
/// The reply is parsed defensively; anything unusable is reported as an
/// error so the pipeline can fall back to its stub list.
pub struct LlmTrendSource {
    client: Arc<OpenAiClient>,
}

impl LlmTrendSource {
    #[must_use]
    pub fn new(client: Arc<OpenAiClient>) -> Self {
        Self { client }
    }

    fn user_prompt(directive: &Directive) -> String {
        format!(
            "Estimate current market trend signals for \"{directive}\". Return a JSON object \
             {{\"points\": [{{\"label\": string, \"value\": number 0-100, \"description\": string}}]}} \
             with exactly {TREND_POINTS} points: search interest, news momentum, social buzz, sentiment."
        )
    }
}

#[async_trait]
impl TrendSource for LlmTrendSource {
    async fn trends(&self, directive: &Directive) -> Result<Vec<TrendPoint>, CapabilityError> {
        let user = Self::user_prompt(directive);
        let request = ChatRequest {
            system: SYSTEM_PROMPT,
            user: &user,
            temperature: 0.2,
            max_tokens: 300,
            json_output: true,
        };
        let reply = self
            .client
            .complete(&request)
            .await
            .map_err(|e| e.into_capability(CAPABILITY))?;
        parse_trend_reply(&reply).map_err(|e| e.into_capability(CAPABILITY))
    }
}

/// Parse a model reply into trend points.
///
/// Accepts `{"points": [...]}`, any object holding a single array, or a bare
/// array, optionally wrapped in a Markdown code fence. Entries need a
/// non-empty `label` and a numeric (or numeric-string) `value`; others are
/// skipped. Values are clamped to 0-100.
///
/// # Errors
///
/// Returns [`LlmError::Malformed`] if the text is not JSON or yields no points.
pub fn parse_trend_reply(reply: &str) -> Result<Vec<TrendPoint>, LlmError> {
    let json: Value = serde_json::from_str(strip_code_fence(reply))
        .map_err(|e| LlmError::Malformed(format!("trend reply is not JSON: {e}")))?;

    let items: &[Value] = match &json {
        Value::Array(items) => items.as_slice(),
        Value::Object(map) => map
            .get("points")
            .and_then(Value::as_array)
            .or_else(|| map.values().find_map(Value::as_array))
            .map(Vec::as_slice)
            .unwrap_or_default(),
        _ => &[],
    };

    let points: Vec<TrendPoint> = items
        .iter()
        .filter_map(point_from_value)
        .take(TREND_POINTS)
        .collect();

    if points.is_empty() {
        return Err(LlmError::Malformed(
            "trend reply contained no usable points".to_string(),
        ));
    }
    Ok(points)
}

fn point_from_value(item: &Value) -> Option<TrendPoint> {
    let label = item.get("label")?.as_str()?.trim();
    if label.is_empty() {
        return None;
    }
    let value = match item.get("value")? {
        Value::Number(n) => n.as_f64()?,
        Value::String(s) => s.trim().trim_end_matches('%').parse::<f64>().ok()?,
        _ => return None,
    };
    if !value.is_finite() {
        return None;
    }
    let description = item
        .get("description")
        .and_then(Value::as_str)
        .map(str::trim)
        .filter(|d| !d.is_empty())
        .map(str::to_string);
    Some(TrendPoint::new(label, value.clamp(0.0, 100.0), description))
}

fn strip_code_fence(reply: &str) -> &str {
    let trimmed = reply.trim();
    let Some(rest) = trimmed.strip_prefix("```") else {
        return trimmed;
    };
    // Drop an optional language tag on the opening fence line.
    let body = rest.split_once('\n').map_or(rest, |(_, body)| body);
    body.trim_end().trim_end_matches("```").trim()
}
