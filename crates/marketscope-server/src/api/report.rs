//! Directive submission and usage handlers, with JSON/HTML negotiation.

use axum::{
    body::Bytes,
    extract::{FromRequest, Query, Request, State},
    http::{header, HeaderMap, StatusCode},
    response::{Html, IntoResponse, Response},
    Extension, Form, Json,
};
use marketscope_core::{Directive, SummaryStyle};
use serde::{Deserialize, Serialize};

use super::{ApiError, AppState};
use crate::middleware::RequestId;
use crate::render;

const USAGE_MESSAGE: &str = "POST JSON { 'directive': '...' } to /";

/// Body of a report request, JSON or form-encoded.
#[derive(Debug, Default, Deserialize)]
pub(super) struct ReportRequest {
    #[serde(default)]
    pub directive: String,
    #[serde(default)]
    pub summary_style: Option<SummaryStyle>,
}

/// `?format=html` / `?format=json` override for content negotiation.
#[derive(Debug, Default, Deserialize)]
pub(super) struct FormatQuery {
    pub format: Option<String>,
}

#[derive(Debug, Serialize)]
struct UsageMessage {
    message: &'static str,
}

impl FormatQuery {
    /// HTML when forced by `?format=`, otherwise when `Accept` prefers it.
    fn wants_html(&self, headers: &HeaderMap) -> bool {
        match self.format.as_deref().map(str::to_ascii_lowercase).as_deref() {
            Some("html") => true,
            Some("json") => false,
            _ => headers
                .get(header::ACCEPT)
                .and_then(|v| v.to_str().ok())
                .is_some_and(accept_prefers_html),
        }
    }
}

/// True when `text/html` carries a strictly higher quality than
/// `application/json`. Wildcards count for neither.
fn accept_prefers_html(accept: &str) -> bool {
    let mut html_q = 0.0_f32;
    let mut json_q = 0.0_f32;
    for entry in accept.split(',') {
        let mut parts = entry.split(';');
        let media = parts.next().unwrap_or("").trim().to_ascii_lowercase();
        let q = parts
            .filter_map(|p| p.trim().strip_prefix("q="))
            .find_map(|q| q.trim().parse::<f32>().ok())
            .unwrap_or(1.0);
        match media.as_str() {
            "text/html" | "application/xhtml+xml" => html_q = html_q.max(q),
            "application/json" => json_q = json_q.max(q),
            _ => {}
        }
    }
    html_q > json_q
}

fn is_form_body(headers: &HeaderMap) -> bool {
    headers
        .get(header::CONTENT_TYPE)
        .and_then(|v| v.to_str().ok())
        .is_some_and(|ct| {
            ct.trim()
                .to_ascii_lowercase()
                .starts_with("application/x-www-form-urlencoded")
        })
}

/// `GET /`: usage hint, or the directive form for browsers.
pub(super) async fn usage(Query(query): Query<FormatQuery>, headers: HeaderMap) -> Response {
    if query.wants_html(&headers) {
        Html(render::usage_page(None)).into_response()
    } else {
        Json(UsageMessage {
            message: USAGE_MESSAGE,
        })
        .into_response()
    }
}

/// `POST /`: validate the directive, run the pipeline, render the report.
///
/// Rejections (unparseable body, empty directive) return 400 before any
/// stage runs.
pub(super) async fn create_report(
    State(state): State<AppState>,
    Extension(req_id): Extension<RequestId>,
    Query(query): Query<FormatQuery>,
    request: Request,
) -> Response {
    let is_form = is_form_body(request.headers());
    let html = is_form || query.wants_html(request.headers());

    let body = match read_body(request, &state, is_form).await {
        Ok(body) => body,
        Err(message) => return reject(&req_id, html, "bad_request", &message),
    };

    let directive = match Directive::parse(&body.directive) {
        Ok(d) => d,
        Err(e) => return reject(&req_id, html, "validation_error", &e.to_string()),
    };
    let style = body.summary_style.unwrap_or_default();

    tracing::info!(
        request_id = %req_id.0,
        directive = %directive,
        style = ?style,
        html,
        "report requested"
    );

    let report = state.pipeline.run(&directive, style).await;

    if html {
        Html(render::report_page(&report)).into_response()
    } else {
        Json(report).into_response()
    }
}

async fn read_body(
    request: Request,
    state: &AppState,
    is_form: bool,
) -> Result<ReportRequest, String> {
    if is_form {
        return Form::<ReportRequest>::from_request(request, state)
            .await
            .map(|Form(body)| body)
            .map_err(|e| e.body_text());
    }

    // JSON is accepted with or without a JSON content type.
    let bytes = Bytes::from_request(request, state)
        .await
        .map_err(|e| e.body_text())?;
    if bytes.iter().all(u8::is_ascii_whitespace) {
        return Ok(ReportRequest::default());
    }
    serde_json::from_slice(&bytes).map_err(|e| format!("invalid JSON body: {e}"))
}

fn reject(req_id: &RequestId, html: bool, code: &str, message: &str) -> Response {
    tracing::debug!(request_id = %req_id.0, code, message, "request rejected");
    if html {
        (
            StatusCode::BAD_REQUEST,
            Html(render::usage_page(Some(message))),
        )
            .into_response()
    } else {
        ApiError::new(req_id.0.clone(), code, message).into_response()
    }
}
