//! Article thumbnail discovery.

use std::sync::LazyLock;

use percent_encoding::{utf8_percent_encode, NON_ALPHANUMERIC};
use regex::Regex;

use crate::error::SourceError;

static IMG_TAG_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?is)<img\b[^>]*>").expect("valid regex"));
static META_TAG_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?is)<meta\b[^>]*>").expect("valid regex"));

const DEFAULT_IMAGE_QUERY: &str = "finance,news";

/// Fetch `page_url` and return its best thumbnail, if any.
///
/// # Errors
///
/// Returns [`SourceError`] on network failure, timeout, or non-2xx status.
pub(crate) async fn fetch_thumbnail(
    client: &reqwest::Client,
    page_url: &str,
) -> Result<Option<String>, SourceError> {
    let response = client
        .get(page_url)
        .header(reqwest::header::ACCEPT, "text/html,application/xhtml+xml")
        .send()
        .await?;
    if !response.status().is_success() {
        return Err(SourceError::UnexpectedStatus {
            status: response.status().as_u16(),
            url: page_url.to_string(),
        });
    }
    // Redirects (news aggregators) change the base for relative image paths.
    let base = response.url().to_string();
    let body = response.text().await?;
    Ok(extract_thumbnail(&base, &body))
}

/// `og:image` first, then `twitter:image`, then the first `<img src>`.
pub(crate) fn extract_thumbnail(base_url: &str, html: &str) -> Option<String> {
    find_meta_content(html, "property", "og:image")
        .or_else(|| find_meta_content(html, "name", "twitter:image"))
        .and_then(|raw| absolutize_url(base_url, &raw))
        .or_else(|| {
            IMG_TAG_RE.find_iter(html).find_map(|m| {
                extract_attr(m.as_str(), "src")
                    .filter(|src| !src.starts_with("data:"))
                    .and_then(|raw| absolutize_url(base_url, &raw))
            })
        })
}

/// Placeholder image search URL keyed on up to two meaningful title words.
pub(crate) fn placeholder_image_url(search_base: &str, title: &str) -> String {
    let words = title
        .split_whitespace()
        .map(|w| w.trim_matches(|c: char| !c.is_alphanumeric()))
        .filter(|w| w.chars().count() > 3)
        .take(2)
        .collect::<Vec<_>>()
        .join(",");
    let query = if words.is_empty() {
        DEFAULT_IMAGE_QUERY
    } else {
        words.as_str()
    };
    format!(
        "{search_base}?{}",
        utf8_percent_encode(query, NON_ALPHANUMERIC)
    )
}

fn find_meta_content(html: &str, key_attr: &str, key_value: &str) -> Option<String> {
    META_TAG_RE.find_iter(html).find_map(|m| {
        let tag = m.as_str();
        let key = extract_attr(tag, key_attr)?;
        if key.eq_ignore_ascii_case(key_value) {
            extract_attr(tag, "content")
        } else {
            None
        }
    })
}

fn extract_attr(tag: &str, attr: &str) -> Option<String> {
    let pattern = format!(r#"(?is)\b{}\s*=\s*["']([^"']+)["']"#, regex::escape(attr));
    let re = Regex::new(&pattern).expect("valid attr regex");
    re.captures(tag)
        .and_then(|c| c.get(1).map(|m| m.as_str().trim().to_string()))
}

fn absolutize_url(base_url: &str, candidate: &str) -> Option<String> {
    let candidate = candidate.replace("&amp;", "&");
    let base = reqwest::Url::parse(base_url).ok()?;
    base.join(&candidate).ok().map(|u| u.to_string())
}
