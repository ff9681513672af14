use serde::{Deserialize, Serialize};

use crate::error::DirectiveError;

/// Upper bound on articles returned in a report, regardless of configuration.
pub const MAX_ARTICLES: usize = 5;

/// A validated, trimmed, non-empty user topic.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
#[serde(transparent)]
pub struct Directive(String);

impl Directive {
    /// Trim `raw` and wrap it.
    ///
    /// # Errors
    ///
    /// Returns [`DirectiveError::Empty`] when nothing is left after trimming.
    pub fn parse(raw: &str) -> Result<Self, DirectiveError> {
        let trimmed = raw.trim();
        if trimmed.is_empty() {
            return Err(DirectiveError::Empty);
        }
        Ok(Self(trimmed.to_string()))
    }

    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for Directive {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

/// One news item surfaced by the collector.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Article {
    pub title: String,
    pub url: String,
    /// Page image (OG image, first `<img>`, or a placeholder search URL).
    pub thumbnail: Option<String>,
    /// Plain-text snippet from the feed description, when the feed has one.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub summary: Option<String>,
}

impl Article {
    /// Stand-in item used when the feed produced nothing for `directive`.
    #[must_use]
    pub fn placeholder(directive: &Directive) -> Self {
        Self {
            title: format!("No recent news found for \"{directive}\""),
            url: String::new(),
            thumbnail: None,
            summary: Some(
                "The news feed returned no entries for this topic. Try a broader or \
                 differently worded directive."
                    .to_string(),
            ),
        }
    }

    /// Stand-in item used when the feed request itself failed.
    #[must_use]
    pub fn feed_unavailable(directive: &Directive) -> Self {
        Self {
            title: format!("News for \"{directive}\" is temporarily unavailable"),
            url: String::new(),
            thumbnail: None,
            summary: Some(
                "The news feed could not be reached. Try again in a moment.".to_string(),
            ),
        }
    }
}

/// A labeled trend data point.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TrendPoint {
    pub label: String,
    pub value: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

impl TrendPoint {
    #[must_use]
    pub fn new(label: impl Into<String>, value: f64, description: Option<String>) -> Self {
        Self {
            label: label.into(),
            value,
            description,
        }
    }

    /// Fixed list returned when the trend stage cannot produce real points.
    #[must_use]
    pub fn fallback_points() -> Vec<Self> {
        vec![
            Self::new(
                "Search interest",
                0.0,
                Some("trend data unavailable".to_string()),
            ),
            Self::new("News momentum", 0.0, None),
            Self::new("Social buzz", 0.0, None),
            Self::new("Sentiment", 50.0, Some("neutral".to_string())),
        ]
    }
}

/// Shape the caller wants the synthesized summary in.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SummaryStyle {
    #[default]
    Bullets,
    Paragraph,
}

/// Synthesized summary, serialized either as a JSON array or a plain string.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(untagged)]
pub enum Summary {
    Bullets(Vec<String>),
    Paragraph(String),
}

/// Response envelope for one directive.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Report {
    pub directive: Directive,
    pub web_monitor: Vec<Article>,
    pub trend_analyzer: Vec<TrendPoint>,
    pub summary_agent: Summary,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn directive_is_trimmed() {
        let d = Directive::parse("  Acme Corp \n").expect("valid directive");
        assert_eq!(d.as_str(), "Acme Corp");
    }

    #[test]
    fn empty_and_whitespace_directives_are_rejected() {
        assert_eq!(Directive::parse(""), Err(DirectiveError::Empty));
        assert_eq!(Directive::parse(" \t\n "), Err(DirectiveError::Empty));
    }

    #[test]
    fn directive_serializes_as_plain_string() {
        let d = Directive::parse("EV batteries").unwrap();
        assert_eq!(serde_json::to_string(&d).unwrap(), "\"EV batteries\"");
    }

    #[test]
    fn summary_bullets_serialize_as_array_and_paragraph_as_string() {
        let bullets = Summary::Bullets(vec!["a".into(), "b".into()]);
        assert_eq!(serde_json::to_string(&bullets).unwrap(), r#"["a","b"]"#);
        let para = Summary::Paragraph("hello".into());
        assert_eq!(serde_json::to_string(&para).unwrap(), r#""hello""#);
    }

    #[test]
    fn article_without_summary_omits_field_but_keeps_null_thumbnail() {
        let article = Article {
            title: "t".into(),
            url: "https://example.com".into(),
            thumbnail: None,
            summary: None,
        };
        let json = serde_json::to_value(&article).unwrap();
        assert!(json["thumbnail"].is_null());
        assert!(json.get("summary").is_none());
    }

    #[test]
    fn summary_style_parses_lowercase() {
        let style: SummaryStyle = serde_json::from_str("\"paragraph\"").unwrap();
        assert_eq!(style, SummaryStyle::Paragraph);
        assert_eq!(SummaryStyle::default(), SummaryStyle::Bullets);
    }

    #[test]
    fn placeholder_article_mentions_directive() {
        let d = Directive::parse("Acme").unwrap();
        let p = Article::placeholder(&d);
        assert!(p.title.contains("Acme"));
        assert!(p.summary.is_some());
    }
}
