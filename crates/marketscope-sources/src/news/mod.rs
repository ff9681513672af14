//! Google News RSS collector.

mod feed;
mod thumbnail;

use std::time::Duration;

use async_trait::async_trait;
use futures::future::join_all;
use marketscope_core::{AppConfig, Article, CapabilityError, Directive, NewsSource, MAX_ARTICLES};

use crate::error::SourceError;
use feed::{parse_rss_feed, resolve_article_url, snippet, FeedEntry};
use thumbnail::{fetch_thumbnail, placeholder_image_url};

/// Settings for [`GoogleNewsSource`].
#[derive(Debug, Clone)]
pub struct NewsSettings {
    /// RSS search endpoint; the query string is appended.
    pub feed_url: String,
    /// Articles kept per report, clamped to `1..=MAX_ARTICLES`.
    pub max_articles: usize,
    /// Timeout applied to every outbound request.
    pub timeout_secs: u64,
    pub user_agent: String,
    /// Base URL for placeholder image searches.
    pub placeholder_image_url: String,
}

impl NewsSettings {
    #[must_use]
    pub fn from_app_config(config: &AppConfig) -> Self {
        Self {
            feed_url: config.news_feed_url.clone(),
            max_articles: config.max_articles,
            timeout_secs: config.fetch_timeout_secs,
            user_agent: config.user_agent.clone(),
            placeholder_image_url: config.placeholder_image_url.clone(),
        }
    }
}

/// News collector backed by a Google News style RSS search endpoint.
///
/// The feed fetch is the only call whose failure is reported; thumbnail
/// lookups run concurrently and fall back to a placeholder image URL.
pub struct GoogleNewsSource {
    client: reqwest::Client,
    feed_url: reqwest::Url,
    settings: NewsSettings,
}

impl GoogleNewsSource {
    /// Creates a source with the configured timeout and `User-Agent`.
    ///
    /// # Errors
    ///
    /// Returns [`SourceError::InvalidFeedUrl`] if the feed URL does not parse,
    /// or [`SourceError::Http`] if the underlying `reqwest::Client` cannot be
    /// constructed.
    pub fn new(settings: NewsSettings) -> Result<Self, SourceError> {
        let feed_url =
            reqwest::Url::parse(&settings.feed_url).map_err(|e| SourceError::InvalidFeedUrl {
                url: settings.feed_url.clone(),
                reason: e.to_string(),
            })?;
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(settings.timeout_secs))
            .connect_timeout(Duration::from_secs(settings.timeout_secs.min(5)))
            .user_agent(settings.user_agent.as_str())
            .build()?;
        Ok(Self {
            client,
            feed_url,
            settings,
        })
    }

    /// Search URL for `directive`; query pairs already on the feed URL are kept.
    fn search_url(&self, directive: &Directive) -> reqwest::Url {
        let mut url = self.feed_url.clone();
        url.query_pairs_mut()
            .append_pair("q", directive.as_str())
            .append_pair("hl", "en-US")
            .append_pair("gl", "US")
            .append_pair("ceid", "US:en");
        url
    }

    /// Fetch and parse the feed, without enrichment.
    ///
    /// # Errors
    ///
    /// Returns [`SourceError`] on network failure, non-2xx status, or
    /// malformed XML.
    async fn fetch_entries(&self, directive: &Directive) -> Result<Vec<FeedEntry>, SourceError> {
        let url = self.search_url(directive);
        let response = self.client.get(url.clone()).send().await?;
        if !response.status().is_success() {
            return Err(SourceError::UnexpectedStatus {
                status: response.status().as_u16(),
                url: url.to_string(),
            });
        }
        let body = response.text().await?;
        let limit = self.settings.max_articles.clamp(1, MAX_ARTICLES);
        parse_rss_feed(&body, limit)
    }

    async fn enrich(&self, entry: FeedEntry) -> Article {
        let url = resolve_article_url(&entry.link);
        let fallback = || placeholder_image_url(&self.settings.placeholder_image_url, &entry.title);

        let thumbnail = match fetch_thumbnail(&self.client, &url).await {
            Ok(Some(found)) => found,
            Ok(None) => fallback(),
            Err(e) => {
                tracing::debug!(url = %url, error = %e, "thumbnail fetch failed, using placeholder");
                fallback()
            }
        };

        Article {
            summary: snippet(&entry.description, &entry.title),
            title: entry.title,
            url,
            thumbnail: Some(thumbnail),
        }
    }
}

#[async_trait]
impl NewsSource for GoogleNewsSource {
    async fn articles(&self, directive: &Directive) -> Result<Vec<Article>, CapabilityError> {
        let entries = self.fetch_entries(directive).await?;
        tracing::debug!(
            directive = %directive,
            count = entries.len(),
            "collected feed entries"
        );
        // join_all keeps feed order regardless of which page answers first.
        Ok(join_all(entries.into_iter().map(|entry| self.enrich(entry))).await)
    }
}
