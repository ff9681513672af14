//! Report pipeline orchestration.

use std::sync::Arc;

use crate::capabilities::{NewsSource, Summarizer, TrendSource};
use crate::outcome::Outcome;
use crate::prompt::{build_summary_prompt, error_summary, parse_summary_reply};
use crate::types::{
    Article, Directive, Report, Summary, SummaryStyle, TrendPoint, MAX_ARTICLES,
};

/// Runs collector, trend stage, and synthesizer for one directive.
///
/// Cheap to clone; capabilities are shared behind `Arc`.
#[derive(Clone)]
pub struct ReportPipeline {
    news: Arc<dyn NewsSource>,
    trends: Arc<dyn TrendSource>,
    summarizer: Arc<dyn Summarizer>,
}

impl ReportPipeline {
    #[must_use]
    pub fn new(
        news: Arc<dyn NewsSource>,
        trends: Arc<dyn TrendSource>,
        summarizer: Arc<dyn Summarizer>,
    ) -> Self {
        Self {
            news,
            trends,
            summarizer,
        }
    }

    /// Build the full report.
    ///
    /// 1. Fetch news and trends concurrently.
    /// 2. Once both resolve, build the prompt and request a summary.
    /// 3. Assemble the envelope.
    ///
    /// Never fails: every stage degrades to a default and the degradation is
    /// logged.
    pub async fn run(&self, directive: &Directive, style: SummaryStyle) -> Report {
        let (news, trends) = tokio::join!(
            self.collect_news(directive),
            self.collect_trends(directive)
        );

        log_degraded(directive, "news", &news);
        log_degraded(directive, "trends", &trends);

        let articles = news.into_value();
        let trend_points = trends.into_value();

        let summary = self
            .synthesize(directive, &articles, &trend_points, style)
            .await;
        log_degraded(directive, "summary", &summary);

        Report {
            directive: directive.clone(),
            web_monitor: articles,
            trend_analyzer: trend_points,
            summary_agent: summary.into_value(),
        }
    }

    async fn collect_news(&self, directive: &Directive) -> Outcome<Vec<Article>> {
        match self.news.articles(directive).await {
            Ok(mut articles) => {
                articles.truncate(MAX_ARTICLES);
                if articles.is_empty() {
                    articles.push(Article::placeholder(directive));
                }
                Outcome::Fresh(articles)
            }
            Err(e) => Outcome::Degraded {
                value: vec![Article::feed_unavailable(directive)],
                reason: e.to_string(),
            },
        }
    }

    async fn collect_trends(&self, directive: &Directive) -> Outcome<Vec<TrendPoint>> {
        match self.trends.trends(directive).await {
            Ok(points) if points.is_empty() => Outcome::Degraded {
                value: TrendPoint::fallback_points(),
                reason: "trend source returned no points".to_string(),
            },
            result => Outcome::from_result(result, TrendPoint::fallback_points),
        }
    }

    async fn synthesize(
        &self,
        directive: &Directive,
        articles: &[Article],
        trends: &[TrendPoint],
        style: SummaryStyle,
    ) -> Outcome<Summary> {
        let prompt = build_summary_prompt(directive, articles, trends);
        match self.summarizer.summarize(&prompt).await {
            Ok(reply) => Outcome::Fresh(parse_summary_reply(&reply, style)),
            Err(e) => {
                let reason = e.to_string();
                Outcome::Degraded {
                    value: error_summary(&reason, style),
                    reason,
                }
            }
        }
    }
}

fn log_degraded<T>(directive: &Directive, stage: &'static str, outcome: &Outcome<T>) {
    if let Some(reason) = outcome.reason() {
        tracing::warn!(
            directive = %directive,
            stage,
            error = %reason,
            "stage degraded, continuing with fallback"
        );
    }
}

#[cfg(test)]
#[path = "pipeline_test.rs"]
mod tests;
