//! Integration tests for `GoogleNewsSource` using wiremock HTTP mocks.
//!
//! The mock server plays both the RSS search endpoint and the article pages
//! so thumbnail enrichment can be exercised without real network traffic.

use std::time::Duration;

use marketscope_core::{CapabilityError, Directive, NewsSource};
use marketscope_sources::{GoogleNewsSource, NewsSettings};
use wiremock::matchers::{method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn test_source(server: &MockServer, max_articles: usize) -> GoogleNewsSource {
    GoogleNewsSource::new(NewsSettings {
        feed_url: format!("{}/rss/search", server.uri()),
        max_articles,
        timeout_secs: 1,
        user_agent: "marketscope-test/0.1".to_string(),
        placeholder_image_url: "https://img.example.com/".to_string(),
    })
    .expect("failed to build test GoogleNewsSource")
}

fn acme() -> Directive {
    Directive::parse("Acme Corp").unwrap()
}

fn rss_with_items(items: &[(&str, String)]) -> String {
    let body: String = items
        .iter()
        .map(|(title, link)| {
            format!("<item><title>{title}</title><link>{link}</link><description>{title} - details</description></item>")
        })
        .collect();
    format!(r#"<?xml version="1.0" encoding="UTF-8"?><rss version="2.0"><channel><title>feed</title>{body}</channel></rss>"#)
}

async fn mount_feed(server: &MockServer, xml: String) {
    Mock::given(method("GET"))
        .and(path("/rss/search"))
        .and(query_param("q", "Acme Corp"))
        .respond_with(
            ResponseTemplate::new(200)
                .insert_header("content-type", "application/rss+xml")
                .set_body_string(xml),
        )
        .mount(server)
        .await;
}

#[tokio::test]
async fn articles_are_enriched_with_og_image_and_placeholder() {
    let server = MockServer::start().await;
    let base = server.uri();

    mount_feed(
        &server,
        rss_with_items(&[
            ("Acme expands", format!("{base}/story/1")),
            ("Acme recalls widgets", format!("{base}/story/2")),
        ]),
    )
    .await;

    Mock::given(method("GET"))
        .and(path("/story/1"))
        .respond_with(ResponseTemplate::new(200).set_body_string(
            r#"<html><head><meta property="og:image" content="/img/hero.jpg"></head></html>"#,
        ))
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/story/2"))
        .respond_with(ResponseTemplate::new(500))
        .mount(&server)
        .await;

    let articles = test_source(&server, 3)
        .articles(&acme())
        .await
        .expect("feed should parse");

    assert_eq!(articles.len(), 2);
    assert_eq!(articles[0].title, "Acme expands");
    assert_eq!(articles[0].url, format!("{base}/story/1"));
    assert_eq!(
        articles[0].thumbnail.as_deref(),
        Some(format!("{base}/img/hero.jpg").as_str())
    );
    assert_eq!(articles[0].summary.as_deref(), Some("Acme expands - details"));

    assert_eq!(articles[1].title, "Acme recalls widgets");
    assert_eq!(
        articles[1].thumbnail.as_deref(),
        Some("https://img.example.com/?Acme%2Crecalls"),
        "failed page fetch must fall back to placeholder image"
    );
}

#[tokio::test]
async fn slow_article_page_degrades_to_placeholder_without_failing() {
    let server = MockServer::start().await;
    let base = server.uri();

    mount_feed(
        &server,
        rss_with_items(&[("Acme slow page", format!("{base}/story/slow"))]),
    )
    .await;
    Mock::given(method("GET"))
        .and(path("/story/slow"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_delay(Duration::from_secs(3))
                .set_body_string(r#"<meta property="og:image" content="/never.jpg">"#),
        )
        .mount(&server)
        .await;

    let articles = test_source(&server, 3)
        .articles(&acme())
        .await
        .expect("feed should parse");

    assert_eq!(articles.len(), 1);
    assert_eq!(
        articles[0].thumbnail.as_deref(),
        Some("https://img.example.com/?Acme%2Cslow")
    );
}

#[tokio::test]
async fn feed_is_truncated_to_max_articles() {
    let server = MockServer::start().await;
    let base = server.uri();
    let items: Vec<(&str, String)> = (0..6)
        .map(|i| ("Acme headline", format!("{base}/story/{i}")))
        .collect();
    mount_feed(&server, rss_with_items(&items)).await;

    let articles = test_source(&server, 2).articles(&acme()).await.unwrap();
    assert_eq!(articles.len(), 2);
    assert_eq!(articles[1].url, format!("{base}/story/1"));
}

#[tokio::test]
async fn empty_feed_returns_empty_vec() {
    let server = MockServer::start().await;
    mount_feed(&server, rss_with_items(&[])).await;

    let articles = test_source(&server, 3).articles(&acme()).await.unwrap();
    assert!(articles.is_empty());
}

#[tokio::test]
async fn feed_error_status_is_reported() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/rss/search"))
        .respond_with(ResponseTemplate::new(503))
        .mount(&server)
        .await;

    let err = test_source(&server, 3)
        .articles(&acme())
        .await
        .expect_err("503 must surface as an error");
    assert!(
        matches!(err, CapabilityError::Status { status: 503, .. }),
        "unexpected error: {err:?}"
    );
}

#[tokio::test]
async fn feed_timeout_is_reported_as_timeout() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/rss/search"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_delay(Duration::from_secs(3))
                .set_body_string(rss_with_items(&[])),
        )
        .mount(&server)
        .await;

    let err = test_source(&server, 3)
        .articles(&acme())
        .await
        .expect_err("slow feed must time out");
    assert!(
        matches!(err, CapabilityError::Timeout { .. }),
        "unexpected error: {err:?}"
    );
}
