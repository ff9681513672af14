//! RSS item extraction and link/description cleanup.

use quick_xml::events::Event;
use quick_xml::Reader;
use reqwest::Url;

use crate::error::SourceError;

/// Longest description snippet kept on an article, in characters.
const MAX_SNIPPET_CHARS: usize = 280;

/// One `<item>` from an RSS feed, before enrichment.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct FeedEntry {
    pub title: String,
    pub link: String,
    pub description: String,
}

/// Parse an RSS XML feed into [`FeedEntry`]s.
///
/// Extracts `<item>` elements, pulling `<title>`, `<link>`, and `<description>`
/// fields. Items without a link are skipped; a missing title becomes
/// `(no title)`. Stops after `max_items` entries.
pub(crate) fn parse_rss_feed(xml: &str, max_items: usize) -> Result<Vec<FeedEntry>, SourceError> {
    let mut reader = Reader::from_str(xml);
    reader.config_mut().trim_text(true);

    let mut entries = Vec::new();
    let mut in_item = false;
    let mut in_description = false;
    let mut current_tag = String::new();
    let mut title = String::new();
    let mut link = String::new();
    let mut description = String::new();

    loop {
        match reader.read_event() {
            Ok(Event::Start(e)) => {
                let name_buf = e.name().as_ref().to_vec();
                let name = std::str::from_utf8(&name_buf).unwrap_or("").to_string();
                if name == "item" {
                    in_item = true;
                    in_description = false;
                    title.clear();
                    link.clear();
                    description.clear();
                } else if name == "description" && in_item {
                    in_description = true;
                }
                current_tag = name;
            }
            Ok(Event::End(e)) => {
                let name_buf = e.name().as_ref().to_vec();
                let name = std::str::from_utf8(&name_buf).unwrap_or("");
                if name == "description" {
                    in_description = false;
                }
                if name == "item" && in_item {
                    in_item = false;
                    if !link.is_empty() {
                        entries.push(FeedEntry {
                            title: if title.is_empty() {
                                "(no title)".to_string()
                            } else {
                                title.clone()
                            },
                            link: link.clone(),
                            description: strip_html(&description),
                        });
                        if entries.len() >= max_items {
                            break;
                        }
                    }
                }
                current_tag.clear();
            }
            Ok(Event::Text(e)) => {
                if in_item {
                    let text = e.unescape().unwrap_or_default().into_owned();
                    if in_description {
                        // Text nodes after nested tags like <b> arrive separately.
                        if !description.is_empty() {
                            description.push(' ');
                        }
                        description.push_str(&text);
                    } else {
                        match current_tag.as_str() {
                            "title" => title = text,
                            "link" => link = text,
                            _ => {}
                        }
                    }
                }
            }
            Ok(Event::CData(e)) => {
                if in_item {
                    let text = String::from_utf8_lossy(e.as_ref()).into_owned();
                    if in_description {
                        description = text;
                    } else if current_tag == "title" {
                        title = text;
                    }
                }
            }
            Ok(Event::Eof) => break,
            Err(e) => return Err(SourceError::Xml(e)),
            _ => {}
        }
    }

    Ok(entries)
}

/// Unwrap Google redirect links of the form `...?url=<target>`.
pub(crate) fn resolve_article_url(raw_link: &str) -> String {
    Url::parse(raw_link)
        .ok()
        .and_then(|url| {
            url.query_pairs()
                .find(|(key, _)| key == "url")
                .map(|(_, value)| value.into_owned())
        })
        .filter(|target| target.starts_with("http://") || target.starts_with("https://"))
        .unwrap_or_else(|| raw_link.to_string())
}

/// Turn a cleaned description into an optional, bounded snippet.
pub(crate) fn snippet(description: &str, title: &str) -> Option<String> {
    let text = description.trim();
    // Google News descriptions often only repeat the headline.
    if text.is_empty() || text == title {
        return None;
    }
    if text.chars().count() <= MAX_SNIPPET_CHARS {
        return Some(text.to_string());
    }
    let cut: String = text.chars().take(MAX_SNIPPET_CHARS).collect();
    let cut = cut
        .rsplit_once(' ')
        .map_or(cut.as_str(), |(head, _)| head)
        .trim_end();
    Some(format!("{cut}..."))
}

/// Strip HTML tags from a string and normalize whitespace.
pub(crate) fn strip_html(html: &str) -> String {
    let mut out = String::with_capacity(html.len());
    let mut in_tag = false;
    for ch in html.chars() {
        match ch {
            '<' => in_tag = true,
            '>' => {
                in_tag = false;
                out.push(' ');
            }
            _ if !in_tag => out.push(ch),
            _ => {}
        }
    }
    out.replace("&nbsp;", " ")
        .split_whitespace()
        .collect::<Vec<_>>()
        .join(" ")
}

#[cfg(test)]
mod tests {
    use super::*;

    const SAMPLE_RSS: &str = r##"<?xml version="1.0" encoding="UTF-8"?>
<rss version="2.0">
  <channel>
    <title>"Acme Corp" - Google News</title>
    <item>
      <title>Acme Corp opens battery plant in Ohio - Reuters</title>
      <link>https://news.google.com/rss/articles/abc?oc=5</link>
      <description>&lt;a href="https://example.com/a"&gt;Acme Corp opens battery plant&lt;/a&gt;&amp;nbsp;&lt;font color="#6f6f6f"&gt;Reuters&lt;/font&gt;</description>
    </item>
    <item>
      <title><![CDATA[Acme & partners sign supply deal]]></title>
      <link>https://www.google.com/url?rct=j&amp;url=https://example.com/deal&amp;ct=ga</link>
      <description><![CDATA[<p>The <b>five-year</b> deal covers lithium.</p>]]></description>
    </item>
    <item>
      <title>No link here</title>
    </item>
  </channel>
</rss>"##;

    #[test]
    fn parses_items_with_links() {
        let entries = parse_rss_feed(SAMPLE_RSS, 10).expect("should parse valid RSS");
        assert_eq!(entries.len(), 2, "item without link must be skipped");
        assert_eq!(
            entries[0].title,
            "Acme Corp opens battery plant in Ohio - Reuters"
        );
        assert_eq!(
            entries[0].link,
            "https://news.google.com/rss/articles/abc?oc=5"
        );
        assert_eq!(entries[0].description, "Acme Corp opens battery plant Reuters");
        assert_eq!(entries[1].title, "Acme & partners sign supply deal");
        assert_eq!(entries[1].description, "The five-year deal covers lithium.");
    }

    #[test]
    fn stops_after_max_items() {
        let entries = parse_rss_feed(SAMPLE_RSS, 1).unwrap();
        assert_eq!(entries.len(), 1);
    }

    #[test]
    fn empty_channel_returns_empty_vec() {
        let xml = r#"<?xml version="1.0"?><rss version="2.0"><channel></channel></rss>"#;
        assert!(parse_rss_feed(xml, 5).unwrap().is_empty());
    }

    #[test]
    fn malformed_xml_is_handled() {
        let xml = "<rss><channel><item><title>Unclosed";
        match parse_rss_feed(xml, 5) {
            Ok(entries) => assert!(entries.is_empty()),
            Err(SourceError::Xml(_)) => {}
            Err(e) => panic!("unexpected error type: {e}"),
        }
    }

    #[test]
    fn google_redirect_is_resolved() {
        let raw = "https://www.google.com/url?rct=j&url=https://example.com/deal&ct=ga";
        assert_eq!(resolve_article_url(raw), "https://example.com/deal");
    }

    #[test]
    fn plain_links_are_kept() {
        let raw = "https://news.google.com/rss/articles/abc?oc=5";
        assert_eq!(resolve_article_url(raw), raw);
        assert_eq!(resolve_article_url("not a url"), "not a url");
    }

    #[test]
    fn snippet_skips_headline_echo_and_truncates() {
        assert_eq!(snippet("Same", "Same"), None);
        assert_eq!(snippet("  ", "t"), None);
        let long = "word ".repeat(100);
        let s = snippet(&long, "t").unwrap();
        assert!(s.ends_with("..."));
        assert!(s.chars().count() <= MAX_SNIPPET_CHARS + 3);
    }

    #[test]
    fn strip_html_collapses_whitespace() {
        assert_eq!(strip_html("<p>a</p>\n<p>b&nbsp;c</p>"), "a b c");
    }
}
