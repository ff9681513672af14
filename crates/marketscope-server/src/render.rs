//! Static HTML pages built by string interpolation.
//!
//! Every interpolated value goes through [`escape_html`]; links and image
//! sources are only emitted for `http(s)` URLs.

use std::fmt::Write as _;

use marketscope_core::{Article, Report, Summary, TrendPoint};

const STYLE: &str = "body{font-family:system-ui,sans-serif;max-width:760px;margin:2rem auto;padding:0 1rem;color:#1f2328}\
h1{font-size:1.6rem}h2{font-size:1.2rem;margin-top:2rem}\
.article{display:flex;gap:1rem;margin-bottom:1rem}.article img{width:160px;height:100px;object-fit:cover;border-radius:4px}\
.article p{margin:.25rem 0;color:#57606a}table{border-collapse:collapse}td,th{padding:.25rem .75rem;text-align:left}\
.error{color:#b42318}form input[type=text]{width:60%;padding:.4rem}";

/// Escape text for use in element content and double-quoted attributes.
#[must_use]
pub fn escape_html(raw: &str) -> String {
    let mut out = String::with_capacity(raw.len());
    for ch in raw.chars() {
        match ch {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(ch),
        }
    }
    out
}

/// The directive form, optionally with an error message above it.
#[must_use]
pub fn usage_page(error: Option<&str>) -> String {
    let error_html = error
        .map(|msg| format!("<p class=\"error\">{}</p>", escape_html(msg)))
        .unwrap_or_default();
    let body = format!(
        r#"<h1>MarketScope</h1>
<p>Enter a company or market topic to get recent headlines, trend signals, and a short briefing.</p>
{error_html}<form method="post" action="/">
<input type="text" name="directive" placeholder="e.g. Acme Corp" autofocus>
<select name="summary_style"><option value="bullets">Bullets</option><option value="paragraph">Paragraph</option></select>
<button type="submit">Analyze</button>
</form>"#
    );
    page("MarketScope", &body)
}

/// Full report page.
#[must_use]
pub fn report_page(report: &Report) -> String {
    let directive = escape_html(report.directive.as_str());
    let mut body = format!("<h1>MarketScope: {directive}</h1>\n<h2>Headlines</h2>\n");

    for article in &report.web_monitor {
        body.push_str(&article_html(article));
    }

    body.push_str("<h2>Trend signals</h2>\n");
    body.push_str(&trends_html(&report.trend_analyzer));

    body.push_str("<h2>Briefing</h2>\n");
    body.push_str(&summary_html(&report.summary_agent));

    body.push_str("<p><a href=\"/\">New search</a></p>");
    page(&format!("MarketScope: {directive}"), &body)
}

fn page(title: &str, body: &str) -> String {
    format!(
        r#"<!DOCTYPE html>
<html lang="en">
<head>
<meta charset="utf-8">
<meta name="viewport" content="width=device-width, initial-scale=1">
<title>{title}</title>
<style>{STYLE}</style>
</head>
<body>
{body}
</body>
</html>
"#
    )
}

fn article_html(article: &Article) -> String {
    let title = escape_html(&article.title);
    let heading = match web_url(&article.url) {
        Some(url) => format!("<a href=\"{}\" rel=\"noopener\">{title}</a>", escape_html(url)),
        None => title,
    };
    let image = article
        .thumbnail
        .as_deref()
        .and_then(web_url)
        .map(|src| format!("<img src=\"{}\" alt=\"\" loading=\"lazy\">", escape_html(src)))
        .unwrap_or_default();
    let summary = article
        .summary
        .as_deref()
        .map(|s| format!("<p>{}</p>", escape_html(s)))
        .unwrap_or_default();
    format!("<div class=\"article\">{image}<div><strong>{heading}</strong>{summary}</div></div>\n")
}

fn trends_html(points: &[TrendPoint]) -> String {
    let mut html = String::from("<table>\n<tr><th>Signal</th><th>Value</th><th>Note</th></tr>\n");
    for point in points {
        let _ = writeln!(
            html,
            "<tr><td>{}</td><td>{}</td><td>{}</td></tr>",
            escape_html(&point.label),
            format_value(point.value),
            escape_html(point.description.as_deref().unwrap_or("")),
        );
    }
    html.push_str("</table>\n");
    html
}

fn summary_html(summary: &Summary) -> String {
    match summary {
        Summary::Bullets(lines) => {
            let mut html = String::from("<ul>\n");
            for line in lines {
                let _ = writeln!(html, "<li>{}</li>", escape_html(line));
            }
            html.push_str("</ul>\n");
            html
        }
        Summary::Paragraph(text) => format!("<p>{}</p>\n", escape_html(text)),
    }
}

/// Whole numbers print without a decimal point.
fn format_value(value: f64) -> String {
    if value.fract().abs() < f64::EPSILON {
        format!("{value:.0}")
    } else {
        format!("{value:.1}")
    }
}

fn web_url(url: &str) -> Option<&str> {
    let lower = url.trim_start().to_ascii_lowercase();
    (lower.starts_with("http://") || lower.starts_with("https://")).then_some(url)
}
