//! Summary prompt construction and reply parsing.

use std::fmt::Write as _;

use crate::types::{Article, Directive, Summary, SummaryStyle, TrendPoint};

pub const SYSTEM_PROMPT: &str =
    "You are an AI market-intel analyst. Provide 3-5 actionable sentences.";

/// Maximum number of bullet lines kept from a model reply.
pub const MAX_BULLETS: usize = 5;

/// Marker prefixed to synthetic summaries produced after a failed completion.
pub const ERROR_MARKER: &str = "[Error]";

const EMPTY_SUMMARY: &str = "(no summary)";

/// A two-message chat prompt.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SummaryPrompt {
    pub system: String,
    pub user: String,
}

/// Build the summary prompt from the collected headlines and trend points.
#[must_use]
pub fn build_summary_prompt(
    directive: &Directive,
    articles: &[Article],
    trends: &[TrendPoint],
) -> SummaryPrompt {
    let mut user = format!("Topic: {directive}\n\nHeadlines:\n");
    for article in articles {
        if article.url.is_empty() {
            let _ = writeln!(user, "- {}", article.title);
        } else {
            let _ = writeln!(user, "- {} ({})", article.title, article.url);
        }
    }

    user.push_str("\nTrends:\n");
    if trends.is_empty() {
        user.push_str("  • None\n");
    }
    for point in trends {
        match &point.description {
            Some(desc) => {
                let _ = writeln!(user, "  • {}: {} ({desc})", point.label, point.value);
            }
            None => {
                let _ = writeln!(user, "  • {}: {}", point.label, point.value);
            }
        }
    }

    SummaryPrompt {
        system: SYSTEM_PROMPT.to_string(),
        user: user.trim_end().to_string(),
    }
}

/// Shape a raw model reply into the requested [`Summary`].
#[must_use]
pub fn parse_summary_reply(reply: &str, style: SummaryStyle) -> Summary {
    match style {
        SummaryStyle::Paragraph => {
            let text = reply.trim();
            if text.is_empty() {
                Summary::Paragraph(EMPTY_SUMMARY.to_string())
            } else {
                Summary::Paragraph(text.to_string())
            }
        }
        SummaryStyle::Bullets => {
            let bullets: Vec<String> = reply
                .lines()
                .map(strip_bullet_marker)
                .filter(|line| !line.is_empty())
                .take(MAX_BULLETS)
                .map(str::to_string)
                .collect();
            if bullets.is_empty() {
                Summary::Bullets(vec![EMPTY_SUMMARY.to_string()])
            } else {
                Summary::Bullets(bullets)
            }
        }
    }
}

/// Synthetic summary carrying a completion failure message.
#[must_use]
pub fn error_summary(message: &str, style: SummaryStyle) -> Summary {
    let text = format!("{ERROR_MARKER} {message}");
    match style {
        SummaryStyle::Bullets => Summary::Bullets(vec![text]),
        SummaryStyle::Paragraph => Summary::Paragraph(text),
    }
}

/// Strip one leading list marker: `•`, or `-` / `*` / `1.` / `1)` followed
/// by whitespace. Markdown emphasis such as `**Risk:**` is left alone.
fn strip_bullet_marker(line: &str) -> &str {
    let line = line.trim();
    if let Some(rest) = line.strip_prefix('•') {
        return rest.trim();
    }
    let digits = line.len() - line.trim_start_matches(|c: char| c.is_ascii_digit()).len();
    let rest = if digits > 0 {
        line[digits..].strip_prefix(['.', ')'])
    } else {
        line.strip_prefix(['-', '*'])
    };
    match rest {
        Some(rest) if rest.is_empty() || rest.starts_with(char::is_whitespace) => rest.trim(),
        _ => line,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn directive() -> Directive {
        Directive::parse("Acme Corp").unwrap()
    }

    #[test]
    fn prompt_lists_headlines_and_trends() {
        let articles = vec![Article {
            title: "Acme beats estimates".into(),
            url: "https://news.example.com/acme".into(),
            thumbnail: None,
            summary: None,
        }];
        let trends = vec![TrendPoint::new("Search interest", 72.0, None)];
        let prompt = build_summary_prompt(&directive(), &articles, &trends);
        assert_eq!(prompt.system, SYSTEM_PROMPT);
        assert!(prompt.user.starts_with("Topic: Acme Corp"));
        assert!(prompt
            .user
            .contains("- Acme beats estimates (https://news.example.com/acme)"));
        assert!(prompt.user.contains("  • Search interest: 72"));
    }

    #[test]
    fn prompt_without_trends_says_none() {
        let prompt = build_summary_prompt(&directive(), &[], &[]);
        assert!(prompt.user.ends_with("  • None"));
    }

    #[test]
    fn bullets_strip_markers_and_blank_lines() {
        let reply = "• First point\n\n- Second point\n* Third point\n2. Fourth point\n3) Fifth";
        let summary = parse_summary_reply(reply, SummaryStyle::Bullets);
        assert_eq!(
            summary,
            Summary::Bullets(vec![
                "First point".into(),
                "Second point".into(),
                "Third point".into(),
                "Fourth point".into(),
                "Fifth".into(),
            ])
        );
    }

    #[test]
    fn bold_lead_ins_keep_their_emphasis() {
        let reply = "- **Revenue growth:** Acme beat estimates\n**Risk:** margins are thin\n* *Note:* guidance held";
        let summary = parse_summary_reply(reply, SummaryStyle::Bullets);
        assert_eq!(
            summary,
            Summary::Bullets(vec![
                "**Revenue growth:** Acme beat estimates".into(),
                "**Risk:** margins are thin".into(),
                "*Note:* guidance held".into(),
            ])
        );
    }

    #[test]
    fn bullets_are_capped() {
        let reply = (1..=8)
            .map(|i| format!("- line {i}"))
            .collect::<Vec<_>>()
            .join("\n");
        let Summary::Bullets(lines) = parse_summary_reply(&reply, SummaryStyle::Bullets) else {
            panic!("expected bullets");
        };
        assert_eq!(lines.len(), MAX_BULLETS);
        assert_eq!(lines[0], "line 1");
    }

    #[test]
    fn numbers_inside_text_are_kept() {
        let summary = parse_summary_reply("2024 revenue grew 12%", SummaryStyle::Bullets);
        assert_eq!(
            summary,
            Summary::Bullets(vec!["2024 revenue grew 12%".into()])
        );
        let summary = parse_summary_reply("1.5 million units shipped", SummaryStyle::Bullets);
        assert_eq!(
            summary,
            Summary::Bullets(vec!["1.5 million units shipped".into()])
        );
    }

    #[test]
    fn empty_reply_yields_no_summary_marker() {
        assert_eq!(
            parse_summary_reply("  \n - \n", SummaryStyle::Bullets),
            Summary::Bullets(vec!["(no summary)".into()])
        );
        assert_eq!(
            parse_summary_reply("", SummaryStyle::Paragraph),
            Summary::Paragraph("(no summary)".into())
        );
    }

    #[test]
    fn paragraph_is_returned_verbatim_after_trim() {
        let summary = parse_summary_reply("  One.\n- Two.  ", SummaryStyle::Paragraph);
        assert_eq!(summary, Summary::Paragraph("One.\n- Two.".into()));
    }

    #[test]
    fn error_summary_carries_marker() {
        let Summary::Bullets(lines) = error_summary("quota exceeded", SummaryStyle::Bullets)
        else {
            panic!("expected bullets");
        };
        assert_eq!(lines, vec!["[Error] quota exceeded".to_string()]);
    }
}
