//! Deterministic placeholder trend points.

use async_trait::async_trait;
use marketscope_core::{CapabilityError, Directive, TrendPoint, TrendSource};
use sha2::{Digest, Sha256};

/// Trend source that derives stable 0-100 values from a SHA-256 digest of the
/// lowercased directive. Performs no I/O and never fails.
#[derive(Debug, Clone, Copy, Default)]
pub struct TemplateTrendSource;

impl TemplateTrendSource {
    #[must_use]
    pub fn points_for(directive: &Directive) -> Vec<TrendPoint> {
        let digest = Sha256::digest(directive.as_str().to_lowercase().as_bytes());
        let scaled = |byte: u8, floor: u8, span: u8| f64::from(floor + byte % (span + 1));

        vec![
            TrendPoint::new(
                "Search interest",
                scaled(digest[0], 20, 80),
                Some("7-day relative search interest (template)".to_string()),
            ),
            TrendPoint::new(
                "News momentum",
                scaled(digest[1], 0, 100),
                Some("headline volume vs. prior week (template)".to_string()),
            ),
            TrendPoint::new(
                "Social buzz",
                scaled(digest[2], 0, 100),
                Some("mention velocity (template)".to_string()),
            ),
            TrendPoint::new(
                "Sentiment",
                scaled(digest[3], 30, 40),
                Some("0 negative, 50 neutral, 100 positive (template)".to_string()),
            ),
        ]
    }
}

#[async_trait]
impl TrendSource for TemplateTrendSource {
    async fn trends(&self, directive: &Directive) -> Result<Vec<TrendPoint>, CapabilityError> {
        Ok(Self::points_for(directive))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn directive(raw: &str) -> Directive {
        Directive::parse(raw).unwrap()
    }

    #[test]
    fn same_directive_yields_same_points() {
        let a = TemplateTrendSource::points_for(&directive("Acme Corp"));
        let b = TemplateTrendSource::points_for(&directive("  acme corp "));
        assert_eq!(a, b);
    }

    #[test]
    fn produces_four_bounded_points() {
        let points = TemplateTrendSource::points_for(&directive("solid-state batteries"));
        assert_eq!(points.len(), 4);
        for p in &points {
            assert!((0.0..=100.0).contains(&p.value), "{} out of range", p.label);
        }
        assert!((20.0..=100.0).contains(&points[0].value));
        assert!((30.0..=70.0).contains(&points[3].value));
    }

    #[test]
    fn different_directives_usually_differ() {
        let a = TemplateTrendSource::points_for(&directive("Acme Corp"));
        let b = TemplateTrendSource::points_for(&directive("Globex"));
        assert_ne!(a, b);
    }

    #[tokio::test]
    async fn trait_call_never_fails() {
        let points = TemplateTrendSource
            .trends(&directive("anything"))
            .await
            .expect("template source is infallible");
        assert_eq!(points.len(), 4);
    }
}
