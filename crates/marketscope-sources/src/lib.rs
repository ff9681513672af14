//! Data collectors for MarketScope reports.
//!
//! - [`GoogleNewsSource`]: Google News RSS search, with per-article thumbnail
//!   enrichment fetched concurrently.
//! - [`TemplateTrendSource`]: deterministic placeholder trend points.

pub mod error;
pub mod news;
pub mod trends;

pub use error::SourceError;
pub use news::{GoogleNewsSource, NewsSettings};
pub use trends::TemplateTrendSource;
