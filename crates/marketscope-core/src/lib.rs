//! Domain model, configuration, and report pipeline for MarketScope.
//!
//! The pipeline only talks to the outside world through the capability traits
//! in [`capabilities`]; concrete HTTP-backed implementations live in
//! `marketscope-sources` and `marketscope-llm`.

pub mod app_config;
pub mod capabilities;
pub mod config;
pub mod error;
pub mod outcome;
pub mod pipeline;
pub mod prompt;
pub mod types;

pub use app_config::{AppConfig, Environment, TrendStrategy};
pub use capabilities::{NewsSource, Summarizer, TrendSource};
pub use config::{load_app_config, load_app_config_from_env};
pub use error::{CapabilityError, ConfigError, DirectiveError};
pub use outcome::Outcome;
pub use pipeline::ReportPipeline;
pub use prompt::SummaryPrompt;
pub use types::{Article, Directive, Report, Summary, SummaryStyle, TrendPoint, MAX_ARTICLES};
