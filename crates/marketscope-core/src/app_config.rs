use std::net::SocketAddr;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Environment {
    Development,
    Test,
    Production,
}

impl std::fmt::Display for Environment {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Environment::Development => write!(f, "development"),
            Environment::Test => write!(f, "test"),
            Environment::Production => write!(f, "production"),
        }
    }
}

/// How the trend stage produces its data points.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TrendStrategy {
    /// Deterministic placeholder values derived from the directive.
    Template,
    /// Ask the language model for a strict-JSON list of points.
    Llm,
}

impl std::fmt::Display for TrendStrategy {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            TrendStrategy::Template => write!(f, "template"),
            TrendStrategy::Llm => write!(f, "llm"),
        }
    }
}

#[derive(Clone)]
pub struct AppConfig {
    pub env: Environment,
    pub bind_addr: SocketAddr,
    pub log_level: String,
    pub cors_origin: String,
    pub openai_api_key: String,
    pub openai_base_url: String,
    pub openai_model: String,
    pub summary_temperature: f32,
    pub summary_max_tokens: u32,
    pub news_feed_url: String,
    pub max_articles: usize,
    pub fetch_timeout_secs: u64,
    pub llm_timeout_secs: u64,
    pub user_agent: String,
    pub trend_strategy: TrendStrategy,
    pub placeholder_image_url: String,
}

impl std::fmt::Debug for AppConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AppConfig")
            .field("env", &self.env)
            .field("bind_addr", &self.bind_addr)
            .field("log_level", &self.log_level)
            .field("cors_origin", &self.cors_origin)
            .field("openai_api_key", &"[redacted]")
            .field("openai_base_url", &self.openai_base_url)
            .field("openai_model", &self.openai_model)
            .field("summary_temperature", &self.summary_temperature)
            .field("summary_max_tokens", &self.summary_max_tokens)
            .field("news_feed_url", &self.news_feed_url)
            .field("max_articles", &self.max_articles)
            .field("fetch_timeout_secs", &self.fetch_timeout_secs)
            .field("llm_timeout_secs", &self.llm_timeout_secs)
            .field("user_agent", &self.user_agent)
            .field("trend_strategy", &self.trend_strategy)
            .field("placeholder_image_url", &self.placeholder_image_url)
            .finish()
    }
}
