use crate::app_config::{AppConfig, Environment, TrendStrategy};
use crate::types::MAX_ARTICLES;
use crate::ConfigError;

/// Load application configuration from environment variables.
///
/// Calls `dotenvy::dotenv().ok()` to load `.env` files before reading env vars.
///
/// # Errors
///
/// Returns `ConfigError` if required env vars are missing or values are invalid.
pub fn load_app_config() -> Result<AppConfig, ConfigError> {
    dotenvy::dotenv().ok();
    load_app_config_from_env()
}

/// Load application configuration from environment variables already in the process.
///
/// Unlike [`load_app_config`], this does NOT load `.env` files.
///
/// # Errors
///
/// Returns `ConfigError` if required env vars are missing or values are invalid.
pub fn load_app_config_from_env() -> Result<AppConfig, ConfigError> {
    build_app_config(|key| std::env::var(key))
}

/// Build application configuration using the provided env-var lookup function.
///
/// Decoupled from the real environment so tests can drive it with a `HashMap`.
fn build_app_config<F>(lookup: F) -> Result<AppConfig, ConfigError>
where
    F: Fn(&str) -> Result<String, std::env::VarError>,
{
    use std::net::SocketAddr;

    let require = |var: &str| -> Result<String, ConfigError> {
        lookup(var)
            .ok()
            .filter(|v| !v.trim().is_empty())
            .ok_or_else(|| ConfigError::MissingEnvVar(var.to_string()))
    };

    let or_default = |var: &str, default: &str| -> String {
        lookup(var).unwrap_or_else(|_| default.to_string())
    };

    let invalid = |var: &str, reason: String| ConfigError::InvalidEnvVar {
        var: var.to_string(),
        reason,
    };

    let parse_addr = |var: &str, default: &str| -> Result<SocketAddr, ConfigError> {
        or_default(var, default)
            .parse::<SocketAddr>()
            .map_err(|e| invalid(var, e.to_string()))
    };

    let parse_u32 = |var: &str, default: &str| -> Result<u32, ConfigError> {
        or_default(var, default)
            .parse::<u32>()
            .map_err(|e| invalid(var, e.to_string()))
    };

    let parse_timeout_secs = |var: &str, default: &str| -> Result<u64, ConfigError> {
        let secs = or_default(var, default)
            .parse::<u64>()
            .map_err(|e| invalid(var, e.to_string()))?;
        if secs == 0 {
            return Err(invalid(var, "timeout must be at least 1 second".to_string()));
        }
        Ok(secs)
    };

    let parse_f32 = |var: &str, default: &str| -> Result<f32, ConfigError> {
        or_default(var, default)
            .parse::<f32>()
            .map_err(|e| invalid(var, e.to_string()))
    };

    let openai_api_key = require("OPENAI_API_KEY")?;

    let env = parse_environment(&or_default("MARKETSCOPE_ENV", "development"));
    let bind_addr = parse_addr("MARKETSCOPE_BIND_ADDR", "0.0.0.0:8000")?;
    let log_level = or_default("MARKETSCOPE_LOG_LEVEL", "info");
    let cors_origin = or_default("MARKETSCOPE_CORS_ORIGIN", "http://localhost:3000");

    let openai_base_url = or_default("MARKETSCOPE_OPENAI_BASE_URL", "https://api.openai.com/v1")
        .trim_end_matches('/')
        .to_string();
    let openai_model = or_default("MARKETSCOPE_OPENAI_MODEL", "gpt-4o-mini");

    let summary_temperature = parse_f32("MARKETSCOPE_SUMMARY_TEMPERATURE", "0.6")?;
    if !(0.0..=2.0).contains(&summary_temperature) {
        return Err(invalid(
            "MARKETSCOPE_SUMMARY_TEMPERATURE",
            format!("{summary_temperature} is outside 0.0..=2.0"),
        ));
    }
    let summary_max_tokens = parse_u32("MARKETSCOPE_SUMMARY_MAX_TOKENS", "256")?;

    let news_feed_url = or_default(
        "MARKETSCOPE_NEWS_FEED_URL",
        "https://news.google.com/rss/search",
    );

    let max_articles = or_default("MARKETSCOPE_MAX_ARTICLES", "3")
        .parse::<usize>()
        .map_err(|e| invalid("MARKETSCOPE_MAX_ARTICLES", e.to_string()))?;
    if !(1..=MAX_ARTICLES).contains(&max_articles) {
        return Err(invalid(
            "MARKETSCOPE_MAX_ARTICLES",
            format!("{max_articles} is outside 1..={MAX_ARTICLES}"),
        ));
    }

    let fetch_timeout_secs = parse_timeout_secs("MARKETSCOPE_FETCH_TIMEOUT_SECS", "8")?;
    let llm_timeout_secs = parse_timeout_secs("MARKETSCOPE_LLM_TIMEOUT_SECS", "30")?;
    let user_agent = or_default("MARKETSCOPE_USER_AGENT", "marketscope/0.1 (market-intel)");
    let trend_strategy = parse_trend_strategy(&or_default("MARKETSCOPE_TREND_STRATEGY", "template"))?;
    let placeholder_image_url = or_default(
        "MARKETSCOPE_PLACEHOLDER_IMAGE_URL",
        "https://source.unsplash.com/480x300/",
    );

    Ok(AppConfig {
        env,
        bind_addr,
        log_level,
        cors_origin,
        openai_api_key,
        openai_base_url,
        openai_model,
        summary_temperature,
        summary_max_tokens,
        news_feed_url,
        max_articles,
        fetch_timeout_secs,
        llm_timeout_secs,
        user_agent,
        trend_strategy,
        placeholder_image_url,
    })
}

/// Parse a string into an `Environment` variant.
///
/// Unrecognized values default to `Environment::Development`.
fn parse_environment(s: &str) -> Environment {
    match s {
        "production" => Environment::Production,
        "test" => Environment::Test,
        _ => Environment::Development,
    }
}

fn parse_trend_strategy(s: &str) -> Result<TrendStrategy, ConfigError> {
    match s.trim().to_ascii_lowercase().as_str() {
        "template" => Ok(TrendStrategy::Template),
        "llm" => Ok(TrendStrategy::Llm),
        other => Err(ConfigError::InvalidEnvVar {
            var: "MARKETSCOPE_TREND_STRATEGY".to_string(),
            reason: format!("expected `template` or `llm`, got `{other}`"),
        }),
    }
}

#[cfg(test)]
#[path = "config_test.rs"]
mod tests;
