mod api;
mod middleware;
mod render;

use std::sync::Arc;

use anyhow::Context;
use axum::http::HeaderValue;
use marketscope_core::{AppConfig, ReportPipeline, TrendSource, TrendStrategy};
use marketscope_llm::{LlmSettings, LlmTrendSource, OpenAiClient, OpenAiSummarizer};
use marketscope_sources::{GoogleNewsSource, NewsSettings, TemplateTrendSource};
use tracing_subscriber::EnvFilter;

use crate::api::{build_app, AppState};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let config = marketscope_core::load_app_config()?;
    let env_filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(config.log_level.clone()))?;
    tracing_subscriber::fmt().with_env_filter(env_filter).init();

    tracing::info!(
        env = %config.env,
        bind_addr = %config.bind_addr,
        model = %config.openai_model,
        trend_strategy = %config.trend_strategy,
        max_articles = config.max_articles,
        "starting marketscope"
    );

    let pipeline = build_pipeline(&config)?;
    let cors_origin = HeaderValue::from_str(&config.cors_origin)
        .with_context(|| format!("invalid CORS origin: {}", config.cors_origin))?;
    let app = build_app(AppState { pipeline }, cors_origin);

    let listener = tokio::net::TcpListener::bind(config.bind_addr).await?;
    tracing::info!(addr = %config.bind_addr, "listening");
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;
    Ok(())
}

/// Wire the configured capability implementations into a pipeline.
///
/// The summarizer and the LLM trend source share one completion client.
fn build_pipeline(config: &AppConfig) -> anyhow::Result<ReportPipeline> {
    let news = GoogleNewsSource::new(NewsSettings::from_app_config(config))
        .context("failed to build news client")?;
    let llm = Arc::new(
        OpenAiClient::new(LlmSettings::from_app_config(config))
            .context("failed to build completion client")?,
    );

    let trends: Arc<dyn TrendSource> = match config.trend_strategy {
        TrendStrategy::Template => Arc::new(TemplateTrendSource),
        TrendStrategy::Llm => Arc::new(LlmTrendSource::new(Arc::clone(&llm))),
    };
    let summarizer = OpenAiSummarizer::from_app_config(llm, config);

    Ok(ReportPipeline::new(
        Arc::new(news),
        trends,
        Arc::new(summarizer),
    ))
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            tracing::error!(error = %e, "failed to listen for ctrl-c");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            }
            Err(e) => {
                tracing::error!(error = %e, "failed to install SIGTERM handler");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        () = ctrl_c => {},
        () = terminate => {},
    }

    tracing::info!("received shutdown signal, starting graceful shutdown");
}
