//! Ops Assistant - HTTP Server Entry Point
//!
//! Starts the HTTP server that exposes the plan/execute/verify pipeline.

use ops_assistant::{api, config::Config};
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize logging
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "ops_assistant=debug,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    // Load configuration
    let config = Config::from_env()?;
    info!("Loaded configuration: model={}", config.llm.model);
    if config.news_api_key.is_none() {
        info!("NEWS_API_KEY not set; news_tool steps will fail");
    }

    api::serve(config).await?;

    Ok(())
}
