//! HTTP API for submitting tasks and inspecting the tool registry.
//!
//! ## Endpoints
//!
//! - `GET /api/health` - Health check
//! - `GET /api/tools` - Registered tools, in registration order
//! - `POST /api/run` - Plan, execute and verify a task, returning every stage

mod routes;
pub mod types;

use std::sync::Arc;

use crate::agent::Agent;
use crate::config::Config;

pub use routes::{router, AppState};

/// Build the agent and serve the API until the process exits.
pub async fn serve(config: Config) -> anyhow::Result<()> {
    let agent = Agent::new(&config);
    tracing::info!(tools = ?agent.tools().list_tools(), "Tool registry ready");

    let state = Arc::new(AppState { agent });
    let app = router(state);

    let addr = format!("{}:{}", config.host, config.port);
    let listener = tokio::net::TcpListener::bind(&addr).await?;
    tracing::info!("Listening on {}", addr);

    axum::serve(listener, app).await?;
    Ok(())
}
