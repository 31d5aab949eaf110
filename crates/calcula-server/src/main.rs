//! HTTP server entry point.
//!
//! Loads configuration from the environment, builds the shared state and
//! serves the router.

use std::sync::Arc;

use anyhow::Result;
use calcula_config::ServerConfig;
use calcula_server::{build_router, AppState};
use tracing::info;

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();

    tracing_subscriber::fmt()
        .with_target(false)
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .compact()
        .init();

    let config = ServerConfig::from_env()?;
    let state = Arc::new(AppState::from_config(&config)?);
    info!(
        "Loaded {} prompt templates, model {}",
        state.prompts.len(),
        config.model
    );

    let app = build_router(state);

    info!("Starting server on {}", config.bind_addr);
    let listener = tokio::net::TcpListener::bind(config.bind_addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
