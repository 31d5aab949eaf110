//! HTTP server answering math questions through an LLM completion API.
//!
//! Routes:
//!
//! | Method | Path | Handler |
//! |--------|------|---------|
//! | `GET` | `/` | [`handlers::index::index`] |
//! | `POST` | `/api/calcular` | [`handlers::calculate::calculate`] |
//! | any | anything else | [`handlers::not_found`] |

pub mod dto;
pub mod error;
pub mod handlers;
pub mod services;

use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;

use axum::body::Body;
use axum::extract::DefaultBodyLimit;
use axum::http::{Request, Response};
use axum::routing::{get, post};
use axum::Router;
use calcula_config::ServerConfig;
use calcula_core::PromptRegistry;
use calcula_llm::{CompletionClient, CompletionError, OpenAiClient};
use tower_http::trace::TraceLayer;
use tracing::info;

/// Largest request body accepted, in bytes. Far above any body whose
/// question fits within the character limit.
pub const BODY_LIMIT_BYTES: usize = 64 * 1024;

/// Shared server state, built once at startup and read-only afterwards.
pub struct AppState {
    pub prompts: PromptRegistry,
    pub completions: Arc<dyn CompletionClient>,
    pub index_path: PathBuf,
}

impl AppState {
    pub fn new(completions: Arc<dyn CompletionClient>, index_path: impl Into<PathBuf>) -> Self {
        Self {
            prompts: PromptRegistry::with_defaults(),
            completions,
            index_path: index_path.into(),
        }
    }

    /// Builds the production state: default prompts and an OpenAI client.
    pub fn from_config(config: &ServerConfig) -> Result<Self, CompletionError> {
        let client = OpenAiClient::new(
            &config.model,
            &config.api_base,
            config.api_key.clone(),
            config.upstream_timeout,
        )?;
        Ok(Self::new(Arc::new(client), config.index_path.clone()))
    }
}

/// Builds the application router.
pub fn build_router(state: Arc<AppState>) -> Router {
    let trace_layer = TraceLayer::new_for_http()
        .make_span_with(|req: &Request<Body>| {
            tracing::info_span!(
                "request",
                method = %req.method(),
                uri = %req.uri(),
                version = ?req.version(),
            )
        })
        .on_response(|res: &Response<Body>, latency: Duration, _span: &tracing::Span| {
            info!(
                latency = %format!("{} ms", latency.as_millis()),
                status = %res.status().as_u16(),
                "finished processing request"
            );
        });

    Router::new()
        .route("/", get(handlers::index::index).fallback(handlers::not_found))
        .route(
            "/api/calcular",
            post(handlers::calculate::calculate).fallback(handlers::not_found),
        )
        .fallback(handlers::not_found)
        .layer(DefaultBodyLimit::max(BODY_LIMIT_BYTES))
        .layer(trace_layer)
        .with_state(state)
}
