//! Serves the HTML front end.

use std::sync::Arc;

use axum::{
    extract::State,
    http::header,
    response::{IntoResponse, Response},
};
use tracing::warn;

use crate::error::AppError;
use crate::AppState;

/// Returns the configured index document.
pub async fn index(State(state): State<Arc<AppState>>) -> Result<Response, AppError> {
    let html = tokio::fs::read(&state.index_path).await.map_err(|e| {
        warn!("Failed to read {}: {}", state.index_path.display(), e);
        AppError::NotFound
    })?;

    Ok(([(header::CONTENT_TYPE, "text/html; charset=utf-8")], html).into_response())
}
