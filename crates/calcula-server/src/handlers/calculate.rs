//! Calculation endpoint.

use std::sync::Arc;

use axum::{
    body::Bytes,
    extract::{rejection::BytesRejection, State},
    http::{HeaderMap, StatusCode},
    Json,
};

use crate::dto::CalculateResponse;
use crate::error::AppError;
use crate::services::calculation;
use crate::AppState;

/// `POST /api/calcular`
///
/// The body is taken raw so content type, size and JSON problems map to this
/// endpoint's own 400 messages instead of the extractor rejections.
pub async fn calculate(
    State(state): State<Arc<AppState>>,
    headers: HeaderMap,
    body: Result<Bytes, BytesRejection>,
) -> Result<Json<CalculateResponse>, AppError> {
    let body = body.map_err(rejected_body);
    let request = calculation::parse_request(
        &headers,
        body.as_deref().map_err(AppError::clone),
        &state.prompts,
    )?;
    let resposta = calculation::run(&state, &request).await?;
    Ok(Json(CalculateResponse { resposta }))
}

/// A body over the size limit can only carry an oversized question.
fn rejected_body(rejection: BytesRejection) -> AppError {
    match rejection.status() {
        StatusCode::PAYLOAD_TOO_LARGE => AppError::QuestionTooLong,
        _ => AppError::MalformedBody,
    }
}
