//! Request validation and completion dispatch for the calculation endpoint.

use axum::http::{header, HeaderMap};
use calcula_core::{
    PromptRegistry, PromptTemplate, UpstreamFailure, DEFAULT_CATEGORY, MAX_QUESTION_CHARS,
};
use serde_json::Value;
use tracing::{error, info};

use crate::error::AppError;
use crate::AppState;

/// Number of question characters written to logs.
const LOG_PREVIEW_CHARS: usize = 50;

/// A request that passed validation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CalculationRequest {
    /// Trimmed question text.
    pub question: String,
    pub template: PromptTemplate,
}

/// True for `application/json` and `application/*+json`, ignoring parameters.
pub fn is_json_content_type(headers: &HeaderMap) -> bool {
    let Some(value) = headers.get(header::CONTENT_TYPE).and_then(|v| v.to_str().ok()) else {
        return false;
    };
    let mime = value.split(';').next().unwrap_or("").trim().to_ascii_lowercase();
    mime == "application/json" || (mime.starts_with("application/") && mime.ends_with("+json"))
}

/// First characters of a question, for log lines.
pub fn preview(question: &str) -> String {
    question.chars().take(LOG_PREVIEW_CHARS).collect()
}

/// Validates headers and body, in order, stopping at the first failure.
///
/// `body` is an error when it could not be read; that error is reported only
/// once the content type has been accepted.
pub fn parse_request(
    headers: &HeaderMap,
    body: Result<&[u8], AppError>,
    prompts: &PromptRegistry,
) -> Result<CalculationRequest, AppError> {
    if !is_json_content_type(headers) {
        return Err(AppError::InvalidContentType);
    }

    let data: Value = serde_json::from_slice(body?).map_err(|_| AppError::MalformedBody)?;
    if data.is_null() {
        return Err(AppError::MalformedBody);
    }
    let object = data.as_object();

    let question = object
        .and_then(|o| o.get("pergunta"))
        .and_then(Value::as_str)
        .unwrap_or("")
        .trim();

    if question.is_empty() {
        return Err(AppError::MissingQuestion);
    }
    if question.chars().count() > MAX_QUESTION_CHARS {
        return Err(AppError::QuestionTooLong);
    }

    let invalid_category =
        || AppError::InvalidCategory(prompts.keys().collect::<Vec<_>>().join(", "));
    let key = match object.and_then(|o| o.get("tipo")) {
        None | Some(Value::Null) => DEFAULT_CATEGORY.as_str().to_string(),
        Some(Value::String(tipo)) => tipo.to_lowercase(),
        Some(_) => return Err(invalid_category()),
    };

    let template = prompts.get(&key).cloned().ok_or_else(invalid_category)?;

    Ok(CalculationRequest {
        question: question.to_string(),
        template,
    })
}

/// Sends a validated request to the completion service and returns the trimmed answer.
pub async fn run(state: &AppState, request: &CalculationRequest) -> Result<String, AppError> {
    let category = request.template.category;
    info!(
        "Calculation request - category: {}, question: {}...",
        category,
        preview(&request.question)
    );

    match state
        .completions
        .complete(request.template.instruction, &request.question)
        .await
    {
        Ok(response) => Ok(response.content.trim().to_string()),
        Err(e) => {
            let failure = UpstreamFailure::from(&e);
            error!(
                category = %category,
                question = %preview(&request.question),
                failure = ?failure,
                "Completion failed: {}",
                e
            );
            Err(AppError::Upstream(failure))
        }
    }
}
