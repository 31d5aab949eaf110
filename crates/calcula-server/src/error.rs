//! Application error types and Axum response conversion.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use calcula_core::UpstreamFailure;

use crate::dto::ErrorResponse;

/// Every failure a request can end in, with its HTTP status mapping.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AppError {
    InvalidContentType,
    MalformedBody,
    MissingQuestion,
    QuestionTooLong,
    /// Carries the valid keys, already joined for display.
    InvalidCategory(String),
    Upstream(UpstreamFailure),
    NotFound,
}

impl AppError {
    pub fn status(&self) -> StatusCode {
        match self {
            AppError::InvalidContentType
            | AppError::MalformedBody
            | AppError::MissingQuestion
            | AppError::QuestionTooLong
            | AppError::InvalidCategory(_) => StatusCode::BAD_REQUEST,
            AppError::Upstream(UpstreamFailure::RateLimited) => StatusCode::TOO_MANY_REQUESTS,
            AppError::Upstream(UpstreamFailure::Other) => StatusCode::INTERNAL_SERVER_ERROR,
            AppError::Upstream(_) => StatusCode::BAD_GATEWAY,
            AppError::NotFound => StatusCode::NOT_FOUND,
        }
    }

    /// Message shown to the caller.
    pub fn message(&self) -> String {
        match self {
            AppError::InvalidContentType => "Content-Type deve ser application/json".into(),
            AppError::MalformedBody => "JSON inválido".into(),
            AppError::MissingQuestion => "Pergunta não fornecida".into(),
            AppError::QuestionTooLong => "Pergunta muito longa (máximo 1000 caracteres)".into(),
            AppError::InvalidCategory(valid) => format!("Tipo inválido. Tipos válidos: {}", valid),
            AppError::Upstream(failure) => match failure {
                UpstreamFailure::Authentication => "Erro de autenticação da API",
                UpstreamFailure::RateLimited => {
                    "Limite de requisições atingido. Tente novamente em alguns momentos."
                }
                UpstreamFailure::QuotaExhausted => "Cota da API esgotada",
                UpstreamFailure::PermissionDenied => "Sem permissão para acessar a API",
                UpstreamFailure::Other => "Erro ao processar a solicitação. Tente novamente.",
            }
            .into(),
            AppError::NotFound => "Endpoint não encontrado".into(),
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        (self.status(), Json(ErrorResponse { error: self.message() })).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn upstream_status_mapping() {
        let cases = [
            (UpstreamFailure::Authentication, StatusCode::BAD_GATEWAY),
            (UpstreamFailure::RateLimited, StatusCode::TOO_MANY_REQUESTS),
            (UpstreamFailure::QuotaExhausted, StatusCode::BAD_GATEWAY),
            (UpstreamFailure::PermissionDenied, StatusCode::BAD_GATEWAY),
            (UpstreamFailure::Other, StatusCode::INTERNAL_SERVER_ERROR),
        ];
        for (failure, status) in cases {
            assert_eq!(AppError::Upstream(failure).status(), status, "{:?}", failure);
        }
    }

    #[test]
    fn client_errors_are_bad_request() {
        for err in [
            AppError::InvalidContentType,
            AppError::MalformedBody,
            AppError::MissingQuestion,
            AppError::QuestionTooLong,
            AppError::InvalidCategory("basico".into()),
        ] {
            assert_eq!(err.status(), StatusCode::BAD_REQUEST);
        }
    }
}
