//! Core domain types and error definitions for calcula.
//!
//! This crate provides the types shared across the calcula workspace:
//!
//! - [`Category`] — The closed set of calculation categories
//! - [`PromptTemplate`] and [`PromptRegistry`] — Fixed system instructions per category
//! - [`CompletionError`] — Error type for completion API calls
//! - [`UpstreamFailure`] — Classification of completion failures
//!
//! # Example
//!
//! ```rust
//! use calcula_core::{PromptRegistry, UpstreamFailure};
//!
//! let registry = PromptRegistry::with_defaults();
//! assert!(registry.instruction_for("algebra").is_some());
//! assert!(registry.instruction_for("trigonometria").is_none());
//!
//! let failure = UpstreamFailure::classify("OpenAI API error 429 Too Many Requests");
//! assert_eq!(failure, UpstreamFailure::RateLimited);
//! ```

mod prompts;

pub use prompts::{Category, PromptRegistry, PromptTemplate, UnknownCategory};

use thiserror::Error;

/// Maximum accepted question length, in characters.
pub const MAX_QUESTION_CHARS: usize = 1000;

/// Category used when a request does not name one.
pub const DEFAULT_CATEGORY: Category = Category::Basico;

/// Errors that can occur while calling the completion service.
#[derive(Error, Debug)]
pub enum CompletionError {
    /// The service answered with a non-success status.
    #[error("{0}")]
    Upstream(String),

    /// No credential was configured for the service.
    #[error("authentication failed: OPENAI_API_KEY is not set")]
    MissingApiKey,

    /// The request never produced a response (connect error, timeout, bad body).
    #[error("transport error: {0}")]
    Transport(String),

    /// The service answered without any completion content.
    #[error("no completion content in response")]
    EmptyResponse,

    /// The outgoing request could not be built.
    #[error("invalid completion request: {0}")]
    InvalidRequest(String),
}

/// Classified reason a completion call failed.
///
/// Classification is by case-insensitive substring match on the rendered
/// error, checked in declaration order. The first match wins.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UpstreamFailure {
    Authentication,
    RateLimited,
    QuotaExhausted,
    PermissionDenied,
    Other,
}

impl UpstreamFailure {
    const RULES: [(UpstreamFailure, [&'static str; 2]); 4] = [
        (UpstreamFailure::Authentication, ["authentication", "401"]),
        (UpstreamFailure::RateLimited, ["rate_limit", "429"]),
        (UpstreamFailure::QuotaExhausted, ["insufficient_quota", "quota"]),
        (UpstreamFailure::PermissionDenied, ["permission", "403"]),
    ];

    /// Classifies a rendered error message.
    pub fn classify(message: &str) -> Self {
        let lowered = message.to_lowercase();
        Self::RULES
            .iter()
            .find(|(_, needles)| needles.iter().any(|n| lowered.contains(n)))
            .map(|(kind, _)| *kind)
            .unwrap_or(UpstreamFailure::Other)
    }
}

impl From<&CompletionError> for UpstreamFailure {
    fn from(err: &CompletionError) -> Self {
        UpstreamFailure::classify(&err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn classifies_each_rule() {
        assert_eq!(
            UpstreamFailure::classify("OpenAI API error 401 Unauthorized: {}"),
            UpstreamFailure::Authentication
        );
        assert_eq!(
            UpstreamFailure::classify("AuthenticationError: bad key"),
            UpstreamFailure::Authentication
        );
        assert_eq!(
            UpstreamFailure::classify("code: rate_limit_exceeded"),
            UpstreamFailure::RateLimited
        );
        assert_eq!(
            UpstreamFailure::classify("You exceeded your current QUOTA"),
            UpstreamFailure::QuotaExhausted
        );
        assert_eq!(
            UpstreamFailure::classify("OpenAI API error 403 Forbidden"),
            UpstreamFailure::PermissionDenied
        );
        assert_eq!(
            UpstreamFailure::classify("connection reset by peer"),
            UpstreamFailure::Other
        );
    }

    #[test]
    fn first_matching_rule_wins() {
        // 429 body that also mentions quota and permission
        assert_eq!(
            UpstreamFailure::classify("429: insufficient_quota, check permission"),
            UpstreamFailure::RateLimited
        );
        // authentication outranks rate limiting
        assert_eq!(
            UpstreamFailure::classify("401 after 429"),
            UpstreamFailure::Authentication
        );
        assert_eq!(
            UpstreamFailure::classify("insufficient_quota (403)"),
            UpstreamFailure::QuotaExhausted
        );
    }

    #[test]
    fn missing_api_key_counts_as_authentication() {
        let err = CompletionError::MissingApiKey;
        assert_eq!(UpstreamFailure::from(&err), UpstreamFailure::Authentication);
    }

    #[test]
    fn empty_response_is_unclassified() {
        let err = CompletionError::EmptyResponse;
        assert_eq!(UpstreamFailure::from(&err), UpstreamFailure::Other);
    }
}
