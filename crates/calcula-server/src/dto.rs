//! Data transfer objects for HTTP message serialization.

use serde::{Deserialize, Serialize};

/// Successful answer to a calculation request.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct CalculateResponse {
    pub resposta: String,
}

/// Body of every error response.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ErrorResponse {
    pub error: String,
}
