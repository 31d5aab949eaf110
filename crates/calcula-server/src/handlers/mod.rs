//! HTTP route handlers.

pub mod calculate;
pub mod index;

use crate::error::AppError;

/// Fallback for unmatched routes and methods.
pub async fn not_found() -> AppError {
    AppError::NotFound
}
