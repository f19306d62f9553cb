//! Error types for the cache server
//!
//! Provides unified error handling using thiserror. Protocol outcomes are
//! not errors: they travel as [`Reply`](crate::command::Reply) values.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;

// == Cache Error Enum ==
/// Unified error type for the cache server.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum CacheError {
    /// Configured eviction policy name is not recognised
    #[error("Unknown eviction policy: {0}")]
    UnknownPolicy(String),

    /// Text that should have been a signed integer
    #[error("Invalid number: {0:?}")]
    InvalidNumber(String),

    /// An engine at capacity found no key to evict
    #[error("Eviction ledger inconsistent: {entries} entries but no evictable key")]
    LedgerInconsistent { entries: usize },

    /// Internal server error
    #[error("Internal error: {0}")]
    Internal(String),
}

// == IntoResponse Implementation ==
impl IntoResponse for CacheError {
    fn into_response(self) -> Response {
        let status = match &self {
            CacheError::UnknownPolicy(_) | CacheError::InvalidNumber(_) => {
                StatusCode::BAD_REQUEST
            }
            CacheError::LedgerInconsistent { .. } | CacheError::Internal(_) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        };

        let body = Json(json!({
            "error": self.to_string()
        }));

        (status, body).into_response()
    }
}

// == Result Type Alias ==
/// Convenience Result type for the cache server.
pub type Result<T> = std::result::Result<T, CacheError>;
