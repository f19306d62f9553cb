//! Response DTOs for the cache server API
//!
//! Defines the structure of outgoing HTTP response bodies.

use serde::Serialize;

use crate::command::{Reply, Token};

/// Body returned by every cache verb
///
/// `value` is present for a Get hit; `token` only when one was issued.
#[derive(Debug, Clone, Serialize)]
pub struct ReplyResponse {
    pub reply: Reply,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub value: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub token: Option<String>,
}

impl ReplyResponse {
    /// Creates a bare reply
    pub fn new(reply: Reply) -> Self {
        Self {
            reply,
            value: None,
            token: None,
        }
    }

    /// Creates a reply carrying a value payload
    pub fn with_value(reply: Reply, value: Option<String>) -> Self {
        Self {
            value,
            ..Self::new(reply)
        }
    }

    /// Creates a reply carrying a value payload and a CAS token
    pub fn with_token(reply: Reply, value: Option<String>, token: Option<Token>) -> Self {
        Self {
            value,
            token: token.map(|token| token.0),
            reply,
        }
    }
}

/// Response body for the health endpoint (GET /health)
#[derive(Debug, Clone, Serialize)]
pub struct HealthResponse {
    /// Health status (e.g., "healthy")
    pub status: String,
    /// Eviction policy serving requests
    pub policy: String,
    /// Current timestamp in ISO 8601 format
    pub timestamp: String,
}

impl HealthResponse {
    /// Creates a new HealthResponse with current timestamp
    pub fn healthy(policy: impl Into<String>) -> Self {
        Self {
            status: "healthy".to_string(),
            policy: policy.into(),
            timestamp: chrono::Utc::now().to_rfc3339(),
        }
    }
}
