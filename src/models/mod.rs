//! Request and Response models for the cache server API
//!
//! This module defines the DTOs (Data Transfer Objects) used for
//! deserializing query strings and serializing reply bodies.

pub mod requests;
pub mod responses;

// Re-export commonly used types
pub use requests::{CasParams, NumParams, StoreParams};
pub use responses::{HealthResponse, ReplyResponse};
