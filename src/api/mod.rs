//! API Module
//!
//! HTTP handlers and routing for the cache server.
//!
//! # Endpoints
//! - `GET /set/:key`, `/add/:key`, `/replace/:key`, `/append/:key`, `/prepend/:key`
//! - `GET /increment/:key`, `/decrement/:key`
//! - `GET /get/:key`, `/gets/:key`, `/delete/:key`, `/cas/:key`
//! - `GET /clear`, `/stats`
//! - `GET /health`, `/`

pub mod handlers;
pub mod routes;

pub use handlers::*;
pub use routes::{create_router, with_middleware};
