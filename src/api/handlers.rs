//! API Handlers
//!
//! HTTP request handlers translating query strings into adapter verbs.

use std::sync::Arc;

use axum::{
    extract::{Path, Query, State},
    Json,
};

use crate::cache::EvictionPolicy;
use crate::command::{CommandAdapter, Token};
use crate::config::Config;
use crate::models::{CasParams, HealthResponse, NumParams, ReplyResponse, StoreParams};

/// Application state shared across all handlers.
///
/// The adapter serialises engine access itself, so handlers share it
/// through a plain `Arc`.
#[derive(Clone)]
pub struct AppState {
    /// Thread-safe command adapter
    pub cache: Arc<CommandAdapter>,
    /// Policy the adapter was built with, reported by /health
    pub policy: EvictionPolicy,
}

impl AppState {
    /// Creates a new AppState with an empty engine for `policy`.
    pub fn new(policy: EvictionPolicy, capacity: usize) -> Self {
        Self {
            cache: Arc::new(CommandAdapter::with_policy(policy, capacity)),
            policy,
        }
    }

    /// Creates a new AppState from configuration.
    pub fn from_config(config: &Config) -> Self {
        Self::new(config.policy, config.capacity)
    }
}

/// Handler for GET /
pub async fn home_handler() -> &'static str {
    "Hello mini-memcached"
}

/// Handler for GET /health
pub async fn health_handler(State(state): State<AppState>) -> Json<HealthResponse> {
    Json(HealthResponse::healthy(state.policy.as_str()))
}

/// Handler for GET /set/:key
pub async fn set_handler(
    State(state): State<AppState>,
    Path(key): Path<String>,
    Query(params): Query<StoreParams>,
) -> Json<ReplyResponse> {
    let reply = state.cache.set(&key, &params.val, params.exptime());
    Json(ReplyResponse::new(reply))
}

/// Handler for GET /add/:key
pub async fn add_handler(
    State(state): State<AppState>,
    Path(key): Path<String>,
    Query(params): Query<StoreParams>,
) -> Json<ReplyResponse> {
    let reply = state.cache.add(&key, &params.val, params.exptime());
    Json(ReplyResponse::new(reply))
}

/// Handler for GET /replace/:key
pub async fn replace_handler(
    State(state): State<AppState>,
    Path(key): Path<String>,
    Query(params): Query<StoreParams>,
) -> Json<ReplyResponse> {
    let reply = state.cache.replace(&key, &params.val, params.exptime());
    Json(ReplyResponse::new(reply))
}

/// Handler for GET /append/:key
pub async fn append_handler(
    State(state): State<AppState>,
    Path(key): Path<String>,
    Query(params): Query<StoreParams>,
) -> Json<ReplyResponse> {
    let reply = state.cache.append(&key, &params.val, params.exptime());
    Json(ReplyResponse::new(reply))
}

/// Handler for GET /prepend/:key
pub async fn prepend_handler(
    State(state): State<AppState>,
    Path(key): Path<String>,
    Query(params): Query<StoreParams>,
) -> Json<ReplyResponse> {
    let reply = state.cache.prepend(&key, &params.val, params.exptime());
    Json(ReplyResponse::new(reply))
}

/// Handler for GET /increment/:key
pub async fn increment_handler(
    State(state): State<AppState>,
    Path(key): Path<String>,
    Query(params): Query<NumParams>,
) -> Json<ReplyResponse> {
    Json(ReplyResponse::new(state.cache.increment(&key, &params.num)))
}

/// Handler for GET /decrement/:key
pub async fn decrement_handler(
    State(state): State<AppState>,
    Path(key): Path<String>,
    Query(params): Query<NumParams>,
) -> Json<ReplyResponse> {
    Json(ReplyResponse::new(state.cache.decrement(&key, &params.num)))
}

/// Handler for GET /cas/:key
pub async fn cas_handler(
    State(state): State<AppState>,
    Path(key): Path<String>,
    Query(params): Query<CasParams>,
) -> Json<ReplyResponse> {
    let token = Token(params.token.clone());
    let reply = state
        .cache
        .compare_and_swap(&key, &params.val, params.exptime(), &token);
    Json(ReplyResponse::new(reply))
}

/// Handler for GET /get/:key
pub async fn get_handler(
    State(state): State<AppState>,
    Path(key): Path<String>,
) -> Json<ReplyResponse> {
    let (reply, value) = state.cache.get(&key);
    Json(ReplyResponse::with_value(reply, value))
}

/// Handler for GET /gets/:key
pub async fn gets_handler(
    State(state): State<AppState>,
    Path(key): Path<String>,
) -> Json<ReplyResponse> {
    let (reply, value, token) = state.cache.get_entry_plus_token(&key);
    Json(ReplyResponse::with_token(reply, value, token))
}

/// Handler for GET /delete/:key
pub async fn delete_handler(
    State(state): State<AppState>,
    Path(key): Path<String>,
) -> Json<ReplyResponse> {
    Json(ReplyResponse::new(state.cache.delete(&key)))
}

/// Handler for GET /clear
pub async fn clear_handler(State(state): State<AppState>) -> Json<ReplyResponse> {
    Json(ReplyResponse::new(state.cache.clear()))
}

/// Handler for GET /stats
pub async fn stats_handler(State(state): State<AppState>) -> Json<ReplyResponse> {
    Json(ReplyResponse::new(state.cache.stats()))
}
