//! API Routes
//!
//! Configures the Axum router with all cache server endpoints.

use std::any::Any;

use axum::{
    http::{header, HeaderValue},
    response::{IntoResponse, Response},
    routing::get,
    Router,
};
use tower_http::{
    catch_panic::CatchPanicLayer, set_header::SetResponseHeaderLayer, trace::TraceLayer,
};
use tracing::error;

use super::handlers::{
    add_handler, append_handler, cas_handler, clear_handler, decrement_handler, delete_handler,
    get_handler, gets_handler, health_handler, home_handler, increment_handler, prepend_handler,
    replace_handler, set_handler, stats_handler, AppState,
};
use crate::error::CacheError;

/// Creates the main router with all endpoints configured.
///
/// # Endpoints
/// Every verb is a `GET` on `/<verb>/:key` with `val`, `exp` or `num`
/// query parameters; `/clear`, `/stats`, `/health` and `/` take none.
pub fn create_router(state: AppState) -> Router {
    let routes = Router::new()
        .route("/", get(home_handler))
        .route("/health", get(health_handler))
        .route("/set/:key", get(set_handler))
        .route("/add/:key", get(add_handler))
        .route("/replace/:key", get(replace_handler))
        .route("/append/:key", get(append_handler))
        .route("/prepend/:key", get(prepend_handler))
        .route("/increment/:key", get(increment_handler))
        .route("/decrement/:key", get(decrement_handler))
        .route("/cas/:key", get(cas_handler))
        .route("/get/:key", get(get_handler))
        .route("/gets/:key", get(gets_handler))
        .route("/delete/:key", get(delete_handler))
        .route("/clear", get(clear_handler))
        .route("/stats", get(stats_handler))
        .with_state(state);

    with_middleware(routes)
}

/// Wraps a router in the standard middleware stack.
///
/// # Middleware
/// - Panic recovery: a panicking handler becomes a 500 JSON error
/// - Tracing: Logs all requests
/// - Security headers: `X-XSS-Protection` and `X-Frame-Options`
pub fn with_middleware(router: Router) -> Router {
    router
        .layer(SetResponseHeaderLayer::overriding(
            header::X_XSS_PROTECTION,
            HeaderValue::from_static("1;mode=block"),
        ))
        .layer(SetResponseHeaderLayer::overriding(
            header::X_FRAME_OPTIONS,
            HeaderValue::from_static("deny"),
        ))
        .layer(TraceLayer::new_for_http())
        .layer(CatchPanicLayer::custom(handle_panic))
}

fn handle_panic(err: Box<dyn Any + Send + 'static>) -> Response {
    let detail = if let Some(s) = err.downcast_ref::<String>() {
        s.clone()
    } else if let Some(s) = err.downcast_ref::<&str>() {
        s.to_string()
    } else {
        "unknown panic".to_string()
    };
    error!(%detail, "handler panicked");

    let mut response = CacheError::Internal(detail).into_response();
    response
        .headers_mut()
        .insert(header::CONNECTION, HeaderValue::from_static("close"));
    response
}
