//! Integration Tests for API Endpoints
//!
//! Tests full request/response cycle for each verb.

use axum::{
    body::Body,
    http::{Request, StatusCode},
    Router,
};
use mini_memcached::{api::create_router, cache::EvictionPolicy, AppState};
use serde_json::Value;
use std::thread::sleep;
use std::time::Duration;
use tower::ServiceExt;

// == Helper Functions ==

fn create_test_app(policy: EvictionPolicy, capacity: usize) -> Router {
    create_router(AppState::new(policy, capacity))
}

async fn call(app: &Router, uri: &str) -> (StatusCode, Value) {
    let response = app
        .clone()
        .oneshot(
            Request::builder()
                .method("GET")
                .uri(uri)
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();
    let status = response.status();
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    (status, serde_json::from_slice(&bytes).unwrap())
}

async fn reply(app: &Router, uri: &str) -> String {
    let (status, json) = call(app, uri).await;
    assert_eq!(status, StatusCode::OK, "{uri}");
    json["reply"].as_str().unwrap().to_string()
}

async fn value(app: &Router, key: &str) -> Option<String> {
    let (_, json) = call(app, &format!("/get/{key}")).await;
    json.get("value").and_then(Value::as_str).map(str::to_string)
}

// == Storage Verbs ==

#[tokio::test]
async fn test_set_then_get() {
    let app = create_test_app(EvictionPolicy::Lfu, 100);

    assert_eq!(reply(&app, "/set/greeting?val=hello").await, "STORED");

    let (status, json) = call(&app, "/get/greeting").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["reply"], "VALUE");
    assert_eq!(json["value"], "hello");
}

#[tokio::test]
async fn test_get_missing_key() {
    let app = create_test_app(EvictionPolicy::Lfu, 100);

    let (status, json) = call(&app, "/get/nothing").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["reply"], "NOT_FOUND");
    assert!(json.get("value").is_none());
}

#[tokio::test]
async fn test_set_with_empty_value() {
    let app = create_test_app(EvictionPolicy::Lru, 100);

    assert_eq!(reply(&app, "/set/empty").await, "STORED");
    assert_eq!(value(&app, "empty").await.as_deref(), Some(""));
}

#[tokio::test]
async fn test_malformed_exptime() {
    let app = create_test_app(EvictionPolicy::Lru, 100);

    assert_eq!(reply(&app, "/set/k?val=v&exp=tomorrow").await, "CLIENT_ERROR");
    assert_eq!(reply(&app, "/get/k").await, "NOT_FOUND");
}

#[tokio::test]
async fn test_add_and_replace_preconditions() {
    let app = create_test_app(EvictionPolicy::LfuLruTiebreak, 100);

    assert_eq!(reply(&app, "/replace/k?val=v").await, "NOT_STORED");
    assert_eq!(reply(&app, "/get/k").await, "NOT_FOUND");

    assert_eq!(reply(&app, "/add/k?val=first").await, "STORED");
    assert_eq!(reply(&app, "/add/k?val=second").await, "NOT_STORED");
    assert_eq!(value(&app, "k").await.as_deref(), Some("first"));

    assert_eq!(reply(&app, "/replace/k?val=third").await, "STORED");
    assert_eq!(value(&app, "k").await.as_deref(), Some("third"));
}

#[tokio::test]
async fn test_append_and_prepend() {
    let app = create_test_app(EvictionPolicy::Lfu, 100);

    assert_eq!(reply(&app, "/append/k?val=x").await, "NOT_STORED");

    reply(&app, "/set/k?val=mid").await;
    assert_eq!(reply(&app, "/append/k?val=-end").await, "STORED");
    assert_eq!(reply(&app, "/prepend/k?val=start-").await, "STORED");
    assert_eq!(value(&app, "k").await.as_deref(), Some("start-mid-end"));
}

// == Arithmetic Verbs ==

#[tokio::test]
async fn test_increment_and_decrement() {
    let app = create_test_app(EvictionPolicy::Lru, 100);

    assert_eq!(reply(&app, "/increment/n?num=1").await, "NOT_FOUND");

    reply(&app, "/set/n?val=10").await;
    assert_eq!(reply(&app, "/increment/n?num=5").await, "STORED");
    assert_eq!(reply(&app, "/decrement/n?num=3").await, "STORED");
    assert_eq!(value(&app, "n").await.as_deref(), Some("12"));

    assert_eq!(reply(&app, "/increment/n?num=abc").await, "CLIENT_ERROR");
    assert_eq!(reply(&app, "/increment/n").await, "CLIENT_ERROR");
    assert_eq!(value(&app, "n").await.as_deref(), Some("12"));
}

#[tokio::test]
async fn test_increment_non_numeric_value() {
    let app = create_test_app(EvictionPolicy::Lfu, 100);

    reply(&app, "/set/word?val=hello").await;
    assert_eq!(reply(&app, "/increment/word?num=1").await, "CLIENT_ERROR");
    assert_eq!(value(&app, "word").await.as_deref(), Some("hello"));
}

// == Delete ==

#[tokio::test]
async fn test_delete() {
    let app = create_test_app(EvictionPolicy::Lfu, 100);

    reply(&app, "/set/gone?val=v").await;
    assert_eq!(reply(&app, "/delete/gone").await, "DELETED");
    assert_eq!(reply(&app, "/delete/gone").await, "NOT_FOUND");
    assert_eq!(reply(&app, "/get/gone").await, "NOT_FOUND");
}

// == Unimplemented Verbs ==

#[tokio::test]
async fn test_unimplemented_verbs() {
    let app = create_test_app(EvictionPolicy::Lfu, 100);
    reply(&app, "/set/k?val=v").await;

    assert_eq!(reply(&app, "/cas/k?val=w&token=1").await, "NOT_IMPLEMENTED");
    assert_eq!(reply(&app, "/gets/k").await, "NOT_IMPLEMENTED");
    assert_eq!(reply(&app, "/clear").await, "NOT_IMPLEMENTED");
    assert_eq!(reply(&app, "/stats").await, "NOT_IMPLEMENTED");
    assert_eq!(value(&app, "k").await.as_deref(), Some("v"));
}

// == Eviction via API ==

#[tokio::test]
async fn test_lru_eviction_via_api() {
    let app = create_test_app(EvictionPolicy::Lru, 2);

    reply(&app, "/set/a?val=1").await;
    reply(&app, "/set/b?val=2").await;
    reply(&app, "/get/a").await;
    reply(&app, "/set/c?val=3").await;

    assert_eq!(reply(&app, "/get/b").await, "NOT_FOUND");
    assert_eq!(value(&app, "a").await.as_deref(), Some("1"));
    assert_eq!(value(&app, "c").await.as_deref(), Some("3"));
}

#[tokio::test]
async fn test_lfu_lru_reference_sequence_via_api() {
    let app = create_test_app(EvictionPolicy::LfuLruTiebreak, 2);

    reply(&app, "/set/1?val=1").await;
    reply(&app, "/set/2?val=2").await;
    assert_eq!(value(&app, "1").await.as_deref(), Some("1"));
    reply(&app, "/set/3?val=3").await;
    assert_eq!(value(&app, "2").await, None);
    assert_eq!(value(&app, "3").await.as_deref(), Some("3"));
    reply(&app, "/set/4?val=4").await;
    assert_eq!(value(&app, "1").await, None);
    assert_eq!(value(&app, "3").await.as_deref(), Some("3"));
    assert_eq!(value(&app, "4").await.as_deref(), Some("4"));
}

// == Health ==

#[tokio::test]
async fn test_health_endpoint() {
    let app = create_test_app(EvictionPolicy::LfuLruTiebreak, 10);

    let (status, json) = call(&app, "/health").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["status"], "healthy");
    assert_eq!(json["policy"], "lfu-lru-tiebreak");
    assert!(json.get("timestamp").is_some());
}

// == Expiry via API ==

#[tokio::test]
async fn test_expiry_via_api() {
    let app = create_test_app(EvictionPolicy::Lfu, 100);

    assert_eq!(reply(&app, "/set/ttl_test?val=soon&exp=1").await, "STORED");
    assert_eq!(reply(&app, "/get/ttl_test").await, "VALUE");

    sleep(Duration::from_millis(1100));

    assert_eq!(reply(&app, "/get/ttl_test").await, "NOT_FOUND");
}

#[tokio::test]
async fn test_update_without_exptime_keeps_deadline() {
    let app = create_test_app(EvictionPolicy::Lru, 100);

    reply(&app, "/set/k?val=v1&exp=1").await;
    reply(&app, "/set/k?val=v2").await;
    assert_eq!(value(&app, "k").await.as_deref(), Some("v2"));

    sleep(Duration::from_millis(1100));

    assert_eq!(reply(&app, "/get/k").await, "NOT_FOUND");
}
