//! Tests for unsigned routes and request id propagation.

use axum::body::Body;
use axum::http::{Request, StatusCode};
use devis_proxy_integration_tests::{Reply, SECRET, StubTransport, send, test_app, unsigned_get};
use serde_json::json;

fn app() -> axum::Router {
    test_app(SECRET, StubTransport::new(Reply::Data(json!({}))))
}

#[tokio::test]
async fn test_banner_needs_no_signature() {
    let response = send(app(), unsigned_get("/")).await;

    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(response.body, b"devis proxy is running");
}

#[tokio::test]
async fn test_health_needs_no_signature() {
    let response = send(app(), unsigned_get("/health")).await;

    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(response.body, b"ok");
}

#[tokio::test]
async fn test_request_id_is_echoed() {
    let request = Request::builder()
        .uri("/health")
        .header("x-request-id", "req-abc-123")
        .body(Body::empty())
        .expect("valid request");

    let response = send(app(), request).await;

    assert_eq!(response.header("x-request-id"), Some("req-abc-123"));
}

#[tokio::test]
async fn test_request_id_is_generated() {
    let response = send(app(), unsigned_get("/health")).await;

    let id = response.header("x-request-id").expect("request id header");
    assert_eq!(id.len(), 36);
}

#[tokio::test]
async fn test_rejected_request_still_carries_request_id() {
    let request = Request::builder()
        .uri("/devis?customer_id=1")
        .header("x-request-id", "req-denied")
        .body(Body::empty())
        .expect("valid request");

    let response = send(app(), request).await;

    assert_eq!(response.status, StatusCode::UNAUTHORIZED);
    assert_eq!(response.header("x-request-id"), Some("req-denied"));
}

#[tokio::test]
async fn test_unknown_route_is_not_found() {
    let response = send(app(), unsigned_get("/nope")).await;

    assert_eq!(response.status, StatusCode::NOT_FOUND);
}
