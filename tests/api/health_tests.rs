//! Health Check API Tests

use axum::http::StatusCode;
use serde_json::Value;

use crate::common::{json_body, TestApp};

#[tokio::test]
async fn test_health_check_returns_ok() {
    let app = TestApp::new();

    let response = app.get("/health", None).await;

    assert_eq!(response.status(), StatusCode::OK);
    let body: Value = json_body(response).await;
    assert_eq!(body["status"], "healthy");
    assert_eq!(body["version"], env!("CARGO_PKG_VERSION"));
}

#[tokio::test]
async fn test_liveness_needs_no_session() {
    let app = TestApp::new();

    let response = app.get("/health/live", None).await;

    assert_eq!(response.status(), StatusCode::OK);
    let body: Value = json_body(response).await;
    assert_eq!(body["status"], "alive");
}

#[tokio::test]
async fn test_readiness_reports_unreachable_database() {
    let app = TestApp::new();

    let response = app.get("/health/ready", None).await;

    assert_eq!(response.status(), StatusCode::SERVICE_UNAVAILABLE);
    let body: Value = json_body(response).await;
    assert_eq!(body["status"], "unhealthy");
    assert_eq!(body["database"]["message"], "Database unavailable");
}

#[tokio::test]
async fn test_security_headers_are_set() {
    let app = TestApp::new();

    let response = app.get("/health", None).await;

    let headers = response.headers();
    assert_eq!(headers.get("x-content-type-options").unwrap(), "nosniff");
    assert_eq!(headers.get("x-frame-options").unwrap(), "DENY");
    // only production sends HSTS
    assert!(headers.get("strict-transport-security").is_none());
}
