//! Integration tests for the health endpoints.

use http::StatusCode;

use crate::helpers::TestApp;

#[tokio::test]
async fn test_health_reports_ok() {
    let app = TestApp::detached();

    let response = app.request("GET", "/api/health", None, None).await;

    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(response.body["success"], true);
    assert_eq!(response.body["data"]["status"], "ok");
    assert!(!response.body["data"]["version"].as_str().unwrap().is_empty());
}

#[tokio::test]
async fn test_detailed_health_reports_database_state() {
    let app = TestApp::detached();

    let response = app.request("GET", "/api/health/detailed", None, None).await;

    // The endpoint itself stays 200; degradation lives in the body.
    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(response.body["data"]["status"], "degraded");
    assert_eq!(response.body["data"]["database"], "unreachable");
}
