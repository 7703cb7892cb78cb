//! Integration tests for sign-in and session handling.

use http::StatusCode;

use crate::helpers::{GLOBAL_ADMIN_PLATFORM_ID, TestApp};

#[tokio::test]
#[ignore = "requires a PostgreSQL instance"]
async fn test_sign_in_issues_usable_session() {
    let app = TestApp::new().await;
    app.create_licensed_user(1_001, "kate").await;

    let token = app.sign_in(1_001, "kate").await;

    let response = app.request("GET", "/api/auth/me", None, Some(&token)).await;
    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(response.body["data"]["username"], "kate");
    assert_eq!(response.body["data"]["platformUserId"], 1_001);
    assert_eq!(response.body["data"]["isGlobalAdmin"], false);
}

#[tokio::test]
#[ignore = "requires a PostgreSQL instance"]
async fn test_sign_in_without_license_is_forbidden() {
    let app = TestApp::new().await;
    app.create_user(1_002, "drifter").await;

    let response = app
        .request(
            "POST",
            "/api/auth/session",
            Some(serde_json::json!({
                "platformUserId": 1_002,
                "username": "drifter",
                "displayName": "drifter",
            })),
            None,
        )
        .await;

    assert_eq!(response.status, StatusCode::FORBIDDEN);
    assert_eq!(response.body["error"], "FORBIDDEN");
    assert_eq!(response.body["message"], "No active license for this account");
}

#[tokio::test]
#[ignore = "requires a PostgreSQL instance"]
async fn test_global_admin_is_auto_licensed_on_first_sign_in() {
    let app = TestApp::new().await;

    // No seeded rows at all: the first sign-in creates both the
    // account and the license.
    let response = app
        .request(
            "POST",
            "/api/auth/session",
            Some(serde_json::json!({
                "platformUserId": GLOBAL_ADMIN_PLATFORM_ID,
                "username": "warden_admin",
                "displayName": "warden_admin",
            })),
            None,
        )
        .await;

    assert_eq!(response.status, StatusCode::OK, "{:?}", response.body);
    assert_eq!(response.body["data"]["user"]["isGlobalAdmin"], true);

    let token = response.body["data"]["token"].as_str().unwrap().to_string();
    let licenses = app.request("GET", "/api/licenses", None, Some(&token)).await;
    assert_eq!(licenses.status, StatusCode::OK);

    let granted: Vec<i64> = licenses.body["data"]
        .as_array()
        .unwrap()
        .iter()
        .map(|l| l["platformUserId"].as_i64().unwrap())
        .collect();
    assert!(granted.contains(&GLOBAL_ADMIN_PLATFORM_ID));
}

#[tokio::test]
async fn test_me_requires_a_token() {
    let app = TestApp::detached();

    let response = app.request("GET", "/api/auth/me", None, None).await;

    assert_eq!(response.status, StatusCode::UNAUTHORIZED);
    assert_eq!(response.body["error"], "UNAUTHORIZED");
}

#[tokio::test]
async fn test_me_rejects_malformed_token() {
    let app = TestApp::detached();

    let response = app
        .request("GET", "/api/auth/me", None, Some("not-a-real-token"))
        .await;

    assert_eq!(response.status, StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_sign_in_rejects_invalid_identity() {
    let app = TestApp::detached();

    // Validation runs before anything touches the database.
    let response = app
        .request(
            "POST",
            "/api/auth/session",
            Some(serde_json::json!({
                "platformUserId": 0,
                "username": "",
                "displayName": "x",
            })),
            None,
        )
        .await;

    assert_eq!(response.status, StatusCode::BAD_REQUEST);
    assert_eq!(response.body["error"], "VALIDATION_ERROR");
}
