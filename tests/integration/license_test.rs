//! Integration tests for license administration and the system log.

use http::StatusCode;

use crate::helpers::{GLOBAL_ADMIN_PLATFORM_ID, TestApp};

#[tokio::test]
#[ignore = "requires a PostgreSQL instance"]
async fn test_granted_license_lets_a_user_sign_in() {
    let app = TestApp::new().await;
    let admin_token = app.sign_in(GLOBAL_ADMIN_PLATFORM_ID, "root_admin").await;

    // Unlicensed so far: sign-in must be refused.
    app.create_user(8_001, "new_dev").await;
    let before = app
        .request(
            "POST",
            "/api/auth/session",
            Some(serde_json::json!({
                "platformUserId": 8_001,
                "username": "new_dev",
                "displayName": "new_dev",
            })),
            None,
        )
        .await;
    assert_eq!(before.status, StatusCode::FORBIDDEN);

    let grant = app
        .request(
            "POST",
            "/api/licenses",
            Some(serde_json::json!({
                "platformUserId": 8_001,
                "displayName": "new_dev",
            })),
            Some(&admin_token),
        )
        .await;
    assert_eq!(grant.status, StatusCode::OK, "{:?}", grant.body);
    assert_eq!(grant.body["data"]["platformUserId"], 8_001);
    assert_eq!(grant.body["data"]["active"], true);
    assert_eq!(grant.body["data"]["grantedByName"], "root_admin");

    let token = app.sign_in(8_001, "new_dev").await;
    assert!(!token.is_empty());
}

#[tokio::test]
#[ignore = "requires a PostgreSQL instance"]
async fn test_only_the_global_admin_manages_licenses() {
    let app = TestApp::new().await;
    app.create_licensed_user(8_002, "regular_dev").await;
    let token = app.sign_in(8_002, "regular_dev").await;

    let grant = app
        .request(
            "POST",
            "/api/licenses",
            Some(serde_json::json!({
                "platformUserId": 8_003,
                "displayName": "friend",
            })),
            Some(&token),
        )
        .await;
    assert_eq!(grant.status, StatusCode::FORBIDDEN);
    assert_eq!(grant.body["message"], "Global admin access required");

    let list = app.request("GET", "/api/licenses", None, Some(&token)).await;
    assert_eq!(list.status, StatusCode::FORBIDDEN);

    let revoke = app
        .request("DELETE", "/api/licenses/8002", None, Some(&token))
        .await;
    assert_eq!(revoke.status, StatusCode::FORBIDDEN);
}

#[tokio::test]
#[ignore = "requires a PostgreSQL instance"]
async fn test_revoking_a_license_locks_the_account_out() {
    let app = TestApp::new().await;
    let admin_token = app.sign_in(GLOBAL_ADMIN_PLATFORM_ID, "root_admin").await;

    app.create_licensed_user(8_004, "short_timer").await;
    app.sign_in(8_004, "short_timer").await;

    let revoke = app
        .request("DELETE", "/api/licenses/8004", None, Some(&admin_token))
        .await;
    assert_eq!(revoke.status, StatusCode::OK, "{:?}", revoke.body);
    assert_eq!(revoke.body["data"]["active"], false);

    let attempt = app
        .request(
            "POST",
            "/api/auth/session",
            Some(serde_json::json!({
                "platformUserId": 8_004,
                "username": "short_timer",
                "displayName": "short_timer",
            })),
            None,
        )
        .await;
    assert_eq!(attempt.status, StatusCode::FORBIDDEN);
    assert_eq!(attempt.body["message"], "No active license for this account");
}

#[tokio::test]
#[ignore = "requires a PostgreSQL instance"]
async fn test_revoking_an_unknown_license_is_not_found() {
    let app = TestApp::new().await;
    let admin_token = app.sign_in(GLOBAL_ADMIN_PLATFORM_ID, "root_admin").await;

    let response = app
        .request("DELETE", "/api/licenses/999999", None, Some(&admin_token))
        .await;
    assert_eq!(response.status, StatusCode::NOT_FOUND);
}

#[tokio::test]
#[ignore = "requires a PostgreSQL instance"]
async fn test_system_log_is_global_admin_only() {
    let app = TestApp::new().await;
    let admin_token = app.sign_in(GLOBAL_ADMIN_PLATFORM_ID, "root_admin").await;
    app.create_licensed_user(8_005, "regular_dev").await;
    let token = app.sign_in(8_005, "regular_dev").await;

    let denied = app.request("GET", "/api/logs", None, Some(&token)).await;
    assert_eq!(denied.status, StatusCode::FORBIDDEN);

    let allowed = app.request("GET", "/api/logs", None, Some(&admin_token)).await;
    assert_eq!(allowed.status, StatusCode::OK, "{:?}", allowed.body);

    // Sign-ins are project-less entries; only this view carries them.
    let actions: Vec<&str> = allowed.body["data"]["items"]
        .as_array()
        .unwrap()
        .iter()
        .map(|entry| entry["action"].as_str().unwrap())
        .collect();
    assert!(actions.contains(&"auth.sign_in"), "{actions:?}");
}
