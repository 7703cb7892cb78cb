//! Integration tests for moderation command dispatch and auditing.

use http::StatusCode;
use uuid::Uuid;

use warden_entity::member::MemberRole;

use crate::helpers::TestApp;

/// Actions recorded in the project log, newest first.
async fn logged_actions(app: &TestApp, token: &str, project_id: Uuid) -> Vec<(String, String)> {
    let response = app
        .request(
            "GET",
            &format!("/api/projects/{project_id}/logs"),
            None,
            Some(token),
        )
        .await;
    assert_eq!(response.status, StatusCode::OK, "{:?}", response.body);

    response.body["data"]["items"]
        .as_array()
        .unwrap()
        .iter()
        .map(|entry| {
            (
                entry["action"].as_str().unwrap().to_string(),
                entry["status"].as_str().unwrap().to_string(),
            )
        })
        .collect()
}

#[tokio::test]
#[ignore = "requires a PostgreSQL instance"]
async fn test_moderator_can_kick() {
    let app = TestApp::new().await;
    app.create_licensed_user(4_001, "owner_pat").await;
    app.create_licensed_user(4_002, "mod_kate").await;
    let owner_token = app.sign_in(4_001, "owner_pat").await;
    let mod_token = app.sign_in(4_002, "mod_kate").await;

    let (project_id, _) = app.create_project(&owner_token, "Dungeon Crawl").await;
    app.add_member(&owner_token, project_id, 4_002, MemberRole::Moderator)
        .await;

    let response = app
        .request(
            "POST",
            &format!("/api/projects/{project_id}/commands"),
            Some(serde_json::json!({
                "action": "kick",
                "targetUserId": 42,
                "reason": "AFK farming",
            })),
            Some(&mod_token),
        )
        .await;

    assert_eq!(response.status, StatusCode::OK, "{:?}", response.body);
    assert_eq!(response.body["data"]["action"], "kick");
    assert!(response.body["data"].get("ban").is_none());

    let published = app.gateway.recorded_publishes();
    assert_eq!(published.len(), 1);
    let (universe_id, topic, payload) = &published[0];
    assert_eq!(*universe_id, 9_001);
    assert_eq!(topic, "WardenCommands");
    assert_eq!(payload["action"], "kick");
    assert_eq!(payload["targetUserId"], 42);
    assert_eq!(payload["issuerName"], "mod_kate");

    let actions = logged_actions(&app, &owner_token, project_id).await;
    assert!(
        actions.contains(&("moderation.kick".to_string(), "success".to_string())),
        "{actions:?}"
    );
}

#[tokio::test]
#[ignore = "requires a PostgreSQL instance"]
async fn test_moderator_cannot_ban() {
    let app = TestApp::new().await;
    app.create_licensed_user(4_003, "owner_pat").await;
    app.create_licensed_user(4_004, "mod_kate").await;
    let owner_token = app.sign_in(4_003, "owner_pat").await;
    let mod_token = app.sign_in(4_004, "mod_kate").await;

    let (project_id, _) = app.create_project(&owner_token, "Dungeon Crawl").await;
    app.add_member(&owner_token, project_id, 4_004, MemberRole::Moderator)
        .await;

    let response = app
        .request(
            "POST",
            &format!("/api/projects/{project_id}/commands"),
            Some(serde_json::json!({
                "action": "ban",
                "targetUserId": 42,
                "targetName": "Grifter",
                "reason": "Exploiting",
                "duration": "7d",
            })),
            Some(&mod_token),
        )
        .await;

    assert_eq!(response.status, StatusCode::FORBIDDEN);

    // Denied before any side effect: nothing published, nothing logged.
    assert!(app.gateway.recorded_publishes().is_empty());
    let actions = logged_actions(&app, &owner_token, project_id).await;
    assert!(!actions.iter().any(|(action, _)| action == "moderation.ban"));
}

#[tokio::test]
#[ignore = "requires a PostgreSQL instance"]
async fn test_admin_ban_creates_active_ban_and_enforces() {
    let app = TestApp::new().await;
    app.create_licensed_user(4_005, "owner_pat").await;
    app.create_licensed_user(4_006, "admin_jo").await;
    let owner_token = app.sign_in(4_005, "owner_pat").await;
    let admin_token = app.sign_in(4_006, "admin_jo").await;

    let (project_id, _) = app.create_project(&owner_token, "Dungeon Crawl").await;
    app.add_member(&owner_token, project_id, 4_006, MemberRole::Admin)
        .await;

    let response = app
        .request(
            "POST",
            &format!("/api/projects/{project_id}/commands"),
            Some(serde_json::json!({
                "action": "ban",
                "targetUserId": 42,
                "targetName": "Grifter",
                "reason": "Exploiting",
                "privateReason": "Speed hacks, third report",
                "duration": "1d",
            })),
            Some(&admin_token),
        )
        .await;

    assert_eq!(response.status, StatusCode::OK, "{:?}", response.body);
    let ban = &response.body["data"]["ban"];
    assert_eq!(ban["active"], true);
    assert_eq!(ban["duration"], "1d");
    assert_eq!(ban["durationSeconds"], 86_400);
    assert!(ban["expiresAt"].is_string());
    assert_eq!(ban["issuerName"], "admin_jo");

    let enforcement = app.gateway.recorded_bans();
    assert_eq!(enforcement.len(), 1);
    assert_eq!(enforcement[0].user_id, 42);
    assert_eq!(enforcement[0].duration_seconds, Some(86_400));

    let payload = &app.gateway.recorded_publishes()[0].2;
    assert_eq!(payload["action"], "ban");
    assert_eq!(payload["durationSeconds"], 86_400);
}

#[tokio::test]
#[ignore = "requires a PostgreSQL instance"]
async fn test_permanent_ban_has_no_expiry() {
    let app = TestApp::new().await;
    app.create_licensed_user(4_007, "owner_pat").await;
    let owner_token = app.sign_in(4_007, "owner_pat").await;
    let (project_id, _) = app.create_project(&owner_token, "Dungeon Crawl").await;

    let response = app
        .request(
            "POST",
            &format!("/api/projects/{project_id}/commands"),
            Some(serde_json::json!({
                "action": "ban",
                "targetUserId": 43,
                "targetName": "Grifter",
                "reason": "Ban evasion",
                "duration": "permanent",
            })),
            Some(&owner_token),
        )
        .await;

    assert_eq!(response.status, StatusCode::OK, "{:?}", response.body);
    let ban = &response.body["data"]["ban"];
    assert!(ban["durationSeconds"].is_null());
    assert!(ban["expiresAt"].is_null());

    assert_eq!(app.gateway.recorded_bans()[0].duration_seconds, None);
}

#[tokio::test]
#[ignore = "requires a PostgreSQL instance"]
async fn test_custom_duration_requires_expiry() {
    let app = TestApp::new().await;
    app.create_licensed_user(4_008, "owner_pat").await;
    let owner_token = app.sign_in(4_008, "owner_pat").await;
    let (project_id, _) = app.create_project(&owner_token, "Dungeon Crawl").await;

    let response = app
        .request(
            "POST",
            &format!("/api/projects/{project_id}/commands"),
            Some(serde_json::json!({
                "action": "ban",
                "targetUserId": 44,
                "targetName": "Grifter",
                "reason": "Exploiting",
                "duration": "custom",
            })),
            Some(&owner_token),
        )
        .await;

    assert_eq!(response.status, StatusCode::BAD_REQUEST);
    assert_eq!(response.body["error"], "VALIDATION_ERROR");
    assert!(app.gateway.recorded_bans().is_empty());
}

#[tokio::test]
#[ignore = "requires a PostgreSQL instance"]
async fn test_publish_failure_still_writes_audit_entry() {
    let app = TestApp::new().await;
    app.create_licensed_user(4_009, "owner_pat").await;
    let owner_token = app.sign_in(4_009, "owner_pat").await;
    let (project_id, _) = app.create_project(&owner_token, "Dungeon Crawl").await;

    app.gateway.set_fail_publish(true);

    let response = app
        .request(
            "POST",
            &format!("/api/projects/{project_id}/commands"),
            Some(serde_json::json!({
                "action": "kick",
                "targetUserId": 42,
                "reason": "AFK farming",
            })),
            Some(&owner_token),
        )
        .await;

    assert_eq!(response.status, StatusCode::BAD_GATEWAY);
    assert_eq!(response.body["error"], "UPSTREAM_ERROR");

    // The attempt is in the log even though delivery failed.
    let actions = logged_actions(&app, &owner_token, project_id).await;
    assert!(
        actions.contains(&("moderation.kick".to_string(), "error".to_string())),
        "{actions:?}"
    );
}

#[tokio::test]
#[ignore = "requires a PostgreSQL instance"]
async fn test_announce_rejects_blank_message() {
    let app = TestApp::new().await;
    app.create_licensed_user(4_010, "owner_pat").await;
    let owner_token = app.sign_in(4_010, "owner_pat").await;
    let (project_id, _) = app.create_project(&owner_token, "Dungeon Crawl").await;

    let response = app
        .request(
            "POST",
            &format!("/api/projects/{project_id}/commands"),
            Some(serde_json::json!({
                "action": "announce",
                "message": "   ",
            })),
            Some(&owner_token),
        )
        .await;

    assert_eq!(response.status, StatusCode::BAD_REQUEST);
    assert!(app.gateway.recorded_publishes().is_empty());
}

#[tokio::test]
#[ignore = "requires a PostgreSQL instance"]
async fn test_moderator_sees_only_their_own_log_entries() {
    let app = TestApp::new().await;
    app.create_licensed_user(4_011, "owner_pat").await;
    let mod_id = app.create_licensed_user(4_012, "mod_kate").await;
    let owner_token = app.sign_in(4_011, "owner_pat").await;
    let mod_token = app.sign_in(4_012, "mod_kate").await;

    let (project_id, _) = app.create_project(&owner_token, "Dungeon Crawl").await;
    app.add_member(&owner_token, project_id, 4_012, MemberRole::Moderator)
        .await;

    for (token, target) in [(&owner_token, 42), (&mod_token, 43)] {
        let response = app
            .request(
                "POST",
                &format!("/api/projects/{project_id}/commands"),
                Some(serde_json::json!({
                    "action": "kick",
                    "targetUserId": target,
                    "reason": "AFK farming",
                })),
                Some(token),
            )
            .await;
        assert_eq!(response.status, StatusCode::OK, "{:?}", response.body);
    }

    let narrowed = app
        .request(
            "GET",
            &format!("/api/projects/{project_id}/logs"),
            None,
            Some(&mod_token),
        )
        .await;
    assert_eq!(narrowed.status, StatusCode::OK);

    let items = narrowed.body["data"]["items"].as_array().unwrap();
    assert!(!items.is_empty());
    for entry in items {
        assert_eq!(entry["actorId"], mod_id.to_string());
    }

    // The owner still sees everyone's entries.
    let full = app
        .request(
            "GET",
            &format!("/api/projects/{project_id}/logs"),
            None,
            Some(&owner_token),
        )
        .await;
    let full_items = full.body["data"]["items"].as_array().unwrap();
    assert!(full_items.len() > items.len());
}
