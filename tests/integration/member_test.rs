//! Integration tests for the project member roster.

use http::StatusCode;

use warden_entity::member::MemberRole;

use crate::helpers::{GLOBAL_ADMIN_PLATFORM_ID, TestApp};

#[tokio::test]
#[ignore = "requires a PostgreSQL instance"]
async fn test_roster_lists_owner_first_with_profiles() {
    let app = TestApp::new().await;
    app.create_licensed_user(3_001, "owner_pat").await;
    app.create_licensed_user(3_002, "mod_kate").await;
    let owner_token = app.sign_in(3_001, "owner_pat").await;

    let (project_id, _) = app.create_project(&owner_token, "Dungeon Crawl").await;
    app.add_member(&owner_token, project_id, 3_002, MemberRole::Moderator)
        .await;

    let response = app
        .request(
            "GET",
            &format!("/api/projects/{project_id}/members"),
            None,
            Some(&owner_token),
        )
        .await;

    assert_eq!(response.status, StatusCode::OK);
    let members = response.body["data"].as_array().unwrap();
    assert_eq!(members.len(), 2);
    assert_eq!(members[0]["role"], "owner");
    assert_eq!(members[0]["username"], "owner_pat");
    assert_eq!(members[1]["role"], "moderator");
    assert_eq!(members[1]["platformUserId"], 3_002);
}

#[tokio::test]
#[ignore = "requires a PostgreSQL instance"]
async fn test_add_member_requires_prior_sign_in() {
    let app = TestApp::new().await;
    app.create_licensed_user(3_003, "owner_pat").await;
    let owner_token = app.sign_in(3_003, "owner_pat").await;
    let (project_id, _) = app.create_project(&owner_token, "Dungeon Crawl").await;

    let response = app
        .request(
            "POST",
            &format!("/api/projects/{project_id}/members"),
            Some(serde_json::json!({
                "platformUserId": 999_999,
                "role": "moderator",
            })),
            Some(&owner_token),
        )
        .await;

    assert_eq!(response.status, StatusCode::NOT_FOUND);
    assert_eq!(response.body["message"], "That user has not signed in yet");
}

#[tokio::test]
#[ignore = "requires a PostgreSQL instance"]
async fn test_owner_role_cannot_be_granted() {
    let app = TestApp::new().await;
    app.create_licensed_user(3_004, "owner_pat").await;
    app.create_licensed_user(3_005, "mod_kate").await;
    let owner_token = app.sign_in(3_004, "owner_pat").await;
    let (project_id, _) = app.create_project(&owner_token, "Dungeon Crawl").await;

    let response = app
        .request(
            "POST",
            &format!("/api/projects/{project_id}/members"),
            Some(serde_json::json!({
                "platformUserId": 3_005,
                "role": "owner",
            })),
            Some(&owner_token),
        )
        .await;

    assert_eq!(response.status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
#[ignore = "requires a PostgreSQL instance"]
async fn test_moderator_cannot_manage_roster() {
    let app = TestApp::new().await;
    app.create_licensed_user(3_006, "owner_pat").await;
    app.create_licensed_user(3_007, "mod_kate").await;
    app.create_licensed_user(3_008, "friend").await;
    let owner_token = app.sign_in(3_006, "owner_pat").await;
    let mod_token = app.sign_in(3_007, "mod_kate").await;

    let (project_id, _) = app.create_project(&owner_token, "Dungeon Crawl").await;
    app.add_member(&owner_token, project_id, 3_007, MemberRole::Moderator)
        .await;

    let response = app
        .request(
            "POST",
            &format!("/api/projects/{project_id}/members"),
            Some(serde_json::json!({
                "platformUserId": 3_008,
                "role": "moderator",
            })),
            Some(&mod_token),
        )
        .await;

    assert_eq!(response.status, StatusCode::FORBIDDEN);
}

#[tokio::test]
#[ignore = "requires a PostgreSQL instance"]
async fn test_cannot_change_own_role() {
    let app = TestApp::new().await;
    let owner_id = app.create_licensed_user(3_009, "owner_pat").await;
    let owner_token = app.sign_in(3_009, "owner_pat").await;
    let (project_id, _) = app.create_project(&owner_token, "Dungeon Crawl").await;

    let response = app
        .request(
            "PUT",
            &format!("/api/projects/{project_id}/members/{owner_id}"),
            Some(serde_json::json!({ "role": "admin" })),
            Some(&owner_token),
        )
        .await;

    assert_eq!(response.status, StatusCode::FORBIDDEN);
    assert_eq!(response.body["message"], "Cannot change your own role");
}

#[tokio::test]
#[ignore = "requires a PostgreSQL instance"]
async fn test_owner_role_is_immutable_even_for_global_admin() {
    let app = TestApp::new().await;
    let owner_id = app.create_licensed_user(3_010, "owner_pat").await;
    let owner_token = app.sign_in(3_010, "owner_pat").await;
    let admin_token = app.sign_in(GLOBAL_ADMIN_PLATFORM_ID, "warden_admin").await;

    let (project_id, _) = app.create_project(&owner_token, "Dungeon Crawl").await;

    // The global admin acts with owner rights but still cannot touch
    // the owner's role or seat.
    let changed = app
        .request(
            "PUT",
            &format!("/api/projects/{project_id}/members/{owner_id}"),
            Some(serde_json::json!({ "role": "admin" })),
            Some(&admin_token),
        )
        .await;
    assert_eq!(changed.status, StatusCode::FORBIDDEN);

    let removed = app
        .request(
            "DELETE",
            &format!("/api/projects/{project_id}/members/{owner_id}"),
            None,
            Some(&admin_token),
        )
        .await;
    assert_eq!(removed.status, StatusCode::FORBIDDEN);
}

#[tokio::test]
#[ignore = "requires a PostgreSQL instance"]
async fn test_change_role_and_remove_member() {
    let app = TestApp::new().await;
    app.create_licensed_user(3_011, "owner_pat").await;
    let member_id = app.create_licensed_user(3_012, "mod_kate").await;
    let owner_token = app.sign_in(3_011, "owner_pat").await;
    let member_token = app.sign_in(3_012, "mod_kate").await;

    let (project_id, _) = app.create_project(&owner_token, "Dungeon Crawl").await;
    app.add_member(&owner_token, project_id, 3_012, MemberRole::Moderator)
        .await;

    let promoted = app
        .request(
            "PUT",
            &format!("/api/projects/{project_id}/members/{member_id}"),
            Some(serde_json::json!({ "role": "admin" })),
            Some(&owner_token),
        )
        .await;
    assert_eq!(promoted.status, StatusCode::OK, "{:?}", promoted.body);
    assert_eq!(promoted.body["data"]["role"], "admin");

    let removed = app
        .request(
            "DELETE",
            &format!("/api/projects/{project_id}/members/{member_id}"),
            None,
            Some(&owner_token),
        )
        .await;
    assert_eq!(removed.status, StatusCode::OK);

    // No seat, no access.
    let view = app
        .request(
            "GET",
            &format!("/api/projects/{project_id}"),
            None,
            Some(&member_token),
        )
        .await;
    assert_eq!(view.status, StatusCode::FORBIDDEN);
}
