//! Integration tests for project lifecycle and API key handling.

use http::StatusCode;

use warden_entity::member::MemberRole;

use crate::helpers::TestApp;

#[tokio::test]
#[ignore = "requires a PostgreSQL instance"]
async fn test_create_and_list_projects() {
    let app = TestApp::new().await;
    app.create_licensed_user(2_001, "owner_pat").await;
    let token = app.sign_in(2_001, "owner_pat").await;

    let (project_id, api_key) = app.create_project(&token, "Dungeon Crawl").await;
    assert!(api_key.starts_with("gw_live_"));

    let response = app.request("GET", "/api/projects", None, Some(&token)).await;
    assert_eq!(response.status, StatusCode::OK);

    let projects = response.body["data"].as_array().unwrap();
    assert_eq!(projects.len(), 1);
    assert_eq!(projects[0]["id"], project_id.to_string());
    assert_eq!(projects[0]["name"], "Dungeon Crawl");
    // The raw key never rides along in list responses.
    assert!(projects[0].get("apiKey").is_none());
}

#[tokio::test]
#[ignore = "requires a PostgreSQL instance"]
async fn test_project_key_visibility_follows_role() {
    let app = TestApp::new().await;
    app.create_licensed_user(2_002, "owner_pat").await;
    app.create_licensed_user(2_003, "mod_kate").await;
    let owner_token = app.sign_in(2_002, "owner_pat").await;
    let mod_token = app.sign_in(2_003, "mod_kate").await;

    let (project_id, api_key) = app.create_project(&owner_token, "Dungeon Crawl").await;
    app.add_member(&owner_token, project_id, 2_003, MemberRole::Moderator)
        .await;

    let path = format!("/api/projects/{project_id}");

    let owner_view = app.request("GET", &path, None, Some(&owner_token)).await;
    assert_eq!(owner_view.status, StatusCode::OK);
    assert_eq!(owner_view.body["data"]["apiKey"], api_key.as_str());
    assert_eq!(owner_view.body["data"]["role"], "owner");

    let mod_view = app.request("GET", &path, None, Some(&mod_token)).await;
    assert_eq!(mod_view.status, StatusCode::OK);
    assert_eq!(mod_view.body["data"]["role"], "moderator");
    let shown = mod_view.body["data"]["apiKey"].as_str().unwrap();
    assert_ne!(shown, api_key);
    assert!(shown.starts_with("gw_live_"));
}

#[tokio::test]
#[ignore = "requires a PostgreSQL instance"]
async fn test_non_member_cannot_see_project() {
    let app = TestApp::new().await;
    app.create_licensed_user(2_004, "owner_pat").await;
    app.create_licensed_user(2_005, "outsider").await;
    let owner_token = app.sign_in(2_004, "owner_pat").await;
    let outsider_token = app.sign_in(2_005, "outsider").await;

    let (project_id, _) = app.create_project(&owner_token, "Dungeon Crawl").await;

    let response = app
        .request(
            "GET",
            &format!("/api/projects/{project_id}"),
            None,
            Some(&outsider_token),
        )
        .await;

    assert_eq!(response.status, StatusCode::FORBIDDEN);
}

#[tokio::test]
#[ignore = "requires a PostgreSQL instance"]
async fn test_update_requires_manage_config() {
    let app = TestApp::new().await;
    app.create_licensed_user(2_006, "owner_pat").await;
    app.create_licensed_user(2_007, "mod_kate").await;
    let owner_token = app.sign_in(2_006, "owner_pat").await;
    let mod_token = app.sign_in(2_007, "mod_kate").await;

    let (project_id, _) = app.create_project(&owner_token, "Dungeon Crawl").await;
    app.add_member(&owner_token, project_id, 2_007, MemberRole::Moderator)
        .await;

    let path = format!("/api/projects/{project_id}");
    let update = serde_json::json!({
        "name": "Dungeon Crawl II",
        "universeId": 9_001,
        "placeId": 445_566,
    });

    let denied = app
        .request("PUT", &path, Some(update.clone()), Some(&mod_token))
        .await;
    assert_eq!(denied.status, StatusCode::FORBIDDEN);

    let updated = app
        .request("PUT", &path, Some(update), Some(&owner_token))
        .await;
    assert_eq!(updated.status, StatusCode::OK, "{:?}", updated.body);
    assert_eq!(updated.body["data"]["name"], "Dungeon Crawl II");
}

#[tokio::test]
#[ignore = "requires a PostgreSQL instance"]
async fn test_rotate_key_issues_a_fresh_key() {
    let app = TestApp::new().await;
    app.create_licensed_user(2_008, "owner_pat").await;
    let token = app.sign_in(2_008, "owner_pat").await;

    let (project_id, old_key) = app.create_project(&token, "Dungeon Crawl").await;

    let response = app
        .request(
            "POST",
            &format!("/api/projects/{project_id}/rotate-key"),
            None,
            Some(&token),
        )
        .await;

    assert_eq!(response.status, StatusCode::OK);
    let new_key = response.body["data"]["apiKey"].as_str().unwrap();
    assert_ne!(new_key, old_key);
    assert!(new_key.starts_with("gw_live_"));
}

#[tokio::test]
#[ignore = "requires a PostgreSQL instance"]
async fn test_only_owner_deletes_project() {
    let app = TestApp::new().await;
    app.create_licensed_user(2_009, "owner_pat").await;
    app.create_licensed_user(2_010, "admin_jo").await;
    let owner_token = app.sign_in(2_009, "owner_pat").await;
    let admin_token = app.sign_in(2_010, "admin_jo").await;

    let (project_id, _) = app.create_project(&owner_token, "Dungeon Crawl").await;
    app.add_member(&owner_token, project_id, 2_010, MemberRole::Admin)
        .await;

    let path = format!("/api/projects/{project_id}");

    let denied = app.request("DELETE", &path, None, Some(&admin_token)).await;
    assert_eq!(denied.status, StatusCode::FORBIDDEN);

    let deleted = app.request("DELETE", &path, None, Some(&owner_token)).await;
    assert_eq!(deleted.status, StatusCode::OK);

    let gone = app.request("GET", &path, None, Some(&owner_token)).await;
    assert_eq!(gone.status, StatusCode::NOT_FOUND);
}

#[tokio::test]
#[ignore = "requires a PostgreSQL instance"]
async fn test_create_rejects_blank_name() {
    let app = TestApp::new().await;
    app.create_licensed_user(2_011, "owner_pat").await;
    let token = app.sign_in(2_011, "owner_pat").await;

    let response = app
        .request(
            "POST",
            "/api/projects",
            Some(serde_json::json!({
                "name": "   ",
                "universeId": 9_001,
                "placeId": 445_566,
            })),
            Some(&token),
        )
        .await;

    assert_eq!(response.status, StatusCode::BAD_REQUEST);
    assert_eq!(response.body["error"], "VALIDATION_ERROR");
}
