//! Integration tests for the ban lifecycle and the relay ban check.

use http::StatusCode;
use uuid::Uuid;

use warden_entity::member::MemberRole;

use crate::helpers::TestApp;

/// Issue a ban through the moderation endpoint; returns the ban id.
async fn issue_ban(
    app: &TestApp,
    token: &str,
    project_id: Uuid,
    target_user_id: i64,
    duration: &str,
) -> Uuid {
    let response = app
        .request(
            "POST",
            &format!("/api/projects/{project_id}/commands"),
            Some(serde_json::json!({
                "action": "ban",
                "targetUserId": target_user_id,
                "targetName": "Grifter",
                "reason": "Exploiting",
                "duration": duration,
            })),
            Some(token),
        )
        .await;
    assert_eq!(response.status, StatusCode::OK, "{:?}", response.body);

    response.body["data"]["ban"]["id"]
        .as_str()
        .expect("No ban id in response")
        .parse()
        .expect("Ban id is not a UUID")
}

#[tokio::test]
#[ignore = "requires a PostgreSQL instance"]
async fn test_reissuing_a_ban_deactivates_the_previous_one() {
    let app = TestApp::new().await;
    app.create_licensed_user(5_001, "owner_pat").await;
    let owner_token = app.sign_in(5_001, "owner_pat").await;
    let (project_id, _) = app.create_project(&owner_token, "Dungeon Crawl").await;

    issue_ban(&app, &owner_token, project_id, 42, "7d").await;
    let second = issue_ban(&app, &owner_token, project_id, 42, "permanent").await;

    let active = app
        .request(
            "GET",
            &format!("/api/projects/{project_id}/bans?activeOnly=true"),
            None,
            Some(&owner_token),
        )
        .await;
    assert_eq!(active.status, StatusCode::OK);
    let items = active.body["data"]["items"].as_array().unwrap();
    assert_eq!(items.len(), 1);
    assert_eq!(items[0]["id"], second.to_string());
    assert_eq!(items[0]["duration"], "permanent");

    let all = app
        .request(
            "GET",
            &format!("/api/projects/{project_id}/bans"),
            None,
            Some(&owner_token),
        )
        .await;
    assert_eq!(all.body["data"]["items"].as_array().unwrap().len(), 2);
}

#[tokio::test]
#[ignore = "requires a PostgreSQL instance"]
async fn test_lifting_a_ban_unbans_on_the_platform() {
    let app = TestApp::new().await;
    app.create_licensed_user(5_002, "owner_pat").await;
    let owner_token = app.sign_in(5_002, "owner_pat").await;
    let (project_id, _) = app.create_project(&owner_token, "Dungeon Crawl").await;

    let ban_id = issue_ban(&app, &owner_token, project_id, 42, "7d").await;

    let response = app
        .request(
            "DELETE",
            &format!("/api/projects/{project_id}/bans/{ban_id}"),
            None,
            Some(&owner_token),
        )
        .await;
    assert_eq!(response.status, StatusCode::OK, "{:?}", response.body);
    assert_eq!(response.body["data"]["active"], false);

    let unbans = app.gateway.recorded_unbans();
    assert_eq!(unbans, vec![(9_001, 42)]);

    let active = app
        .request(
            "GET",
            &format!("/api/projects/{project_id}/bans?activeOnly=true"),
            None,
            Some(&owner_token),
        )
        .await;
    assert!(active.body["data"]["items"].as_array().unwrap().is_empty());

    let logs = app
        .request(
            "GET",
            &format!("/api/projects/{project_id}/logs"),
            None,
            Some(&owner_token),
        )
        .await;
    let actions: Vec<&str> = logs.body["data"]["items"]
        .as_array()
        .unwrap()
        .iter()
        .map(|entry| entry["action"].as_str().unwrap())
        .collect();
    assert!(actions.contains(&"ban.lift"), "{actions:?}");
}

#[tokio::test]
#[ignore = "requires a PostgreSQL instance"]
async fn test_moderator_cannot_lift_or_list_bans() {
    let app = TestApp::new().await;
    app.create_licensed_user(5_003, "owner_pat").await;
    app.create_licensed_user(5_004, "mod_kate").await;
    let owner_token = app.sign_in(5_003, "owner_pat").await;
    let mod_token = app.sign_in(5_004, "mod_kate").await;

    let (project_id, _) = app.create_project(&owner_token, "Dungeon Crawl").await;
    app.add_member(&owner_token, project_id, 5_004, MemberRole::Moderator)
        .await;

    let ban_id = issue_ban(&app, &owner_token, project_id, 42, "7d").await;

    let lift = app
        .request(
            "DELETE",
            &format!("/api/projects/{project_id}/bans/{ban_id}"),
            None,
            Some(&mod_token),
        )
        .await;
    assert_eq!(lift.status, StatusCode::FORBIDDEN);

    let list = app
        .request(
            "GET",
            &format!("/api/projects/{project_id}/bans"),
            None,
            Some(&mod_token),
        )
        .await;
    assert_eq!(list.status, StatusCode::FORBIDDEN);
}

#[tokio::test]
#[ignore = "requires a PostgreSQL instance"]
async fn test_lifting_an_unknown_ban_is_not_found() {
    let app = TestApp::new().await;
    app.create_licensed_user(5_005, "owner_pat").await;
    let owner_token = app.sign_in(5_005, "owner_pat").await;
    let (project_id, _) = app.create_project(&owner_token, "Dungeon Crawl").await;

    let response = app
        .request(
            "DELETE",
            &format!("/api/projects/{project_id}/bans/{}", Uuid::new_v4()),
            None,
            Some(&owner_token),
        )
        .await;

    assert_eq!(response.status, StatusCode::NOT_FOUND);
    assert_eq!(response.body["error"], "NOT_FOUND");
    assert_eq!(response.body["message"], "No active ban with that id");
}

#[tokio::test]
#[ignore = "requires a PostgreSQL instance"]
async fn test_check_ban_reports_an_active_ban() {
    let app = TestApp::new().await;
    app.create_licensed_user(5_006, "owner_pat").await;
    let owner_token = app.sign_in(5_006, "owner_pat").await;
    let (project_id, api_key) = app.create_project(&owner_token, "Dungeon Crawl").await;

    issue_ban(&app, &owner_token, project_id, 42, "7d").await;

    let response = app
        .relay(
            "GET",
            &format!("/relay/check-ban?projectId={project_id}&userId=42"),
            None,
            Some(&api_key),
        )
        .await;

    assert_eq!(response.status, StatusCode::OK, "{:?}", response.body);
    assert_eq!(response.body["banned"], true);
    assert_eq!(response.body["reason"], "Exploiting");
    assert_eq!(response.body["duration"], "7d");
    assert!(response.body["expiresAt"].is_string());
    assert!(response.body.get("wasUnbanned").is_none());
}

#[tokio::test]
#[ignore = "requires a PostgreSQL instance"]
async fn test_check_ban_distinguishes_lifted_from_never_banned() {
    let app = TestApp::new().await;
    app.create_licensed_user(5_007, "owner_pat").await;
    let owner_token = app.sign_in(5_007, "owner_pat").await;
    let (project_id, api_key) = app.create_project(&owner_token, "Dungeon Crawl").await;

    let ban_id = issue_ban(&app, &owner_token, project_id, 42, "7d").await;
    let lift = app
        .request(
            "DELETE",
            &format!("/api/projects/{project_id}/bans/{ban_id}"),
            None,
            Some(&owner_token),
        )
        .await;
    assert_eq!(lift.status, StatusCode::OK);

    let lifted = app
        .relay(
            "GET",
            &format!("/relay/check-ban?projectId={project_id}&userId=42"),
            None,
            Some(&api_key),
        )
        .await;
    assert_eq!(lifted.status, StatusCode::OK);
    assert_eq!(lifted.body["banned"], false);
    assert_eq!(lifted.body["wasUnbanned"], true);
    assert!(lifted.body.get("reason").is_none());

    let clean = app
        .relay(
            "GET",
            &format!("/relay/check-ban?projectId={project_id}&userId=777"),
            None,
            Some(&api_key),
        )
        .await;
    assert_eq!(clean.body["banned"], false);
    assert_eq!(clean.body["wasUnbanned"], false);
}

#[tokio::test]
#[ignore = "requires a PostgreSQL instance"]
async fn test_check_ban_treats_expired_ban_as_lifted() {
    let app = TestApp::new().await;
    let owner_id = app.create_licensed_user(5_008, "owner_pat").await;
    let owner_token = app.sign_in(5_008, "owner_pat").await;
    let (project_id, api_key) = app.create_project(&owner_token, "Dungeon Crawl").await;

    // A ban whose expiry has already passed but whose row was never
    // touched since; it must read as not banned.
    sqlx::query(
        r#"INSERT INTO bans
               (project_id, target_user_id, target_name, issuer_id, issuer_name,
                reason, duration, duration_seconds, expires_at, active)
           VALUES ($1, $2, 'Grifter', $3, 'owner_pat',
                   'Exploiting', '1h'::ban_duration, 3600, NOW() - INTERVAL '5 minutes', TRUE)"#,
    )
    .bind(project_id)
    .bind(42_i64)
    .bind(owner_id)
    .execute(&app.db)
    .await
    .expect("Failed to insert expired ban");

    let response = app
        .relay(
            "GET",
            &format!("/relay/check-ban?projectId={project_id}&userId=42"),
            None,
            Some(&api_key),
        )
        .await;

    assert_eq!(response.status, StatusCode::OK, "{:?}", response.body);
    assert_eq!(response.body["banned"], false);
    assert_eq!(response.body["wasUnbanned"], true);
}
