//! Integration tests for the stats overview, live presence, and
//! the rate limiter in front of the platform-backed reads.

use http::StatusCode;
use uuid::Uuid;

use warden_entity::member::MemberRole;

use crate::helpers::TestApp;

/// Send one heartbeat with `players` players on the given server.
/// Player ids start at `user_base` so servers report distinct players.
async fn heartbeat(
    app: &TestApp,
    api_key: &str,
    project_id: Uuid,
    server_id: &str,
    user_base: i64,
    players: i64,
) {
    let player_list: Vec<serde_json::Value> = (0..players)
        .map(|n| serde_json::json!({ "userId": user_base + n, "username": format!("player_{n}") }))
        .collect();

    let response = app
        .relay(
            "POST",
            "/relay/heartbeat",
            Some(serde_json::json!({
                "projectId": project_id,
                "serverId": server_id,
                "players": players,
                "maxPlayers": 30,
                "playerList": player_list,
            })),
            Some(api_key),
        )
        .await;
    assert_eq!(response.status, StatusCode::OK, "{:?}", response.body);
}

#[tokio::test]
#[ignore = "requires a PostgreSQL instance"]
async fn test_overview_aggregates_live_counts() {
    let app = TestApp::new().await;
    app.create_licensed_user(7_001, "owner_pat").await;
    let owner_token = app.sign_in(7_001, "owner_pat").await;
    let (project_id, api_key) = app.create_project(&owner_token, "Dungeon Crawl").await;

    heartbeat(&app, &api_key, project_id, "srv-1", 10_000, 3).await;
    heartbeat(&app, &api_key, project_id, "srv-2", 20_000, 2).await;

    let response = app
        .request(
            "GET",
            &format!("/api/projects/{project_id}/stats"),
            None,
            Some(&owner_token),
        )
        .await;

    assert_eq!(response.status, StatusCode::OK, "{:?}", response.body);
    let data = &response.body["data"];
    assert_eq!(data["liveServers"], 2);
    assert_eq!(data["livePlayers"], 5);
    // Mock platform reports empty aggregates.
    assert_eq!(data["playing"], 0);
    assert_eq!(data["visits"], 0);
    assert_eq!(data["upVotes"], 0);
}

#[tokio::test]
#[ignore = "requires a PostgreSQL instance"]
async fn test_moderator_can_view_stats() {
    let app = TestApp::new().await;
    app.create_licensed_user(7_002, "owner_pat").await;
    app.create_licensed_user(7_003, "mod_kate").await;
    let owner_token = app.sign_in(7_002, "owner_pat").await;
    let mod_token = app.sign_in(7_003, "mod_kate").await;

    let (project_id, _) = app.create_project(&owner_token, "Dungeon Crawl").await;
    app.add_member(&owner_token, project_id, 7_003, MemberRole::Moderator)
        .await;

    let response = app
        .request(
            "GET",
            &format!("/api/projects/{project_id}/stats"),
            None,
            Some(&mod_token),
        )
        .await;
    assert_eq!(response.status, StatusCode::OK, "{:?}", response.body);
}

#[tokio::test]
#[ignore = "requires a PostgreSQL instance"]
async fn test_server_list_rate_limit_trips() {
    let app = TestApp::new().await;
    app.create_licensed_user(7_004, "owner_pat").await;
    let owner_token = app.sign_in(7_004, "owner_pat").await;
    let (project_id, _) = app.create_project(&owner_token, "Dungeon Crawl").await;

    let path = format!("/api/projects/{project_id}/servers");
    let budget = app.config.rate_limit.max_requests;

    for n in 0..budget {
        let response = app.request("GET", &path, None, Some(&owner_token)).await;
        assert_eq!(
            response.status,
            StatusCode::OK,
            "request {n} failed: {:?}",
            response.body
        );
    }

    let over = app.request("GET", &path, None, Some(&owner_token)).await;
    assert_eq!(over.status, StatusCode::TOO_MANY_REQUESTS);
    assert_eq!(over.body["error"], "RATE_LIMITED");

    // The stats endpoint has its own window and is still open.
    let stats = app
        .request(
            "GET",
            &format!("/api/projects/{project_id}/stats"),
            None,
            Some(&owner_token),
        )
        .await;
    assert_eq!(stats.status, StatusCode::OK, "{:?}", stats.body);
}

#[tokio::test]
#[ignore = "requires a PostgreSQL instance"]
async fn test_history_records_a_sample_on_first_heartbeat() {
    let app = TestApp::new().await;
    app.create_licensed_user(7_005, "owner_pat").await;
    let owner_token = app.sign_in(7_005, "owner_pat").await;
    let (project_id, api_key) = app.create_project(&owner_token, "Dungeon Crawl").await;

    heartbeat(&app, &api_key, project_id, "srv-1", 10_000, 4).await;

    let response = app
        .request(
            "GET",
            &format!("/api/projects/{project_id}/history?hours=1"),
            None,
            Some(&owner_token),
        )
        .await;

    assert_eq!(response.status, StatusCode::OK, "{:?}", response.body);
    let points = response.body["data"].as_array().unwrap();
    assert_eq!(points.len(), 1);
    assert_eq!(points[0]["playerCount"], 4);
    assert_eq!(points[0]["serverCount"], 1);
    assert!(points[0]["recordedAt"].is_string());
}

#[tokio::test]
#[ignore = "requires a PostgreSQL instance"]
async fn test_live_view_is_empty_for_a_fresh_project() {
    let app = TestApp::new().await;
    app.create_licensed_user(7_006, "owner_pat").await;
    let owner_token = app.sign_in(7_006, "owner_pat").await;
    let (project_id, _) = app.create_project(&owner_token, "Dungeon Crawl").await;

    let response = app
        .request(
            "GET",
            &format!("/api/projects/{project_id}/live"),
            None,
            Some(&owner_token),
        )
        .await;

    assert_eq!(response.status, StatusCode::OK, "{:?}", response.body);
    assert!(response.body["data"]["servers"].as_array().unwrap().is_empty());
    assert!(response.body["data"]["players"].as_array().unwrap().is_empty());
}
