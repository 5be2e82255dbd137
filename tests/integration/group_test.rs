//! Group CRUD tests

use axum::http::StatusCode;
use serde_json::json;

use crate::helpers::TestApp;

#[tokio::test]
async fn test_create_list_and_counts() {
    let app = TestApp::new();
    let token = app.register("ann@example.com", "Ann").await;
    app.create_group(&token, "Team").await;

    let response = app.request("GET", "/api/groups", None, Some(&token)).await;
    assert_eq!(response.status, StatusCode::OK);
    let groups = response.body["groups"].as_array().expect("groups");
    assert_eq!(groups.len(), 1);
    assert_eq!(groups[0]["name"], "Team");
    assert_eq!(groups[0]["memberCount"], 1);
    assert_eq!(groups[0]["linkCount"], 0);
    assert_eq!(groups[0]["isOwner"], true);
}

#[tokio::test]
async fn test_duplicate_group_name_per_owner() {
    let app = TestApp::new();
    let ann = app.register("ann@example.com", "Ann").await;
    let bob = app.register("bob@example.com", "Bob").await;
    app.create_group(&ann, "Team").await;

    let response = app
        .request(
            "POST",
            "/api/groups",
            Some(json!({ "name": "Team" })),
            Some(&ann),
        )
        .await;
    assert_eq!(response.status, StatusCode::BAD_REQUEST);

    app.create_group(&bob, "Team").await;
}

#[tokio::test]
async fn test_update_group() {
    let app = TestApp::new();
    let token = app.register("ann@example.com", "Ann").await;
    let id = app.create_group(&token, "Team").await;

    let response = app
        .request(
            "PUT",
            "/api/groups",
            Some(json!({ "id": id, "name": "Crew", "description": "weekly" })),
            Some(&token),
        )
        .await;
    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(response.body["group"]["name"], "Crew");
    assert_eq!(response.body["group"]["description"], "weekly");

    let response = app
        .request(
            "PUT",
            "/api/groups",
            Some(json!({ "id": id, "description": null })),
            Some(&token),
        )
        .await;
    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(response.body["group"]["name"], "Crew");
    assert!(response.body["group"]["description"].is_null());

    let response = app
        .request(
            "PUT",
            "/api/groups",
            Some(json!({ "id": id, "name": "   " })),
            Some(&token),
        )
        .await;
    assert_eq!(response.status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_delete_group_cascades_links_and_members() {
    let app = TestApp::new();
    let ann = app.register("ann@example.com", "Ann").await;
    let bob = app.register("bob@example.com", "Bob").await;
    let id = app.create_group(&ann, "Team").await;

    app.request(
        "POST",
        "/api/groups/members",
        Some(json!({ "groupId": id, "email": "bob@example.com" })),
        Some(&ann),
    )
    .await;
    let response = app
        .request(
            "POST",
            "/api/links",
            Some(json!({
                "url": "https://example.com",
                "source": "github",
                "category": "tech",
                "visibility": "group",
                "groupId": id,
            })),
            Some(&ann),
        )
        .await;
    assert_eq!(response.status, StatusCode::CREATED);

    let response = app
        .request("DELETE", &format!("/api/groups?id={id}"), None, Some(&bob))
        .await;
    assert_eq!(response.status, StatusCode::FORBIDDEN);

    let response = app
        .request("DELETE", &format!("/api/groups?id={id}"), None, Some(&ann))
        .await;
    assert_eq!(response.status, StatusCode::OK);

    let response = app.request("GET", "/api/groups", None, Some(&bob)).await;
    assert!(response.body["groups"].as_array().expect("groups").is_empty());
    let response = app.request("GET", "/api/links", None, Some(&ann)).await;
    assert!(response.body["links"].as_array().expect("links").is_empty());
}
