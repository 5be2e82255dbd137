//! Group membership tests

use axum::http::StatusCode;
use serde_json::json;

use crate::helpers::TestApp;

async fn member_count(app: &TestApp, token: &str) -> i64 {
    let response = app.request("GET", "/api/groups", None, Some(token)).await;
    response.body["groups"][0]["memberCount"]
        .as_i64()
        .expect("memberCount")
}

#[tokio::test]
async fn test_add_and_remove_member_changes_count() {
    let app = TestApp::new();
    let ann = app.register("ann@example.com", "Ann").await;
    app.register("bob@example.com", "Bob").await;
    let id = app.create_group(&ann, "Team").await;
    assert_eq!(member_count(&app, &ann).await, 1);

    let response = app
        .request(
            "POST",
            "/api/groups/members",
            Some(json!({ "groupId": id, "email": "Bob@Example.com" })),
            Some(&ann),
        )
        .await;
    assert_eq!(response.status, StatusCode::CREATED);
    assert_eq!(response.body["member"]["email"], "bob@example.com");
    let member_id = response.body["member"]["id"].as_i64().expect("id");
    assert_eq!(member_count(&app, &ann).await, 2);

    let response = app
        .request(
            "GET",
            &format!("/api/groups/members?groupId={id}"),
            None,
            Some(&ann),
        )
        .await;
    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(response.body["groupName"], "Team");
    assert_eq!(response.body["owner"]["email"], "ann@example.com");
    assert_eq!(response.body["members"].as_array().expect("members").len(), 1);

    let response = app
        .request(
            "DELETE",
            &format!("/api/groups/members?memberId={member_id}&groupId={id}"),
            None,
            Some(&ann),
        )
        .await;
    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(member_count(&app, &ann).await, 1);
}

#[tokio::test]
async fn test_duplicate_member_is_rejected() {
    let app = TestApp::new();
    let ann = app.register("ann@example.com", "Ann").await;
    app.register("bob@example.com", "Bob").await;
    let id = app.create_group(&ann, "Team").await;
    let body = json!({ "groupId": id, "email": "bob@example.com" });

    let first = app
        .request("POST", "/api/groups/members", Some(body.clone()), Some(&ann))
        .await;
    assert_eq!(first.status, StatusCode::CREATED);
    let second = app
        .request("POST", "/api/groups/members", Some(body), Some(&ann))
        .await;
    assert_eq!(second.status, StatusCode::BAD_REQUEST);
    assert_eq!(member_count(&app, &ann).await, 2);
}

#[tokio::test]
async fn test_add_member_errors() {
    let app = TestApp::new();
    let ann = app.register("ann@example.com", "Ann").await;
    let id = app.create_group(&ann, "Team").await;

    let response = app
        .request(
            "POST",
            "/api/groups/members",
            Some(json!({ "groupId": id, "email": "ghost@example.com" })),
            Some(&ann),
        )
        .await;
    assert_eq!(response.status, StatusCode::NOT_FOUND);

    let response = app
        .request(
            "POST",
            "/api/groups/members",
            Some(json!({ "groupId": id, "email": "ann@example.com" })),
            Some(&ann),
        )
        .await;
    assert_eq!(response.status, StatusCode::BAD_REQUEST);

    let response = app
        .request(
            "POST",
            "/api/groups/members",
            Some(json!({ "email": "ann@example.com" })),
            Some(&ann),
        )
        .await;
    assert_eq!(response.status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_member_can_read_but_not_manage() {
    let app = TestApp::new();
    let ann = app.register("ann@example.com", "Ann").await;
    let bob = app.register("bob@example.com", "Bob").await;
    app.register("cat@example.com", "Cat").await;
    let id = app.create_group(&ann, "Team").await;
    app.request(
        "POST",
        "/api/groups/members",
        Some(json!({ "groupId": id, "email": "bob@example.com" })),
        Some(&ann),
    )
    .await;

    let response = app.request("GET", "/api/groups", None, Some(&bob)).await;
    let groups = response.body["groups"].as_array().expect("groups");
    assert_eq!(groups.len(), 1);
    assert_eq!(groups[0]["isOwner"], false);

    let response = app
        .request(
            "GET",
            &format!("/api/groups/members?groupId={id}"),
            None,
            Some(&bob),
        )
        .await;
    assert_eq!(response.status, StatusCode::OK);

    let response = app
        .request(
            "POST",
            "/api/groups/members",
            Some(json!({ "groupId": id, "email": "cat@example.com" })),
            Some(&bob),
        )
        .await;
    assert_eq!(response.status, StatusCode::FORBIDDEN);

    let response = app
        .request(
            "PUT",
            "/api/groups",
            Some(json!({ "id": id, "name": "Bob's" })),
            Some(&bob),
        )
        .await;
    assert_eq!(response.status, StatusCode::FORBIDDEN);
}

#[tokio::test]
async fn test_string_group_id_is_rejected_as_json_error() {
    let app = TestApp::new();
    let ann = app.register("ann@example.com", "Ann").await;
    app.register("bob@example.com", "Bob").await;
    let id = app.create_group(&ann, "Team").await;

    let response = app
        .request(
            "POST",
            "/api/groups/members",
            Some(json!({ "groupId": id.to_string(), "email": "bob@example.com" })),
            Some(&ann),
        )
        .await;
    assert_eq!(response.status, StatusCode::BAD_REQUEST);
    assert_eq!(response.body["error"], "VALIDATION_ERROR");
    assert_eq!(member_count(&app, &ann).await, 1);
}
