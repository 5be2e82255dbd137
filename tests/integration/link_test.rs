//! Link CRUD, visibility and feed tests

use axum::http::StatusCode;
use serde_json::{Value, json};

use crate::helpers::TestApp;

fn link_body(url: &str) -> Value {
    json!({
        "url": url,
        "title": "Example",
        "source": "github",
        "category": "tech",
        "tags": " rust,  web ,, ",
    })
}

#[tokio::test]
async fn test_create_and_list_links() {
    let app = TestApp::new();
    let token = app.register("ann@example.com", "Ann").await;

    let response = app
        .request(
            "POST",
            "/api/links",
            Some(link_body("https://example.com/a")),
            Some(&token),
        )
        .await;
    assert_eq!(response.status, StatusCode::CREATED);
    assert_eq!(response.body["link"]["visibility"], "private");
    assert_eq!(response.body["link"]["tags"], "rust, web");

    let response = app.request("GET", "/api/links", None, Some(&token)).await;
    assert_eq!(response.status, StatusCode::OK);
    let links = response.body["links"].as_array().expect("links");
    assert_eq!(links.len(), 1);
    assert_eq!(links[0]["url"], "https://example.com/a");
}

#[tokio::test]
async fn test_invalid_url_is_rejected_and_not_persisted() {
    let app = TestApp::new();
    let token = app.register("ann@example.com", "Ann").await;

    let response = app
        .request("POST", "/api/links", Some(link_body("not a url")), Some(&token))
        .await;
    assert_eq!(response.status, StatusCode::BAD_REQUEST);

    let response = app
        .request(
            "POST",
            "/api/links",
            Some(json!({ "url": "https://example.com" })),
            Some(&token),
        )
        .await;
    assert_eq!(response.status, StatusCode::BAD_REQUEST);

    let response = app.request("GET", "/api/links", None, Some(&token)).await;
    assert!(response.body["links"].as_array().expect("links").is_empty());
}

#[tokio::test]
async fn test_update_link_fields() {
    let app = TestApp::new();
    let token = app.register("ann@example.com", "Ann").await;
    let created = app
        .request(
            "POST",
            "/api/links",
            Some(link_body("https://example.com")),
            Some(&token),
        )
        .await;
    let id = created.body["link"]["id"].as_i64().expect("id");

    let response = app
        .request(
            "PUT",
            "/api/links",
            Some(json!({ "id": id, "title": "Renamed", "visibility": "public" })),
            Some(&token),
        )
        .await;
    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(response.body["link"]["title"], "Renamed");
    assert_eq!(response.body["link"]["visibility"], "public");
    assert_eq!(response.body["link"]["url"], "https://example.com");

    let response = app
        .request(
            "PUT",
            "/api/links",
            Some(json!({ "id": id, "visibility": "everyone" })),
            Some(&token),
        )
        .await;
    assert_eq!(response.status, StatusCode::BAD_REQUEST);

    let response = app
        .request("PUT", "/api/links", Some(json!({ "title": "x" })), Some(&token))
        .await;
    assert_eq!(response.status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_other_user_cannot_touch_link() {
    let app = TestApp::new();
    let ann = app.register("ann@example.com", "Ann").await;
    let bob = app.register("bob@example.com", "Bob").await;
    let created = app
        .request(
            "POST",
            "/api/links",
            Some(link_body("https://example.com")),
            Some(&ann),
        )
        .await;
    let id = created.body["link"]["id"].as_i64().expect("id");

    let response = app
        .request("DELETE", &format!("/api/links?id={id}"), None, Some(&bob))
        .await;
    assert_eq!(response.status, StatusCode::NOT_FOUND);

    let response = app
        .request(
            "PUT",
            "/api/links",
            Some(json!({ "id": id, "title": "Mine" })),
            Some(&bob),
        )
        .await;
    assert_eq!(response.status, StatusCode::NOT_FOUND);

    let response = app.request("GET", "/api/links", None, Some(&ann)).await;
    assert_eq!(response.body["links"].as_array().expect("links").len(), 1);

    let response = app
        .request("DELETE", &format!("/api/links?id={id}"), None, Some(&ann))
        .await;
    assert_eq!(response.status, StatusCode::OK);
}

#[tokio::test]
async fn test_public_feed_shows_only_public_links() {
    let app = TestApp::new();
    let token = app.register("ann@example.com", "Ann").await;

    let mut public = link_body("https://example.com/public");
    public["visibility"] = json!("public");
    app.request("POST", "/api/links", Some(public), Some(&token))
        .await;
    app.request(
        "POST",
        "/api/links",
        Some(link_body("https://example.com/private")),
        Some(&token),
    )
    .await;

    let response = app.request("GET", "/api/public-links", None, None).await;
    assert_eq!(response.status, StatusCode::OK);
    let links = response.body["links"].as_array().expect("links");
    assert_eq!(links.len(), 1);
    assert_eq!(links[0]["url"], "https://example.com/public");
    assert_eq!(links[0]["userName"], "Ann");
}

#[tokio::test]
async fn test_group_visibility_requires_readable_group() {
    let app = TestApp::new();
    let ann = app.register("ann@example.com", "Ann").await;
    let eve = app.register("eve@example.com", "Eve").await;
    let group_id = app.create_group(&ann, "Team").await;

    let mut body = link_body("https://example.com");
    body["visibility"] = json!("group");
    let response = app
        .request("POST", "/api/links", Some(body.clone()), Some(&ann))
        .await;
    assert_eq!(response.status, StatusCode::BAD_REQUEST);

    body["groupId"] = json!(group_id);
    let response = app
        .request("POST", "/api/links", Some(body.clone()), Some(&eve))
        .await;
    assert_eq!(response.status, StatusCode::FORBIDDEN);

    let response = app
        .request("POST", "/api/links", Some(body), Some(&ann))
        .await;
    assert_eq!(response.status, StatusCode::CREATED);

    let response = app
        .request(
            "GET",
            &format!("/api/groups/links?groupId={group_id}"),
            None,
            Some(&ann),
        )
        .await;
    assert_eq!(response.body["links"].as_array().expect("links").len(), 1);

    let response = app
        .request(
            "GET",
            &format!("/api/groups/links?groupId={group_id}"),
            None,
            Some(&eve),
        )
        .await;
    assert_eq!(response.status, StatusCode::FORBIDDEN);
}

#[tokio::test]
async fn test_mistyped_body_uses_error_contract() {
    let app = TestApp::new();
    let token = app.register("ann@example.com", "Ann").await;

    let mut body = link_body("https://example.com");
    body["tags"] = json!(["a", "b"]);
    let response = app
        .request("POST", "/api/links", Some(body), Some(&token))
        .await;
    assert_eq!(response.status, StatusCode::BAD_REQUEST);
    assert_eq!(response.body["error"], "VALIDATION_ERROR");
    assert!(response.body["message"].is_string());

    let response = app
        .request_raw("POST", "/api/links", "{\"url\": ".to_string(), Some(&token))
        .await;
    assert_eq!(response.status, StatusCode::BAD_REQUEST);
    assert_eq!(response.body["error"], "VALIDATION_ERROR");

    let response = app.request("GET", "/api/links", None, Some(&token)).await;
    assert!(response.body["links"].as_array().expect("links").is_empty());
}
