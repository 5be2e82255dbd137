//! Category and source vocabulary tests

use axum::http::StatusCode;
use serde_json::json;

use crate::helpers::TestApp;

#[tokio::test]
async fn test_defaults_are_listed() {
    let app = TestApp::new();
    let token = app.register("ann@example.com", "Ann").await;

    let response = app
        .request("GET", "/api/categories", None, Some(&token))
        .await;
    assert_eq!(response.status, StatusCode::OK);
    let categories = response.body["categories"].as_array().expect("categories");
    assert!(categories.iter().any(|c| c == "tech"));

    let response = app.request("GET", "/api/sources", None, Some(&token)).await;
    let sources = response.body["sources"].as_array().expect("sources");
    assert!(sources.iter().any(|s| s == "github"));
}

#[tokio::test]
async fn test_add_is_idempotent_and_case_insensitive() {
    let app = TestApp::new();
    let token = app.register("ann@example.com", "Ann").await;

    let response = app
        .request(
            "POST",
            "/api/categories",
            Some(json!({ "name": "  Recipes " })),
            Some(&token),
        )
        .await;
    assert_eq!(response.status, StatusCode::CREATED);
    assert_eq!(response.body["category"], "recipes");

    let response = app
        .request(
            "POST",
            "/api/categories",
            Some(json!({ "name": "RECIPES" })),
            Some(&token),
        )
        .await;
    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(response.body["message"], "Category already exists");

    let response = app
        .request(
            "POST",
            "/api/sources",
            Some(json!({ "name": "GitHub" })),
            Some(&token),
        )
        .await;
    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(response.body["message"], "Source already exists in defaults");

    let response = app
        .request("GET", "/api/categories", None, Some(&token))
        .await;
    let categories = response.body["categories"].as_array().expect("categories");
    assert_eq!(categories.iter().filter(|c| *c == "recipes").count(), 1);
}

#[tokio::test]
async fn test_custom_entries_are_per_user() {
    let app = TestApp::new();
    let ann = app.register("ann@example.com", "Ann").await;
    let bob = app.register("bob@example.com", "Bob").await;

    app.request(
        "POST",
        "/api/sources",
        Some(json!({ "name": "mastodon" })),
        Some(&ann),
    )
    .await;

    let response = app.request("GET", "/api/sources", None, Some(&bob)).await;
    let sources = response.body["sources"].as_array().expect("sources");
    assert!(!sources.iter().any(|s| s == "mastodon"));

    let response = app
        .request("POST", "/api/sources", Some(json!({ "name": "  " })), Some(&bob))
        .await;
    assert_eq!(response.status, StatusCode::BAD_REQUEST);
}
