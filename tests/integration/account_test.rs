//! Signup, verification and password reset tests

use axum::http::StatusCode;
use serde_json::json;

use saveurl_database::store::UserStore;

use crate::helpers::{PASSWORD, TestApp};

#[tokio::test]
async fn test_signup_sends_code_and_verification_enables_login() {
    let app = TestApp::new();

    let response = app
        .request(
            "POST",
            "/api/signup",
            Some(json!({ "email": "  Ann@Example.com ", "password": PASSWORD, "name": "Ann" })),
            None,
        )
        .await;
    assert_eq!(response.status, StatusCode::CREATED);
    assert_eq!(response.body["email"], "ann@example.com");
    assert_eq!(response.body["requiresVerification"], true);

    let response = app
        .request(
            "POST",
            "/api/auth/login",
            Some(json!({ "email": "ann@example.com", "password": PASSWORD })),
            None,
        )
        .await;
    assert_eq!(response.status, StatusCode::UNAUTHORIZED);

    let code = app.mailer.last_code_for("ann@example.com");
    let response = app
        .request(
            "POST",
            "/api/verify-email",
            Some(json!({ "email": "ann@example.com", "code": code })),
            None,
        )
        .await;
    assert_eq!(response.status, StatusCode::OK);

    let token = app.login("ann@example.com", PASSWORD).await;
    assert!(!token.is_empty());
}

#[tokio::test]
async fn test_signup_validation_errors() {
    let app = TestApp::new();

    let response = app
        .request(
            "POST",
            "/api/signup",
            Some(json!({ "email": "ann@example.com", "password": PASSWORD })),
            None,
        )
        .await;
    assert_eq!(response.status, StatusCode::BAD_REQUEST);
    assert_eq!(response.body["message"], "All fields are required");

    let response = app
        .request(
            "POST",
            "/api/signup",
            Some(json!({ "email": "nope", "password": PASSWORD, "name": "Ann" })),
            None,
        )
        .await;
    assert_eq!(response.status, StatusCode::BAD_REQUEST);
    assert_eq!(response.body["message"], "Invalid email format");

    let response = app
        .request(
            "POST",
            "/api/signup",
            Some(json!({ "email": "ann@example.com", "password": "weak", "name": "Ann" })),
            None,
        )
        .await;
    assert_eq!(response.status, StatusCode::BAD_REQUEST);
    assert!(app.mailer.sent().is_empty());
}

#[tokio::test]
async fn test_signup_of_verified_email_is_duplicate() {
    let app = TestApp::new();
    app.register("ann@example.com", "Ann").await;

    let response = app
        .request(
            "POST",
            "/api/signup",
            Some(json!({ "email": "ANN@example.com", "password": PASSWORD, "name": "Other" })),
            None,
        )
        .await;
    assert_eq!(response.status, StatusCode::CONFLICT);
}

#[tokio::test]
async fn test_signup_of_unverified_email_resends_code() {
    let app = TestApp::new();
    let body = json!({ "email": "ann@example.com", "password": PASSWORD, "name": "Ann" });

    let first = app.request("POST", "/api/signup", Some(body.clone()), None).await;
    assert_eq!(first.status, StatusCode::CREATED);
    let second = app.request("POST", "/api/signup", Some(body), None).await;
    assert_eq!(second.status, StatusCode::OK);
    assert_eq!(app.mailer.sent().len(), 2);
}

#[tokio::test]
async fn test_signup_mail_failure_removes_account() {
    let app = TestApp::new();
    app.mailer.set_failing(true);

    let response = app
        .request(
            "POST",
            "/api/signup",
            Some(json!({ "email": "ann@example.com", "password": PASSWORD, "name": "Ann" })),
            None,
        )
        .await;
    assert_eq!(response.status, StatusCode::INTERNAL_SERVER_ERROR);

    let user = app
        .store
        .find_by_email("ann@example.com")
        .await
        .expect("lookup");
    assert!(user.is_none());
}

#[tokio::test]
async fn test_wrong_verification_code_is_rejected() {
    let app = TestApp::new();
    app.request(
        "POST",
        "/api/signup",
        Some(json!({ "email": "ann@example.com", "password": PASSWORD, "name": "Ann" })),
        None,
    )
    .await;

    let code = app.mailer.last_code_for("ann@example.com");
    let wrong = if code == "123456" { "654321" } else { "123456" };
    let response = app
        .request(
            "POST",
            "/api/verify-email",
            Some(json!({ "email": "ann@example.com", "code": wrong })),
            None,
        )
        .await;
    assert_eq!(response.status, StatusCode::BAD_REQUEST);

    let response = app
        .request(
            "POST",
            "/api/verify-email",
            Some(json!({ "email": "ghost@example.com", "code": "123456" })),
            None,
        )
        .await;
    assert_eq!(response.status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_password_reset_flow() {
    let app = TestApp::new();
    app.register("ann@example.com", "Ann").await;

    let response = app
        .request(
            "POST",
            "/api/forgot-password",
            Some(json!({ "email": "ann@example.com" })),
            None,
        )
        .await;
    assert_eq!(response.status, StatusCode::OK);

    let code = app.mailer.last_code_for("ann@example.com");
    let new_password = "N3w!Passw0rd";
    let response = app
        .request(
            "POST",
            "/api/reset-password",
            Some(json!({ "email": "ann@example.com", "code": code, "password": new_password })),
            None,
        )
        .await;
    assert_eq!(response.status, StatusCode::OK);

    let old = app
        .request(
            "POST",
            "/api/auth/login",
            Some(json!({ "email": "ann@example.com", "password": PASSWORD })),
            None,
        )
        .await;
    assert_eq!(old.status, StatusCode::UNAUTHORIZED);
    app.login("ann@example.com", new_password).await;

    let replay = app
        .request(
            "POST",
            "/api/reset-password",
            Some(json!({ "email": "ann@example.com", "code": code, "password": "An0ther!pass" })),
            None,
        )
        .await;
    assert_eq!(replay.status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_forgot_password_unknown_email() {
    let app = TestApp::new();

    let response = app
        .request(
            "POST",
            "/api/forgot-password",
            Some(json!({ "email": "ghost@example.com" })),
            None,
        )
        .await;
    assert_eq!(response.status, StatusCode::NOT_FOUND);
}
