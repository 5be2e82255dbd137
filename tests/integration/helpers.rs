//! Shared test helpers for integration tests.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use axum::Router;
use axum::body::Body;
use axum::http::{Request, StatusCode};
use serde_json::Value;
use tower::ServiceExt;

use saveurl_api::{Stores, build_app, build_state};
use saveurl_core::config::AppConfig;
use saveurl_database::MemoryStore;
use saveurl_mail::{MailError, Mailer, OutgoingMail};

pub const PASSWORD: &str = "Str0ng!pass";

/// Mail transport that records every message and can be switched to fail.
#[derive(Default)]
pub struct TestMailer {
    sent: Mutex<Vec<OutgoingMail>>,
    failing: AtomicBool,
}

impl TestMailer {
    pub fn set_failing(&self, failing: bool) {
        self.failing.store(failing, Ordering::SeqCst);
    }

    pub fn sent(&self) -> Vec<OutgoingMail> {
        self.sent.lock().expect("lock").clone()
    }

    /// The six-digit code in the most recent message to `to`.
    pub fn last_code_for(&self, to: &str) -> String {
        let sent = self.sent();
        let mail = sent
            .iter()
            .rev()
            .find(|m| m.to == to)
            .unwrap_or_else(|| panic!("no mail sent to {to}"));
        mail.text
            .split(|c: char| !c.is_ascii_digit())
            .find(|w| w.len() == 6)
            .expect("no code in mail")
            .to_string()
    }
}

#[async_trait]
impl Mailer for TestMailer {
    async fn deliver(&self, mail: OutgoingMail) -> Result<(), MailError> {
        if self.failing.load(Ordering::SeqCst) {
            return Err(MailError::Transport("relay unavailable".into()));
        }
        self.sent.lock().expect("lock").push(mail);
        Ok(())
    }
}

/// Test application context
pub struct TestApp {
    /// The Axum router for making test requests
    pub router: Router,
    /// The store behind the router, for direct inspection
    pub store: Arc<MemoryStore>,
    /// Every message the app tried to send
    pub mailer: Arc<TestMailer>,
}

impl TestApp {
    /// Create a new test application on an empty in-memory store
    pub fn new() -> Self {
        Self::with_config(AppConfig::default())
    }

    /// Create a new test application with a custom configuration
    pub fn with_config(config: AppConfig) -> Self {
        let store = Arc::new(MemoryStore::new());
        let mailer = Arc::new(TestMailer::default());
        let state = build_state(
            config,
            Stores::from_memory(Arc::clone(&store)),
            mailer.clone(),
        );

        Self {
            router: build_app(state),
            store,
            mailer,
        }
    }

    /// Sign up, verify and sign in; returns the session token
    pub async fn register(&self, email: &str, name: &str) -> String {
        let response = self
            .request(
                "POST",
                "/api/signup",
                Some(serde_json::json!({ "email": email, "password": PASSWORD, "name": name })),
                None,
            )
            .await;
        assert_eq!(
            response.status,
            StatusCode::CREATED,
            "Signup failed: {:?}",
            response.body
        );

        let code = self.mailer.last_code_for(email);
        let response = self
            .request(
                "POST",
                "/api/verify-email",
                Some(serde_json::json!({ "email": email, "code": code })),
                None,
            )
            .await;
        assert_eq!(
            response.status,
            StatusCode::OK,
            "Verification failed: {:?}",
            response.body
        );

        self.login(email, PASSWORD).await
    }

    /// Login and return the session token
    pub async fn login(&self, email: &str, password: &str) -> String {
        let response = self
            .request(
                "POST",
                "/api/auth/login",
                Some(serde_json::json!({ "email": email, "password": password })),
                None,
            )
            .await;

        assert_eq!(
            response.status,
            StatusCode::OK,
            "Login failed: {:?}",
            response.body
        );

        response
            .body
            .get("token")
            .and_then(|v| v.as_str())
            .expect("No token in login response")
            .to_string()
    }

    /// Create a group and return its id
    pub async fn create_group(&self, token: &str, name: &str) -> i64 {
        let response = self
            .request(
                "POST",
                "/api/groups",
                Some(serde_json::json!({ "name": name })),
                Some(token),
            )
            .await;
        assert_eq!(
            response.status,
            StatusCode::CREATED,
            "Group create failed: {:?}",
            response.body
        );
        response.body["group"]["id"].as_i64().expect("group id")
    }

    /// Make an HTTP request to the test app
    pub async fn request(
        &self,
        method: &str,
        path: &str,
        body: Option<Value>,
        token: Option<&str>,
    ) -> TestResponse {
        let body_str = body
            .map(|b| serde_json::to_string(&b).expect("Failed to serialize body"))
            .unwrap_or_default();

        self.request_raw(method, path, body_str, token).await
    }

    /// Make an HTTP request with a body sent verbatim
    pub async fn request_raw(
        &self,
        method: &str,
        path: &str,
        body_str: String,
        token: Option<&str>,
    ) -> TestResponse {
        let mut req = Request::builder()
            .method(method)
            .uri(path)
            .header("Content-Type", "application/json");

        if let Some(token) = token {
            req = req.header("Authorization", format!("Bearer {}", token));
        }

        let req = req
            .body(Body::from(body_str))
            .expect("Failed to build request");

        let response = self
            .router
            .clone()
            .oneshot(req)
            .await
            .expect("Failed to send request");

        let status = response.status();
        let body_bytes = axum::body::to_bytes(response.into_body(), 1024 * 1024)
            .await
            .expect("Failed to read body");

        let body: Value = serde_json::from_slice(&body_bytes).unwrap_or(Value::Null);

        TestResponse { status, body }
    }
}

/// Response from a test request
#[derive(Debug)]
pub struct TestResponse {
    /// HTTP status code
    pub status: StatusCode,
    /// Parsed JSON body
    pub body: Value,
}
