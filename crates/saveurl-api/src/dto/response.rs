//! Response DTOs.

use chrono::{DateTime, Utc};
use serde::Serialize;

use saveurl_entity::user::UserProfile;

/// A bare confirmation.
#[derive(Debug, Clone, Serialize)]
pub struct MessageResponse {
    pub message: String,
}

impl MessageResponse {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

/// Signup response.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SignupResponse {
    pub message: String,
    /// Normalized email the code was sent to.
    pub email: String,
    pub requires_verification: bool,
}

/// Login response.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LoginResponse {
    pub message: String,
    /// Bearer token for the `Authorization` header.
    pub token: String,
    pub expires_at: DateTime<Utc>,
    pub user: UserProfile,
}

/// Current-user response.
#[derive(Debug, Clone, Serialize)]
pub struct MeResponse {
    pub user: UserProfile,
}

/// Health check response.
#[derive(Debug, Clone, Serialize)]
pub struct HealthResponse {
    pub status: String,
    pub version: String,
    /// `connected`, `unavailable` or `memory`.
    pub database: String,
}
