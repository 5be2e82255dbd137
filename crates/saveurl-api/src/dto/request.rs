//! Request DTOs with validation.
//!
//! Fields default when absent so that a missing field is reported with
//! the same message as an empty one.

use serde::{Deserialize, Deserializer};
use validator::Validate;

use saveurl_core::types::{GroupId, LinkId};

/// Distinguishes an absent field (`None`) from an explicit `null`
/// (`Some(None)`).
fn double_option<'de, T, D>(deserializer: D) -> Result<Option<Option<T>>, D::Error>
where
    T: Deserialize<'de>,
    D: Deserializer<'de>,
{
    Option::<T>::deserialize(deserializer).map(Some)
}

/// Signup request body.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct SignupRequest {
    pub email: String,
    pub password: String,
    pub name: String,
}

/// Email verification request body.
#[derive(Debug, Clone, Default, Deserialize, Validate)]
#[serde(default)]
pub struct VerifyEmailRequest {
    #[validate(length(min = 1, message = "Email and verification code are required"))]
    pub email: String,
    #[validate(length(min = 1, message = "Email and verification code are required"))]
    pub code: String,
}

/// Forgot-password request body.
#[derive(Debug, Clone, Default, Deserialize, Validate)]
#[serde(default)]
pub struct ForgotPasswordRequest {
    #[validate(length(min = 1, message = "Email is required"))]
    pub email: String,
}

/// Reset-password request body.
#[derive(Debug, Clone, Default, Deserialize, Validate)]
#[serde(default)]
pub struct ResetPasswordRequest {
    #[validate(length(min = 1, message = "Email, reset code, and new password are required"))]
    pub email: String,
    #[validate(length(min = 1, message = "Email, reset code, and new password are required"))]
    pub code: String,
    #[validate(length(min = 1, message = "Email, reset code, and new password are required"))]
    pub password: String,
}

/// Login request body.
#[derive(Debug, Clone, Default, Deserialize, Validate)]
#[serde(default)]
pub struct LoginRequest {
    #[validate(length(min = 1, message = "Email and password are required"))]
    pub email: String,
    #[validate(length(min = 1, message = "Email and password are required"))]
    pub password: String,
}

/// Create link request body.
#[derive(Debug, Clone, Default, Deserialize, Validate)]
#[serde(default, rename_all = "camelCase")]
pub struct CreateLinkRequest {
    pub url: String,
    #[validate(length(max = 255, message = "Title must be 255 characters or less"))]
    pub title: Option<String>,
    pub source: String,
    pub category: String,
    pub tags: Option<String>,
    pub description: Option<String>,
    /// `private`, `public` or `group`.
    pub visibility: Option<String>,
    pub group_id: Option<GroupId>,
}

/// Update link request body.
#[derive(Debug, Clone, Default, Deserialize, Validate)]
#[serde(default, rename_all = "camelCase")]
pub struct UpdateLinkRequest {
    pub id: Option<LinkId>,
    pub url: Option<String>,
    #[validate(length(max = 255, message = "Title must be 255 characters or less"))]
    pub title: Option<String>,
    pub source: Option<String>,
    pub category: Option<String>,
    pub tags: Option<String>,
    pub description: Option<String>,
    pub visibility: Option<String>,
    #[serde(deserialize_with = "double_option")]
    pub group_id: Option<Option<GroupId>>,
}

/// Create group request body.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct CreateGroupRequest {
    pub name: String,
    pub description: Option<String>,
}

/// Update group request body.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct UpdateGroupRequest {
    pub id: Option<GroupId>,
    pub name: Option<String>,
    #[serde(deserialize_with = "double_option")]
    pub description: Option<Option<String>>,
}

/// Add member request body.
#[derive(Debug, Clone, Default, Deserialize, Validate)]
#[serde(default, rename_all = "camelCase")]
pub struct AddMemberRequest {
    pub group_id: Option<GroupId>,
    #[validate(length(min = 1, message = "Group ID and email are required"))]
    pub email: String,
}

/// Add category or source request body.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct VocabularyRequest {
    pub name: String,
}
