//! User entity model.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

use saveurl_core::types::UserId;

/// A registered user.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
#[serde(rename_all = "camelCase")]
pub struct User {
    /// Unique user identifier.
    pub id: UserId,
    /// Display name.
    pub name: String,
    /// Email address, stored trimmed and lower-cased.
    pub email: String,
    /// Argon2 password hash.
    #[serde(skip_serializing)]
    pub password_hash: String,
    /// Whether the email address has been confirmed.
    pub is_verified: bool,
    #[serde(skip_serializing)]
    pub verification_code: Option<String>,
    #[serde(skip_serializing)]
    pub verification_code_expiry: Option<DateTime<Utc>>,
    #[serde(skip_serializing)]
    pub reset_password_code: Option<String>,
    #[serde(skip_serializing)]
    pub reset_password_code_expiry: Option<DateTime<Utc>>,
    /// When the user was created.
    pub created_at: DateTime<Utc>,
    /// When the user was last updated.
    pub updated_at: DateTime<Utc>,
}

impl User {
    /// Check a presented email verification code.
    pub fn verification_code_matches(&self, code: &str, now: DateTime<Utc>) -> bool {
        code_matches(
            self.verification_code.as_deref(),
            self.verification_code_expiry,
            code,
            now,
        )
    }

    /// Check a presented password reset code.
    pub fn reset_code_matches(&self, code: &str, now: DateTime<Utc>) -> bool {
        code_matches(
            self.reset_password_code.as_deref(),
            self.reset_password_code_expiry,
            code,
            now,
        )
    }

    /// The public identity of this user.
    pub fn profile(&self) -> UserProfile {
        UserProfile {
            id: self.id,
            email: self.email.clone(),
            name: self.name.clone(),
        }
    }
}

fn code_matches(
    stored: Option<&str>,
    expiry: Option<DateTime<Utc>>,
    presented: &str,
    now: DateTime<Utc>,
) -> bool {
    match (stored, expiry) {
        (Some(stored), Some(expiry)) => stored == presented.trim() && now < expiry,
        _ => false,
    }
}

/// Public identity of a user: what other users may see.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserProfile {
    pub id: UserId,
    pub email: String,
    pub name: String,
}

/// Data required to create a new, unverified user.
#[derive(Debug, Clone)]
pub struct CreateUser {
    pub name: String,
    pub email: String,
    /// Pre-hashed password.
    pub password_hash: String,
    pub verification_code: String,
    pub verification_code_expiry: DateTime<Utc>,
}

#[cfg(test)]
mod tests {
    use chrono::Duration;

    use super::*;

    fn user_with_code(code: &str, expiry: DateTime<Utc>) -> User {
        let now = Utc::now();
        User {
            id: UserId(1),
            name: "Ann".into(),
            email: "a@x.com".into(),
            password_hash: "hash".into(),
            is_verified: false,
            verification_code: Some(code.into()),
            verification_code_expiry: Some(expiry),
            reset_password_code: None,
            reset_password_code_expiry: None,
            created_at: now,
            updated_at: now,
        }
    }

    #[test]
    fn test_code_accepted_before_expiry() {
        let now = Utc::now();
        let user = user_with_code("123456", now + Duration::minutes(15));
        assert!(user.verification_code_matches("123456", now));
        assert!(user.verification_code_matches(" 123456 ", now));
        assert!(!user.verification_code_matches("654321", now));
    }

    #[test]
    fn test_code_rejected_after_expiry() {
        let now = Utc::now();
        let user = user_with_code("123456", now - Duration::seconds(1));
        assert!(!user.verification_code_matches("123456", now));
    }

    #[test]
    fn test_missing_reset_code_never_matches() {
        let now = Utc::now();
        let user = user_with_code("123456", now + Duration::minutes(15));
        assert!(!user.reset_code_matches("", now));
        assert!(!user.reset_code_matches("123456", now));
    }

    #[test]
    fn test_secrets_not_serialized() {
        let user = user_with_code("123456", Utc::now());
        let json = serde_json::to_value(&user).expect("serialize");
        assert!(json.get("passwordHash").is_none());
        assert!(json.get("verificationCode").is_none());
        assert_eq!(json["isVerified"], false);
    }
}
