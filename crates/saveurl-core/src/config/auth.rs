//! Authentication configuration.

use serde::{Deserialize, Serialize};

/// Authentication and credential configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AuthConfig {
    /// Secret key for session token signing (HMAC-SHA256).
    #[serde(default = "default_jwt_secret")]
    pub jwt_secret: String,
    /// Session token TTL in hours.
    #[serde(default = "default_session_ttl")]
    pub session_ttl_hours: u64,
    /// Minimum password length.
    #[serde(default = "default_password_min")]
    pub password_min_length: usize,
    /// Minimum zxcvbn score (0-4). `0` disables the strength estimate and
    /// leaves only the character-class rules.
    #[serde(default)]
    pub password_min_strength: u8,
    /// Lifetime of email verification and password reset codes.
    #[serde(default = "default_code_ttl")]
    pub verification_code_ttl_minutes: i64,
}

impl Default for AuthConfig {
    fn default() -> Self {
        Self {
            jwt_secret: default_jwt_secret(),
            session_ttl_hours: default_session_ttl(),
            password_min_length: default_password_min(),
            password_min_strength: 0,
            verification_code_ttl_minutes: default_code_ttl(),
        }
    }
}

fn default_jwt_secret() -> String {
    "CHANGE_ME_IN_PRODUCTION".to_string()
}

fn default_session_ttl() -> u64 {
    24 * 7
}

fn default_password_min() -> usize {
    8
}

fn default_code_ttl() -> i64 {
    15
}
