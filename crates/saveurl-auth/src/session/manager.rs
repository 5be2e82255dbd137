//! Session lifecycle manager: login, token resolution, logout.

use std::sync::Arc;

use chrono::{DateTime, Utc};
use tracing::{info, warn};

use saveurl_core::error::AppError;
use saveurl_database::store::UserStore;
use saveurl_entity::user::User;

use crate::jwt::{Claims, JwtDecoder, JwtEncoder};
use crate::password::PasswordHasher;

const INVALID_CREDENTIALS: &str = "Invalid email or password";

/// Result of a successful login.
#[derive(Debug, Clone)]
pub struct LoginResult {
    /// Signed session token.
    pub token: String,
    /// When the token stops being accepted.
    pub expires_at: DateTime<Utc>,
    /// The authenticated user.
    pub user: User,
}

/// Issues, resolves and revokes session tokens.
#[derive(Clone)]
pub struct SessionManager {
    users: Arc<dyn UserStore>,
    password_hasher: Arc<PasswordHasher>,
    jwt_encoder: Arc<JwtEncoder>,
    jwt_decoder: Arc<JwtDecoder>,
}

impl std::fmt::Debug for SessionManager {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SessionManager").finish_non_exhaustive()
    }
}

impl SessionManager {
    /// Creates a new session manager.
    pub fn new(
        users: Arc<dyn UserStore>,
        password_hasher: Arc<PasswordHasher>,
        jwt_encoder: Arc<JwtEncoder>,
        jwt_decoder: Arc<JwtDecoder>,
    ) -> Self {
        Self {
            users,
            password_hasher,
            jwt_encoder,
            jwt_decoder,
        }
    }

    /// Verify credentials and issue a session token.
    ///
    /// An unknown email and a wrong password fail identically.
    pub async fn login(&self, email: &str, password: &str) -> Result<LoginResult, AppError> {
        let email = email.trim().to_lowercase();
        let Some(user) = self.users.find_by_email(&email).await? else {
            warn!(email = %email, "Login for unknown email");
            return Err(AppError::unauthorized(INVALID_CREDENTIALS));
        };

        if !self
            .password_hasher
            .verify_password(password, &user.password_hash)?
        {
            warn!(user_id = %user.id, "Login with wrong password");
            return Err(AppError::unauthorized(INVALID_CREDENTIALS));
        }

        if !user.is_verified {
            return Err(AppError::unauthorized(
                "Please verify your email before signing in",
            ));
        }

        let (token, expires_at) = self.jwt_encoder.issue(&user)?;
        info!(user_id = %user.id, "User signed in");

        Ok(LoginResult {
            token,
            expires_at,
            user,
        })
    }

    /// Resolve a presented token back to its claims.
    pub fn authenticate(&self, token: &str) -> Result<Claims, AppError> {
        self.jwt_decoder.decode(token)
    }

    /// Revoke the presented token.
    pub async fn logout(&self, claims: &Claims) {
        self.jwt_decoder.revoke(claims).await;
        info!(user_id = %claims.sub, "User signed out");
    }
}

#[cfg(test)]
mod tests {
    use std::time::Duration as StdDuration;

    use chrono::Duration;
    use saveurl_core::config::AuthConfig;
    use saveurl_core::error::ErrorKind;
    use saveurl_database::MemoryStore;
    use saveurl_entity::user::CreateUser;

    use super::*;
    use crate::jwt::RevocationList;

    async fn setup(verified: bool) -> (SessionManager, User) {
        let store = Arc::new(MemoryStore::new());
        let hasher = Arc::new(PasswordHasher::new());
        let user = store
            .create(&CreateUser {
                name: "Ann".into(),
                email: "a@x.com".into(),
                password_hash: hasher.hash_password("Aa1!aaaa").expect("hash"),
                verification_code: "123456".into(),
                verification_code_expiry: Utc::now() + Duration::minutes(15),
            })
            .await
            .expect("create");
        if verified {
            store.mark_verified(user.id).await.expect("verify");
        }

        let config = AuthConfig::default();
        let revocations = RevocationList::new(StdDuration::from_secs(3600));
        let manager = SessionManager::new(
            store,
            hasher,
            Arc::new(JwtEncoder::new(&config)),
            Arc::new(JwtDecoder::new(&config, revocations)),
        );
        (manager, user)
    }

    #[tokio::test]
    async fn test_login_round_trips_identity() {
        let (manager, user) = setup(true).await;
        let result = manager.login(" A@X.com ", "Aa1!aaaa").await.expect("login");
        let claims = manager.authenticate(&result.token).expect("resolve");
        assert_eq!(claims.user_id(), user.id);
        assert_eq!(claims.email, "a@x.com");
        assert_eq!(claims.name, "Ann");
    }

    #[tokio::test]
    async fn test_wrong_password_and_unknown_email_look_the_same() {
        let (manager, _) = setup(true).await;
        let wrong = manager.login("a@x.com", "Bb2@bbbb").await.expect_err("wrong");
        let unknown = manager.login("z@x.com", "Aa1!aaaa").await.expect_err("unknown");
        assert_eq!(wrong.kind, ErrorKind::Unauthorized);
        assert_eq!(wrong.message, unknown.message);
    }

    #[tokio::test]
    async fn test_unverified_account_cannot_sign_in() {
        let (manager, _) = setup(false).await;
        let err = manager.login("a@x.com", "Aa1!aaaa").await.expect_err("unverified");
        assert_eq!(err.kind, ErrorKind::Unauthorized);
    }

    #[tokio::test]
    async fn test_logout_revokes_token() {
        let (manager, _) = setup(true).await;
        let result = manager.login("a@x.com", "Aa1!aaaa").await.expect("login");
        let claims = manager.authenticate(&result.token).expect("resolve");
        manager.logout(&claims).await;
        assert!(manager.authenticate(&result.token).is_err());
    }

    #[tokio::test]
    async fn test_tampered_token_rejected() {
        let (manager, _) = setup(true).await;
        let result = manager.login("a@x.com", "Aa1!aaaa").await.expect("login");
        let tampered = format!("{}x", result.token);
        let err = manager.authenticate(&tampered).expect_err("tampered");
        assert_eq!(err.kind, ErrorKind::Unauthorized);
    }
}
