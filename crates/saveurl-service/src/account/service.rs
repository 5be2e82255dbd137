//! Signup, email verification and password reset with one-time codes.

use std::sync::Arc;

use chrono::{DateTime, Duration, Utc};
use rand::Rng;
use tracing::{error, info, warn};

use saveurl_auth::{PasswordHasher, PasswordValidator};
use saveurl_core::error::{AppError, ErrorKind};
use saveurl_database::store::{DUPLICATE_EMAIL, UserStore};
use saveurl_entity::user::{CreateUser, User};
use saveurl_mail::{AccountMailer, MailError};

use crate::validation::{normalize_email, require_email};

const NO_ACCOUNT: &str = "No account found with this email address";

/// Manages account creation and the one-time code flows.
#[derive(Clone)]
pub struct AccountService {
    /// User store.
    users: Arc<dyn UserStore>,
    /// Password hasher.
    password_hasher: Arc<PasswordHasher>,
    /// Password policy.
    password_validator: Arc<PasswordValidator>,
    /// Account mail.
    mailer: Arc<AccountMailer>,
    /// How long a one-time code stays valid.
    code_ttl: Duration,
}

impl std::fmt::Debug for AccountService {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AccountService")
            .field("code_ttl", &self.code_ttl)
            .finish_non_exhaustive()
    }
}

/// Request to register a new account.
#[derive(Debug, Clone, serde::Deserialize)]
pub struct SignupRequest {
    pub email: String,
    pub password: String,
    pub name: String,
}

/// Request to confirm an email address.
#[derive(Debug, Clone, serde::Deserialize)]
pub struct VerifyEmailRequest {
    pub email: String,
    pub code: String,
}

/// Request for a password reset code.
#[derive(Debug, Clone, serde::Deserialize)]
pub struct ForgotPasswordRequest {
    pub email: String,
}

/// Request to set a new password with a reset code.
#[derive(Debug, Clone, serde::Deserialize)]
pub struct ResetPasswordRequest {
    pub email: String,
    pub code: String,
    pub password: String,
}

/// What a successful signup did.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SignupOutcome {
    /// A new unverified account was created and a code was sent.
    Created { email: String },
    /// The account already existed unverified; a fresh code was sent.
    Resent { email: String },
}

impl SignupOutcome {
    /// The normalized email the code was sent to.
    pub fn email(&self) -> &str {
        match self {
            Self::Created { email } | Self::Resent { email } => email,
        }
    }
}

/// A fresh six-digit numeric code.
fn generate_code() -> String {
    rand::rng().random_range(100_000..1_000_000).to_string()
}

fn send_failed(message: &'static str) -> impl FnOnce(MailError) -> AppError {
    move |e| AppError::with_source(ErrorKind::ExternalService, message, e)
}

impl AccountService {
    /// Creates a new account service.
    pub fn new(
        users: Arc<dyn UserStore>,
        password_hasher: Arc<PasswordHasher>,
        password_validator: Arc<PasswordValidator>,
        mailer: Arc<AccountMailer>,
        code_ttl_minutes: i64,
    ) -> Self {
        Self {
            users,
            password_hasher,
            password_validator,
            mailer,
            code_ttl: Duration::minutes(code_ttl_minutes),
        }
    }

    fn code_expiry(&self) -> DateTime<Utc> {
        Utc::now() + self.code_ttl
    }

    async fn require_user(&self, raw_email: &str) -> Result<User, AppError> {
        let email = normalize_email(raw_email);
        if email.is_empty() {
            return Err(AppError::validation("Email is required"));
        }
        self.users
            .find_by_email(&email)
            .await?
            .ok_or_else(|| AppError::not_found(NO_ACCOUNT))
    }

    /// Register an account, or resend the code of an unverified one.
    ///
    /// A new account is removed again if its verification mail cannot be
    /// sent.
    pub async fn signup(&self, req: SignupRequest) -> Result<SignupOutcome, AppError> {
        let name = req.name.trim();
        if name.is_empty() || req.email.trim().is_empty() || req.password.is_empty() {
            return Err(AppError::validation("All fields are required"));
        }
        let email = require_email(&req.email)?;
        self.password_validator.validate(&req.password)?;

        if let Some(existing) = self.users.find_by_email(&email).await? {
            if existing.is_verified {
                return Err(AppError::conflict(DUPLICATE_EMAIL));
            }

            let code = generate_code();
            self.users
                .set_verification_code(existing.id, &code, self.code_expiry())
                .await?;
            self.mailer
                .send_verification(&email, &code)
                .await
                .map_err(send_failed("Failed to send verification email"))?;

            info!(user_id = %existing.id, "Verification code resent");
            return Ok(SignupOutcome::Resent { email });
        }

        let password_hash = self.password_hasher.hash_password(&req.password)?;
        let code = generate_code();
        let user = self
            .users
            .create(&CreateUser {
                name: name.to_string(),
                email: email.clone(),
                password_hash,
                verification_code: code.clone(),
                verification_code_expiry: self.code_expiry(),
            })
            .await?;

        if let Err(e) = self.mailer.send_verification(&email, &code).await {
            error!(user_id = %user.id, error = %e, "Verification mail failed, removing account");
            if let Err(delete_err) = self.users.delete(user.id).await {
                error!(user_id = %user.id, error = %delete_err, "Failed to remove account");
            }
            return Err(send_failed("Failed to send verification email. Please try again.")(e));
        }

        info!(user_id = %user.id, email = %email, "Account created");
        Ok(SignupOutcome::Created { email })
    }

    /// Confirm an email address with the code sent at signup.
    pub async fn verify_email(&self, req: VerifyEmailRequest) -> Result<User, AppError> {
        if req.code.trim().is_empty() {
            return Err(AppError::validation("Email and verification code are required"));
        }
        let user = self.require_user(&req.email).await?;
        if user.is_verified {
            return Err(AppError::precondition_failed("Email is already verified"));
        }
        if !user.verification_code_matches(&req.code, Utc::now()) {
            return Err(AppError::validation("Invalid or expired verification code"));
        }

        self.users.mark_verified(user.id).await?;
        info!(user_id = %user.id, "Email verified");

        if let Err(e) = self.mailer.send_welcome(&user.email, &user.name).await {
            warn!(user_id = %user.id, error = %e, "Welcome mail failed");
        }

        Ok(User {
            is_verified: true,
            verification_code: None,
            verification_code_expiry: None,
            ..user
        })
    }

    /// Send a password reset code to a verified account.
    pub async fn forgot_password(&self, req: ForgotPasswordRequest) -> Result<(), AppError> {
        let user = self.require_user(&req.email).await?;
        if !user.is_verified {
            return Err(AppError::precondition_failed(
                "Please verify your email first before resetting password",
            ));
        }

        let code = generate_code();
        self.users
            .set_reset_code(user.id, &code, self.code_expiry())
            .await?;
        self.mailer
            .send_password_reset(&user.email, &user.name, &code)
            .await
            .map_err(send_failed("Failed to send reset email. Please try again."))?;

        info!(user_id = %user.id, "Password reset code sent");
        Ok(())
    }

    /// Replace the password of an account holding a valid reset code.
    pub async fn reset_password(&self, req: ResetPasswordRequest) -> Result<(), AppError> {
        if req.code.trim().is_empty() || req.password.is_empty() {
            return Err(AppError::validation(
                "Email, reset code, and new password are required",
            ));
        }
        let user = self.require_user(&req.email).await?;
        if !user.reset_code_matches(&req.code, Utc::now()) {
            return Err(AppError::validation("Invalid or expired reset code"));
        }
        self.password_validator.validate(&req.password)?;

        let password_hash = self.password_hasher.hash_password(&req.password)?;
        self.users.reset_password(user.id, &password_hash).await?;
        info!(user_id = %user.id, "Password reset");

        if let Err(e) = self.mailer.send_reset_success(&user.email).await {
            warn!(user_id = %user.id, error = %e, "Reset confirmation mail failed");
        }
        Ok(())
    }
}
