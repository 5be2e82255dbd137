//! Account handlers: signup, email verification and password reset.

use axum::Json;
use axum::extract::State;
use axum::http::StatusCode;

use saveurl_service::SignupOutcome;
use saveurl_service::account::{
    ForgotPasswordRequest as SvcForgotPassword, ResetPasswordRequest as SvcResetPassword,
    SignupRequest as SvcSignup, VerifyEmailRequest as SvcVerifyEmail,
};

use crate::dto::request::{
    ForgotPasswordRequest, ResetPasswordRequest, SignupRequest, VerifyEmailRequest,
};
use crate::dto::response::{MessageResponse, SignupResponse};
use crate::dto::validate_body;
use crate::error::ApiError;
use crate::extractors::ApiJson;
use crate::state::AppState;

/// POST /api/signup
pub async fn signup(
    State(state): State<AppState>,
    ApiJson(req): ApiJson<SignupRequest>,
) -> Result<(StatusCode, Json<SignupResponse>), ApiError> {
    let outcome = state
        .account_service
        .signup(SvcSignup {
            email: req.email,
            password: req.password,
            name: req.name,
        })
        .await?;

    let (status, message) = match &outcome {
        SignupOutcome::Created { .. } => {
            (StatusCode::CREATED, "Verification code sent to your email")
        }
        SignupOutcome::Resent { .. } => (StatusCode::OK, "Verification code resent"),
    };

    Ok((
        status,
        Json(SignupResponse {
            message: message.to_string(),
            email: outcome.email().to_string(),
            requires_verification: true,
        }),
    ))
}

/// POST /api/verify-email
pub async fn verify_email(
    State(state): State<AppState>,
    ApiJson(req): ApiJson<VerifyEmailRequest>,
) -> Result<Json<MessageResponse>, ApiError> {
    validate_body(&req)?;
    state
        .account_service
        .verify_email(SvcVerifyEmail {
            email: req.email,
            code: req.code,
        })
        .await?;

    Ok(Json(MessageResponse::new(
        "Email verified successfully. You can now sign in.",
    )))
}

/// POST /api/forgot-password
pub async fn forgot_password(
    State(state): State<AppState>,
    ApiJson(req): ApiJson<ForgotPasswordRequest>,
) -> Result<Json<MessageResponse>, ApiError> {
    validate_body(&req)?;
    state
        .account_service
        .forgot_password(SvcForgotPassword { email: req.email })
        .await?;

    Ok(Json(MessageResponse::new("Reset code sent to your email")))
}

/// POST /api/reset-password
pub async fn reset_password(
    State(state): State<AppState>,
    ApiJson(req): ApiJson<ResetPasswordRequest>,
) -> Result<Json<MessageResponse>, ApiError> {
    validate_body(&req)?;
    state
        .account_service
        .reset_password(SvcResetPassword {
            email: req.email,
            code: req.code,
            password: req.password,
        })
        .await?;

    Ok(Json(MessageResponse::new("Password reset successfully")))
}
