//! Auth handlers: login, logout, me.

use axum::Json;
use axum::extract::State;

use saveurl_entity::user::UserProfile;

use crate::dto::request::LoginRequest;
use crate::dto::response::{LoginResponse, MeResponse, MessageResponse};
use crate::dto::validate_body;
use crate::error::ApiError;
use crate::extractors::{ApiJson, AuthUser};
use crate::state::AppState;

/// POST /api/auth/login
pub async fn login(
    State(state): State<AppState>,
    ApiJson(req): ApiJson<LoginRequest>,
) -> Result<Json<LoginResponse>, ApiError> {
    validate_body(&req)?;
    let result = state
        .session_manager
        .login(&req.email, &req.password)
        .await?;

    Ok(Json(LoginResponse {
        message: "Signed in successfully".to_string(),
        token: result.token,
        expires_at: result.expires_at,
        user: result.user.profile(),
    }))
}

/// POST /api/auth/logout
pub async fn logout(
    State(state): State<AppState>,
    auth: AuthUser,
) -> Result<Json<MessageResponse>, ApiError> {
    state.session_manager.logout(&auth.claims).await;
    Ok(Json(MessageResponse::new("Logged out successfully")))
}

/// GET /api/auth/me
pub async fn me(auth: AuthUser) -> Json<MeResponse> {
    Json(MeResponse {
        user: UserProfile {
            id: auth.user_id,
            email: auth.email.clone(),
            name: auth.name.clone(),
        },
    })
}
