//! Category and source handlers.

use axum::Json;
use axum::extract::State;
use axum::http::StatusCode;

use saveurl_entity::vocabulary::VocabularyKind;
use saveurl_service::AddOutcome;

use crate::dto::request::VocabularyRequest;
use crate::error::ApiError;
use crate::extractors::{ApiJson, AuthUser};
use crate::state::AppState;

async fn list(
    state: &AppState,
    auth: &AuthUser,
    kind: VocabularyKind,
) -> Result<Json<serde_json::Value>, ApiError> {
    let names = state.vocabulary_service.list(auth, kind).await?;
    Ok(Json(serde_json::json!({ (kind.plural()): names })))
}

async fn add(
    state: &AppState,
    auth: &AuthUser,
    kind: VocabularyKind,
    name: &str,
) -> Result<(StatusCode, Json<serde_json::Value>), ApiError> {
    let label = kind.label();
    let response = match state.vocabulary_service.add(auth, kind, name).await? {
        AddOutcome::Added(entry) => (
            StatusCode::CREATED,
            Json(serde_json::json!({
                "message": format!("{label} added successfully"),
                (kind.singular()): entry.name,
            })),
        ),
        AddOutcome::AlreadyDefault => (
            StatusCode::OK,
            Json(serde_json::json!({ "message": format!("{label} already exists in defaults") })),
        ),
        AddOutcome::AlreadyExists => (
            StatusCode::OK,
            Json(serde_json::json!({ "message": format!("{label} already exists") })),
        ),
    };
    Ok(response)
}

/// GET /api/categories
pub async fn list_categories(
    State(state): State<AppState>,
    auth: AuthUser,
) -> Result<Json<serde_json::Value>, ApiError> {
    list(&state, &auth, VocabularyKind::Category).await
}

/// POST /api/categories
pub async fn add_category(
    State(state): State<AppState>,
    auth: AuthUser,
    ApiJson(req): ApiJson<VocabularyRequest>,
) -> Result<(StatusCode, Json<serde_json::Value>), ApiError> {
    add(&state, &auth, VocabularyKind::Category, &req.name).await
}

/// GET /api/sources
pub async fn list_sources(
    State(state): State<AppState>,
    auth: AuthUser,
) -> Result<Json<serde_json::Value>, ApiError> {
    list(&state, &auth, VocabularyKind::Source).await
}

/// POST /api/sources
pub async fn add_source(
    State(state): State<AppState>,
    auth: AuthUser,
    ApiJson(req): ApiJson<VocabularyRequest>,
) -> Result<(StatusCode, Json<serde_json::Value>), ApiError> {
    add(&state, &auth, VocabularyKind::Source, &req.name).await
}
