//! Group CRUD handlers.

use std::collections::HashMap;

use axum::Json;
use axum::extract::{Query, State};
use axum::http::StatusCode;

use saveurl_core::error::AppError;
use saveurl_core::types::GroupId;
use saveurl_service::group::{
    CreateGroupRequest as SvcCreateGroup, UpdateGroupRequest as SvcUpdateGroup,
};

use crate::dto::request::{CreateGroupRequest, UpdateGroupRequest};
use crate::error::ApiError;
use crate::extractors::{ApiJson, AuthUser, required_param};
use crate::state::AppState;

/// GET /api/groups
pub async fn list_groups(
    State(state): State<AppState>,
    auth: AuthUser,
) -> Result<Json<serde_json::Value>, ApiError> {
    let groups = state.group_service.list_groups(&auth).await?;
    Ok(Json(serde_json::json!({ "groups": groups })))
}

/// POST /api/groups
pub async fn create_group(
    State(state): State<AppState>,
    auth: AuthUser,
    ApiJson(req): ApiJson<CreateGroupRequest>,
) -> Result<(StatusCode, Json<serde_json::Value>), ApiError> {
    let group = state
        .group_service
        .create_group(
            &auth,
            SvcCreateGroup {
                name: req.name,
                description: req.description,
            },
        )
        .await?;

    Ok((
        StatusCode::CREATED,
        Json(serde_json::json!({ "message": "Group created successfully", "group": group })),
    ))
}

/// PUT /api/groups
pub async fn update_group(
    State(state): State<AppState>,
    auth: AuthUser,
    ApiJson(req): ApiJson<UpdateGroupRequest>,
) -> Result<Json<serde_json::Value>, ApiError> {
    let group_id = req
        .id
        .ok_or_else(|| AppError::validation("Group ID is required"))?;

    let group = state
        .group_service
        .update_group(
            &auth,
            group_id,
            SvcUpdateGroup {
                name: req.name,
                description: req.description,
            },
        )
        .await?;

    Ok(Json(
        serde_json::json!({ "message": "Group updated successfully", "group": group }),
    ))
}

/// DELETE /api/groups?id=...
pub async fn delete_group(
    State(state): State<AppState>,
    auth: AuthUser,
    Query(params): Query<HashMap<String, String>>,
) -> Result<Json<serde_json::Value>, ApiError> {
    let group_id: GroupId = required_param(&params, "id", "Group ID is required")?;
    state.group_service.delete_group(&auth, group_id).await?;
    Ok(Json(
        serde_json::json!({ "message": "Group deleted successfully" }),
    ))
}
