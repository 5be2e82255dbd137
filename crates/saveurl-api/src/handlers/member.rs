//! Group membership handlers.

use std::collections::HashMap;

use axum::Json;
use axum::extract::{Query, State};
use axum::http::StatusCode;

use saveurl_core::error::AppError;
use saveurl_core::types::{GroupId, MemberId};
use saveurl_service::GroupMembers;

use crate::dto::request::AddMemberRequest;
use crate::dto::validate_body;
use crate::error::ApiError;
use crate::extractors::{ApiJson, AuthUser, required_param};
use crate::state::AppState;

/// GET /api/groups/members?groupId=...
pub async fn list_members(
    State(state): State<AppState>,
    auth: AuthUser,
    Query(params): Query<HashMap<String, String>>,
) -> Result<Json<GroupMembers>, ApiError> {
    let group_id: GroupId = required_param(&params, "groupId", "Group ID is required")?;
    let members = state
        .membership_service
        .list_members(&auth, group_id)
        .await?;
    Ok(Json(members))
}

/// POST /api/groups/members
pub async fn add_member(
    State(state): State<AppState>,
    auth: AuthUser,
    ApiJson(req): ApiJson<AddMemberRequest>,
) -> Result<(StatusCode, Json<serde_json::Value>), ApiError> {
    let group_id = req
        .group_id
        .ok_or_else(|| AppError::validation("Group ID and email are required"))?;
    validate_body(&req)?;

    let member = state
        .membership_service
        .add_member(&auth, group_id, &req.email)
        .await?;

    Ok((
        StatusCode::CREATED,
        Json(serde_json::json!({ "message": "Member added successfully", "member": member })),
    ))
}

/// DELETE /api/groups/members?memberId=...&groupId=...
pub async fn remove_member(
    State(state): State<AppState>,
    auth: AuthUser,
    Query(params): Query<HashMap<String, String>>,
) -> Result<Json<serde_json::Value>, ApiError> {
    const MISSING: &str = "Member ID and Group ID are required";
    let member_id: MemberId = required_param(&params, "memberId", MISSING)?;
    let group_id: GroupId = required_param(&params, "groupId", MISSING)?;

    state
        .membership_service
        .remove_member(&auth, group_id, member_id)
        .await?;

    Ok(Json(
        serde_json::json!({ "message": "Member removed successfully" }),
    ))
}
