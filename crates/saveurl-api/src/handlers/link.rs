//! Link handlers: owner CRUD, the public feed and group feeds.

use std::collections::HashMap;

use axum::Json;
use axum::extract::{Query, State};
use axum::http::StatusCode;

use saveurl_core::error::AppError;
use saveurl_core::types::{GroupId, LinkId};
use saveurl_entity::link::Visibility;
use saveurl_service::link::{
    CreateLinkRequest as SvcCreateLink, UpdateLinkRequest as SvcUpdateLink,
};

use crate::dto::request::{CreateLinkRequest, UpdateLinkRequest};
use crate::dto::validate_body;
use crate::error::ApiError;
use crate::extractors::{ApiJson, AuthUser, required_param};
use crate::state::AppState;

fn parse_visibility(raw: Option<&str>) -> Result<Option<Visibility>, AppError> {
    raw.map(str::trim)
        .filter(|v| !v.is_empty())
        .map(str::parse::<Visibility>)
        .transpose()
}

/// GET /api/links
pub async fn list_links(
    State(state): State<AppState>,
    auth: AuthUser,
) -> Result<Json<serde_json::Value>, ApiError> {
    let links = state.link_service.list_links(&auth).await?;
    Ok(Json(serde_json::json!({ "links": links })))
}

/// POST /api/links
pub async fn create_link(
    State(state): State<AppState>,
    auth: AuthUser,
    ApiJson(req): ApiJson<CreateLinkRequest>,
) -> Result<(StatusCode, Json<serde_json::Value>), ApiError> {
    validate_body(&req)?;
    let visibility = parse_visibility(req.visibility.as_deref())?;

    let link = state
        .link_service
        .create_link(
            &auth,
            SvcCreateLink {
                url: req.url,
                title: req.title,
                source: req.source,
                category: req.category,
                tags: req.tags,
                description: req.description,
                visibility,
                group_id: req.group_id,
            },
        )
        .await?;

    Ok((
        StatusCode::CREATED,
        Json(serde_json::json!({ "message": "Link created successfully", "link": link })),
    ))
}

/// PUT /api/links
pub async fn update_link(
    State(state): State<AppState>,
    auth: AuthUser,
    ApiJson(req): ApiJson<UpdateLinkRequest>,
) -> Result<Json<serde_json::Value>, ApiError> {
    let link_id = req
        .id
        .ok_or_else(|| AppError::validation("Link ID is required"))?;
    validate_body(&req)?;
    let visibility = parse_visibility(req.visibility.as_deref())?;

    let link = state
        .link_service
        .update_link(
            &auth,
            link_id,
            SvcUpdateLink {
                url: req.url,
                title: req.title,
                source: req.source,
                category: req.category,
                tags: req.tags,
                description: req.description,
                visibility,
                group_id: req.group_id,
            },
        )
        .await?;

    Ok(Json(
        serde_json::json!({ "message": "Link updated successfully", "link": link }),
    ))
}

/// DELETE /api/links?id=...
pub async fn delete_link(
    State(state): State<AppState>,
    auth: AuthUser,
    Query(params): Query<HashMap<String, String>>,
) -> Result<Json<serde_json::Value>, ApiError> {
    let link_id: LinkId = required_param(&params, "id", "Link ID is required")?;
    state.link_service.delete_link(&auth, link_id).await?;
    Ok(Json(
        serde_json::json!({ "message": "Link deleted successfully" }),
    ))
}

/// GET /api/public-links
pub async fn list_public_links(
    State(state): State<AppState>,
) -> Result<Json<serde_json::Value>, ApiError> {
    let links = state.link_service.list_public_links().await?;
    Ok(Json(serde_json::json!({ "links": links })))
}

/// GET /api/groups/links?groupId=...
pub async fn list_group_links(
    State(state): State<AppState>,
    auth: AuthUser,
    Query(params): Query<HashMap<String, String>>,
) -> Result<Json<serde_json::Value>, ApiError> {
    let group_id: GroupId = required_param(&params, "groupId", "Group ID is required")?;
    let links = state.link_service.list_group_links(&auth, group_id).await?;
    Ok(Json(serde_json::json!({ "links": links })))
}
