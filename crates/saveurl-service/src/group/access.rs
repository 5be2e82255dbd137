//! Read and write gates on a group.

use saveurl_core::error::AppError;
use saveurl_core::types::GroupId;
use saveurl_database::store::GroupStore;
use saveurl_entity::group::Group;

use crate::context::RequestContext;

/// The group, if the requester owns it or appears in its membership.
///
/// Unknown groups are `NotFound`; known groups the requester may not read
/// are `Forbidden`.
pub async fn readable_group(
    groups: &dyn GroupStore,
    ctx: &RequestContext,
    group_id: GroupId,
) -> Result<Group, AppError> {
    let group = groups
        .find_by_id(group_id)
        .await?
        .ok_or_else(|| AppError::not_found("Group not found"))?;

    if group.is_owned_by(ctx.user_id) || groups.is_member(group_id, &ctx.email).await? {
        Ok(group)
    } else {
        Err(AppError::forbidden("You don't have access to this group"))
    }
}

/// The group, if the requester owns it. Missing and not-owned groups fail
/// alike with `Forbidden` carrying `denied`.
pub async fn owned_group(
    groups: &dyn GroupStore,
    ctx: &RequestContext,
    group_id: GroupId,
    denied: &str,
) -> Result<Group, AppError> {
    match groups.find_by_id(group_id).await? {
        Some(group) if group.is_owned_by(ctx.user_id) => Ok(group),
        _ => Err(AppError::forbidden(denied)),
    }
}
