//! Group CRUD with owner-only writes.

use std::sync::Arc;

use futures::future::try_join_all;
use tracing::info;

use saveurl_core::config::LimitsConfig;
use saveurl_core::error::AppError;
use saveurl_core::types::GroupId;
use saveurl_database::store::{GroupStore, LinkStore};
use saveurl_entity::group::{CreateGroup, Group, GroupOverview, UpdateGroup};

use super::access::owned_group;
use crate::context::RequestContext;
use crate::validation::optional_text;

/// Manages groups.
#[derive(Clone)]
pub struct GroupService {
    /// Group store.
    groups: Arc<dyn GroupStore>,
    /// Link store, for per-group link counts.
    links: Arc<dyn LinkStore>,
    name_max_length: usize,
    description_max_length: usize,
}

impl std::fmt::Debug for GroupService {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("GroupService")
            .field("name_max_length", &self.name_max_length)
            .field("description_max_length", &self.description_max_length)
            .finish_non_exhaustive()
    }
}

/// Request to create a group.
#[derive(Debug, Clone, Default, serde::Deserialize)]
pub struct CreateGroupRequest {
    pub name: String,
    pub description: Option<String>,
}

/// Request to update a group. Absent fields keep their value.
#[derive(Debug, Clone, Default)]
pub struct UpdateGroupRequest {
    pub name: Option<String>,
    /// `Some(None)` clears the description.
    pub description: Option<Option<String>>,
}

impl GroupService {
    /// Creates a new group service.
    pub fn new(
        groups: Arc<dyn GroupStore>,
        links: Arc<dyn LinkStore>,
        limits: &LimitsConfig,
    ) -> Self {
        Self {
            groups,
            links,
            name_max_length: limits.group_name_max_length,
            description_max_length: limits.group_description_max_length,
        }
    }

    fn check_name(&self, name: &str, empty_message: &str) -> Result<(), AppError> {
        if name.is_empty() {
            return Err(AppError::validation(empty_message));
        }
        if name.chars().count() > self.name_max_length {
            return Err(AppError::validation(format!(
                "Group name must be {} characters or less",
                self.name_max_length
            )));
        }
        Ok(())
    }

    fn check_description(&self, description: Option<&str>) -> Result<(), AppError> {
        match description {
            Some(d) if d.chars().count() > self.description_max_length => {
                Err(AppError::validation(format!(
                    "Description must be {} characters or less",
                    self.description_max_length
                )))
            }
            _ => Ok(()),
        }
    }

    /// Groups the requester owns or belongs to, newest first.
    pub async fn list_groups(&self, ctx: &RequestContext) -> Result<Vec<GroupOverview>, AppError> {
        let groups = self.groups.list_for_user(ctx.user_id, &ctx.email).await?;

        try_join_all(groups.into_iter().map(|group| async move {
            let members = self.groups.list_members(group.id).await?;
            let link_count = self.links.count_by_group(group.id).await?;
            Ok::<_, AppError>(GroupOverview::new(group, members, link_count, ctx.user_id))
        }))
        .await
    }

    /// Creates a group owned by the requester.
    pub async fn create_group(
        &self,
        ctx: &RequestContext,
        req: CreateGroupRequest,
    ) -> Result<Group, AppError> {
        let name = req.name.trim().to_string();
        self.check_name(&name, "Group name is required")?;
        let description = optional_text(req.description.as_deref());
        self.check_description(description.as_deref())?;

        let group = self
            .groups
            .create(&CreateGroup {
                owner_id: ctx.user_id,
                name,
                description,
            })
            .await?;

        info!(user_id = %ctx.user_id, group_id = %group.id, name = %group.name, "Group created");
        Ok(group)
    }

    /// Updates a group owned by the requester.
    pub async fn update_group(
        &self,
        ctx: &RequestContext,
        group_id: GroupId,
        req: UpdateGroupRequest,
    ) -> Result<Group, AppError> {
        const DENIED: &str = "Group not found or you don't have permission to update it";
        let group = owned_group(self.groups.as_ref(), ctx, group_id, DENIED).await?;

        let name = match req.name {
            Some(name) => {
                let name = name.trim().to_string();
                self.check_name(&name, "Group name cannot be empty")?;
                name
            }
            None => group.name,
        };
        let description = match req.description {
            Some(description) => optional_text(description.as_deref()),
            None => group.description,
        };
        self.check_description(description.as_deref())?;

        let updated = self
            .groups
            .update(group_id, &UpdateGroup { name, description })
            .await?
            .ok_or_else(|| AppError::forbidden(DENIED))?;

        info!(user_id = %ctx.user_id, group_id = %group_id, "Group updated");
        Ok(updated)
    }

    /// Deletes a group owned by the requester, with its memberships and
    /// group-scoped links.
    pub async fn delete_group(&self, ctx: &RequestContext, group_id: GroupId) -> Result<(), AppError> {
        const DENIED: &str = "Group not found or you don't have permission to delete it";
        owned_group(self.groups.as_ref(), ctx, group_id, DENIED).await?;

        if !self.groups.delete(group_id).await? {
            return Err(AppError::forbidden(DENIED));
        }

        info!(user_id = %ctx.user_id, group_id = %group_id, "Group deleted");
        Ok(())
    }
}
