//! Saved links: owner-scoped CRUD plus the public and group feeds.

use std::sync::Arc;

use tracing::info;

use saveurl_core::error::AppError;
use saveurl_core::types::{GroupId, LinkId};
use saveurl_database::store::{GroupStore, LinkStore};
use saveurl_entity::link::{CreateLink, Link, PublicLink, UpdateLink, Visibility};

use crate::context::RequestContext;
use crate::group::access::readable_group;
use crate::validation::{is_valid_url, normalize_tags, optional_text};

const TITLE_MAX_LENGTH: usize = 255;

/// Manages saved links.
#[derive(Clone)]
pub struct LinkService {
    /// Link store.
    links: Arc<dyn LinkStore>,
    /// Group store, for group-scoped access checks.
    groups: Arc<dyn GroupStore>,
}

impl std::fmt::Debug for LinkService {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("LinkService").finish_non_exhaustive()
    }
}

/// Request to save a link.
#[derive(Debug, Clone, Default)]
pub struct CreateLinkRequest {
    pub url: String,
    pub title: Option<String>,
    pub source: String,
    pub category: String,
    pub tags: Option<String>,
    pub description: Option<String>,
    /// Defaults to private.
    pub visibility: Option<Visibility>,
    pub group_id: Option<GroupId>,
}

/// Request to change a link.
///
/// Absent `url`, `source`, `category`, `visibility` and `group_id` keep
/// their value; `title`, `tags` and `description` are always replaced.
#[derive(Debug, Clone, Default)]
pub struct UpdateLinkRequest {
    pub url: Option<String>,
    pub title: Option<String>,
    pub source: Option<String>,
    pub category: Option<String>,
    pub tags: Option<String>,
    pub description: Option<String>,
    pub visibility: Option<Visibility>,
    /// `Some(None)` detaches the link from its group.
    pub group_id: Option<Option<GroupId>>,
}

fn check_title(title: Option<&str>) -> Result<(), AppError> {
    match title {
        Some(t) if t.chars().count() > TITLE_MAX_LENGTH => Err(AppError::validation(format!(
            "Title must be {TITLE_MAX_LENGTH} characters or less"
        ))),
        _ => Ok(()),
    }
}

fn check_group_visibility(
    visibility: Visibility,
    group_id: Option<GroupId>,
) -> Result<(), AppError> {
    if visibility == Visibility::Group && group_id.is_none() {
        return Err(AppError::validation(
            "A group is required for group visibility",
        ));
    }
    Ok(())
}

impl LinkService {
    /// Creates a new link service.
    pub fn new(links: Arc<dyn LinkStore>, groups: Arc<dyn GroupStore>) -> Self {
        Self { links, groups }
    }

    /// Links owned by the requester, newest first.
    pub async fn list_links(&self, ctx: &RequestContext) -> Result<Vec<Link>, AppError> {
        self.links.list_by_owner(ctx.user_id).await
    }

    /// Public links of every user, newest first.
    pub async fn list_public_links(&self) -> Result<Vec<PublicLink>, AppError> {
        self.links.list_public().await
    }

    /// Links scoped to a group the requester owns or belongs to.
    pub async fn list_group_links(
        &self,
        ctx: &RequestContext,
        group_id: GroupId,
    ) -> Result<Vec<Link>, AppError> {
        readable_group(self.groups.as_ref(), ctx, group_id).await?;
        self.links.list_by_group(group_id).await
    }

    /// Saves a link for the requester.
    pub async fn create_link(
        &self,
        ctx: &RequestContext,
        req: CreateLinkRequest,
    ) -> Result<Link, AppError> {
        let url = req.url.trim();
        let source = req.source.trim();
        let category = req.category.trim();
        if url.is_empty() || source.is_empty() || category.is_empty() {
            return Err(AppError::validation(
                "URL, source, and category are required",
            ));
        }
        if !is_valid_url(url) {
            return Err(AppError::validation("Invalid URL format"));
        }
        let title = optional_text(req.title.as_deref());
        check_title(title.as_deref())?;

        let visibility = req.visibility.unwrap_or_default();
        check_group_visibility(visibility, req.group_id)?;
        if let Some(group_id) = req.group_id {
            readable_group(self.groups.as_ref(), ctx, group_id).await?;
        }

        let link = self
            .links
            .create(&CreateLink {
                user_id: ctx.user_id,
                url: url.to_string(),
                title,
                source: source.to_string(),
                category: category.to_string(),
                tags: normalize_tags(req.tags.as_deref()),
                description: optional_text(req.description.as_deref()),
                visibility,
                group_id: req.group_id,
            })
            .await?;

        info!(user_id = %ctx.user_id, link_id = %link.id, "Link created");
        Ok(link)
    }

    /// Changes a link owned by the requester.
    pub async fn update_link(
        &self,
        ctx: &RequestContext,
        link_id: LinkId,
        req: UpdateLinkRequest,
    ) -> Result<Link, AppError> {
        const NOT_FOUND: &str = "Link not found or you don't have permission to update it";
        let existing = self
            .links
            .find_owned(link_id, ctx.user_id)
            .await?
            .ok_or_else(|| AppError::not_found(NOT_FOUND))?;

        let url = optional_text(req.url.as_deref());
        if url.as_deref().is_some_and(|u| !is_valid_url(u)) {
            return Err(AppError::validation("Invalid URL format"));
        }
        let title = optional_text(req.title.as_deref());
        check_title(title.as_deref())?;

        let visibility = req.visibility.unwrap_or(existing.visibility);
        let group_id = req.group_id.unwrap_or(existing.group_id);
        check_group_visibility(visibility, group_id)?;
        if let Some(Some(group_id)) = req.group_id {
            readable_group(self.groups.as_ref(), ctx, group_id).await?;
        }

        let update = UpdateLink {
            url,
            title,
            source: optional_text(req.source.as_deref()),
            category: optional_text(req.category.as_deref()),
            tags: normalize_tags(req.tags.as_deref()),
            description: optional_text(req.description.as_deref()),
            visibility: req.visibility,
            group_id: req.group_id,
        };
        let link = self
            .links
            .update_owned(link_id, ctx.user_id, &update)
            .await?
            .ok_or_else(|| AppError::not_found(NOT_FOUND))?;

        info!(user_id = %ctx.user_id, link_id = %link_id, "Link updated");
        Ok(link)
    }

    /// Deletes a link owned by the requester.
    pub async fn delete_link(&self, ctx: &RequestContext, link_id: LinkId) -> Result<(), AppError> {
        if !self.links.delete_owned(link_id, ctx.user_id).await? {
            return Err(AppError::not_found(
                "Link not found or you don't have permission to delete it",
            ));
        }

        info!(user_id = %ctx.user_id, link_id = %link_id, "Link deleted");
        Ok(())
    }
}
