//! Link repository implementation.

use async_trait::async_trait;
use sqlx::PgPool;

use saveurl_core::error::{AppError, ErrorKind};
use saveurl_core::result::AppResult;
use saveurl_core::types::{GroupId, LinkId, UserId};
use saveurl_entity::link::{CreateLink, Link, PublicLink, UpdateLink};

use crate::store::LinkStore;

/// Repository for saved links.
#[derive(Debug, Clone)]
pub struct LinkRepository {
    pool: PgPool,
}

impl LinkRepository {
    /// Create a new link repository.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl LinkStore for LinkRepository {
    async fn list_by_owner(&self, owner: UserId) -> AppResult<Vec<Link>> {
        sqlx::query_as::<_, Link>(
            "SELECT * FROM links WHERE user_id = $1 ORDER BY created_at DESC, id DESC",
        )
        .bind(owner)
        .fetch_all(&self.pool)
        .await
        .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to list links", e))
    }

    async fn list_public(&self) -> AppResult<Vec<PublicLink>> {
        sqlx::query_as::<_, PublicLink>(
            "SELECT l.*, u.name AS user_name, u.email AS user_email \
             FROM links l \
             JOIN users u ON u.id = l.user_id \
             WHERE l.visibility = 'public' \
             ORDER BY l.created_at DESC, l.id DESC",
        )
        .fetch_all(&self.pool)
        .await
        .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to list public links", e))
    }

    async fn list_by_group(&self, group_id: GroupId) -> AppResult<Vec<Link>> {
        sqlx::query_as::<_, Link>(
            "SELECT * FROM links WHERE group_id = $1 ORDER BY created_at DESC, id DESC",
        )
        .bind(group_id)
        .fetch_all(&self.pool)
        .await
        .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to list group links", e))
    }

    async fn find_owned(&self, id: LinkId, owner: UserId) -> AppResult<Option<Link>> {
        sqlx::query_as::<_, Link>("SELECT * FROM links WHERE id = $1 AND user_id = $2")
            .bind(id)
            .bind(owner)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to find link", e))
    }

    async fn create(&self, data: &CreateLink) -> AppResult<Link> {
        sqlx::query_as::<_, Link>(
            "INSERT INTO links (user_id, url, title, source, category, tags, description, \
                                visibility, group_id) \
             VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9) \
             RETURNING *",
        )
        .bind(data.user_id)
        .bind(&data.url)
        .bind(&data.title)
        .bind(&data.source)
        .bind(&data.category)
        .bind(&data.tags)
        .bind(&data.description)
        .bind(data.visibility)
        .bind(data.group_id)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to create link", e))
    }

    async fn update_owned(
        &self,
        id: LinkId,
        owner: UserId,
        data: &UpdateLink,
    ) -> AppResult<Option<Link>> {
        sqlx::query_as::<_, Link>(
            "UPDATE links SET url = COALESCE($3, url), \
                              title = $4, \
                              source = COALESCE($5, source), \
                              category = COALESCE($6, category), \
                              tags = $7, \
                              description = $8, \
                              visibility = COALESCE($9, visibility), \
                              group_id = CASE WHEN $10 THEN $11 ELSE group_id END, \
                              updated_at = NOW() \
             WHERE id = $1 AND user_id = $2 \
             RETURNING *",
        )
        .bind(id)
        .bind(owner)
        .bind(&data.url)
        .bind(&data.title)
        .bind(&data.source)
        .bind(&data.category)
        .bind(&data.tags)
        .bind(&data.description)
        .bind(data.visibility)
        .bind(data.group_id.is_some())
        .bind(data.group_id.flatten())
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to update link", e))
    }

    async fn delete_owned(&self, id: LinkId, owner: UserId) -> AppResult<bool> {
        let result = sqlx::query("DELETE FROM links WHERE id = $1 AND user_id = $2")
            .bind(id)
            .bind(owner)
            .execute(&self.pool)
            .await
            .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to delete link", e))?;
        Ok(result.rows_affected() > 0)
    }

    async fn count_by_group(&self, group_id: GroupId) -> AppResult<i64> {
        sqlx::query_scalar::<_, i64>("SELECT COUNT(*) FROM links WHERE group_id = $1")
            .bind(group_id)
            .fetch_one(&self.pool)
            .await
            .map_err(|e| {
                AppError::with_source(ErrorKind::Database, "Failed to count group links", e)
            })
    }
}
