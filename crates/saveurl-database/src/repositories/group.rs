//! Group and membership repository implementation.

use async_trait::async_trait;
use sqlx::PgPool;

use saveurl_core::error::{AppError, ErrorKind};
use saveurl_core::result::AppResult;
use saveurl_core::types::{GroupId, MemberId, UserId};
use saveurl_entity::group::{CreateGroup, Group, GroupMember, NewMember, UpdateGroup};

use crate::store::{DUPLICATE_GROUP_NAME, DUPLICATE_MEMBER, GroupStore};

const MEMBER_COLUMNS: &str = "m.id, m.group_id, m.user_id, m.email, u.name, m.joined_at";

/// Repository for groups and group memberships.
#[derive(Debug, Clone)]
pub struct GroupRepository {
    pool: PgPool,
}

impl GroupRepository {
    /// Create a new group repository.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

fn map_group_write(e: sqlx::Error, action: &'static str) -> AppError {
    match e {
        sqlx::Error::Database(ref db_err)
            if db_err.constraint() == Some("groups_owner_id_name_key") =>
        {
            AppError::duplicate(DUPLICATE_GROUP_NAME)
        }
        _ => AppError::with_source(ErrorKind::Database, action, e),
    }
}

#[async_trait]
impl GroupStore for GroupRepository {
    async fn find_by_id(&self, id: GroupId) -> AppResult<Option<Group>> {
        sqlx::query_as::<_, Group>("SELECT * FROM groups WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to find group", e))
    }

    async fn list_for_user(&self, user_id: UserId, email: &str) -> AppResult<Vec<Group>> {
        sqlx::query_as::<_, Group>(
            "SELECT g.* FROM groups g \
             WHERE g.owner_id = $1 \
                OR EXISTS (SELECT 1 FROM group_members m \
                           WHERE m.group_id = g.id AND m.email = LOWER($2)) \
             ORDER BY g.created_at DESC, g.id DESC",
        )
        .bind(user_id)
        .bind(email)
        .fetch_all(&self.pool)
        .await
        .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to list groups", e))
    }

    async fn create(&self, data: &CreateGroup) -> AppResult<Group> {
        sqlx::query_as::<_, Group>(
            "INSERT INTO groups (owner_id, name, description) VALUES ($1, $2, $3) RETURNING *",
        )
        .bind(data.owner_id)
        .bind(&data.name)
        .bind(&data.description)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| map_group_write(e, "Failed to create group"))
    }

    async fn update(&self, id: GroupId, data: &UpdateGroup) -> AppResult<Option<Group>> {
        sqlx::query_as::<_, Group>(
            "UPDATE groups SET name = $2, description = $3, updated_at = NOW() \
             WHERE id = $1 RETURNING *",
        )
        .bind(id)
        .bind(&data.name)
        .bind(&data.description)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| map_group_write(e, "Failed to update group"))
    }

    async fn delete(&self, id: GroupId) -> AppResult<bool> {
        let result = sqlx::query("DELETE FROM groups WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await
            .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to delete group", e))?;
        Ok(result.rows_affected() > 0)
    }

    async fn list_members(&self, group_id: GroupId) -> AppResult<Vec<GroupMember>> {
        sqlx::query_as::<_, GroupMember>(&format!(
            "SELECT {MEMBER_COLUMNS} FROM group_members m \
             JOIN users u ON u.id = m.user_id \
             WHERE m.group_id = $1 \
             ORDER BY m.joined_at ASC, m.id ASC"
        ))
        .bind(group_id)
        .fetch_all(&self.pool)
        .await
        .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to list members", e))
    }

    async fn find_member(
        &self,
        group_id: GroupId,
        member_id: MemberId,
    ) -> AppResult<Option<GroupMember>> {
        sqlx::query_as::<_, GroupMember>(&format!(
            "SELECT {MEMBER_COLUMNS} FROM group_members m \
             JOIN users u ON u.id = m.user_id \
             WHERE m.id = $1 AND m.group_id = $2"
        ))
        .bind(member_id)
        .bind(group_id)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to find member", e))
    }

    async fn is_member(&self, group_id: GroupId, email: &str) -> AppResult<bool> {
        sqlx::query_scalar::<_, bool>(
            "SELECT EXISTS (SELECT 1 FROM group_members WHERE group_id = $1 AND email = LOWER($2))",
        )
        .bind(group_id)
        .bind(email)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to check membership", e))
    }

    async fn count_members(&self, group_id: GroupId) -> AppResult<i64> {
        sqlx::query_scalar::<_, i64>("SELECT COUNT(*) FROM group_members WHERE group_id = $1")
            .bind(group_id)
            .fetch_one(&self.pool)
            .await
            .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to count members", e))
    }

    async fn add_member(
        &self,
        data: &NewMember,
        capacity: i64,
    ) -> AppResult<Option<GroupMember>> {
        let db_err =
            |e: sqlx::Error| AppError::with_source(ErrorKind::Database, "Failed to add member", e);
        let mut tx = self.pool.begin().await.map_err(db_err)?;

        // Serializes concurrent adds to one group so the count below is current.
        sqlx::query("SELECT id FROM groups WHERE id = $1 FOR UPDATE")
            .bind(data.group_id)
            .fetch_optional(&mut *tx)
            .await
            .map_err(db_err)?;

        let member = sqlx::query_as::<_, GroupMember>(&format!(
            "WITH m AS ( \
                 INSERT INTO group_members (group_id, user_id, email) \
                 SELECT $1, $2, LOWER($3) \
                 WHERE (SELECT COUNT(*) FROM group_members WHERE group_id = $1) < $4 \
                 RETURNING * \
             ) \
             SELECT {MEMBER_COLUMNS} FROM m JOIN users u ON u.id = m.user_id"
        ))
        .bind(data.group_id)
        .bind(data.user_id)
        .bind(&data.email)
        .bind(capacity)
        .fetch_optional(&mut *tx)
        .await
        .map_err(|e| match e {
            sqlx::Error::Database(ref db_err)
                if db_err.constraint() == Some("group_members_group_id_email_key") =>
            {
                AppError::duplicate(DUPLICATE_MEMBER)
            }
            _ => AppError::with_source(ErrorKind::Database, "Failed to add member", e),
        })?;

        tx.commit().await.map_err(db_err)?;
        Ok(member)
    }

    async fn remove_member(&self, group_id: GroupId, member_id: MemberId) -> AppResult<bool> {
        let result = sqlx::query("DELETE FROM group_members WHERE id = $1 AND group_id = $2")
            .bind(member_id)
            .bind(group_id)
            .execute(&self.pool)
            .await
            .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to remove member", e))?;
        Ok(result.rows_affected() > 0)
    }
}
