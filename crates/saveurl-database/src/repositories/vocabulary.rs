//! Custom category and source repository implementation.

use async_trait::async_trait;
use sqlx::PgPool;

use saveurl_core::error::{AppError, ErrorKind};
use saveurl_core::result::AppResult;
use saveurl_core::types::UserId;
use saveurl_entity::vocabulary::{CustomEntry, VocabularyKind};

use crate::store::VocabularyStore;

/// Repository for per-user vocabulary additions.
#[derive(Debug, Clone)]
pub struct VocabularyRepository {
    pool: PgPool,
}

impl VocabularyRepository {
    /// Create a new vocabulary repository.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

fn table(kind: VocabularyKind) -> &'static str {
    match kind {
        VocabularyKind::Category => "custom_categories",
        VocabularyKind::Source => "custom_sources",
    }
}

#[async_trait]
impl VocabularyStore for VocabularyRepository {
    async fn list_custom(
        &self,
        user_id: UserId,
        kind: VocabularyKind,
    ) -> AppResult<Vec<CustomEntry>> {
        sqlx::query_as::<_, CustomEntry>(&format!(
            "SELECT * FROM {} WHERE user_id = $1 ORDER BY created_at ASC, id ASC",
            table(kind)
        ))
        .bind(user_id)
        .fetch_all(&self.pool)
        .await
        .map_err(|e| {
            AppError::with_source(
                ErrorKind::Database,
                format!("Failed to list custom {}", kind.plural()),
                e,
            )
        })
    }

    async fn insert_custom(
        &self,
        user_id: UserId,
        kind: VocabularyKind,
        name: &str,
    ) -> AppResult<Option<CustomEntry>> {
        sqlx::query_as::<_, CustomEntry>(&format!(
            "INSERT INTO {} (user_id, name) VALUES ($1, LOWER($2)) \
             ON CONFLICT (user_id, name) DO NOTHING \
             RETURNING *",
            table(kind)
        ))
        .bind(user_id)
        .bind(name)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| {
            AppError::with_source(
                ErrorKind::Database,
                format!("Failed to add custom {}", kind.singular()),
                e,
            )
        })
    }
}
