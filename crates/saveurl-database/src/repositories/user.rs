//! User repository implementation.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::PgPool;
use sqlx::postgres::PgQueryResult;

use saveurl_core::error::{AppError, ErrorKind};
use saveurl_core::result::AppResult;
use saveurl_core::types::UserId;
use saveurl_entity::user::{CreateUser, User};

use crate::store::{DUPLICATE_EMAIL, UserStore};

/// Repository for user accounts.
#[derive(Debug, Clone)]
pub struct UserRepository {
    pool: PgPool,
}

impl UserRepository {
    /// Create a new user repository.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

fn expect_one(id: UserId, result: PgQueryResult) -> AppResult<()> {
    if result.rows_affected() == 0 {
        return Err(AppError::not_found(format!("User {id} not found")));
    }
    Ok(())
}

#[async_trait]
impl UserStore for UserRepository {
    async fn find_by_id(&self, id: UserId) -> AppResult<Option<User>> {
        sqlx::query_as::<_, User>("SELECT * FROM users WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to find user by id", e))
    }

    async fn find_by_email(&self, email: &str) -> AppResult<Option<User>> {
        sqlx::query_as::<_, User>("SELECT * FROM users WHERE email = LOWER($1)")
            .bind(email)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| {
                AppError::with_source(ErrorKind::Database, "Failed to find user by email", e)
            })
    }

    async fn create(&self, data: &CreateUser) -> AppResult<User> {
        sqlx::query_as::<_, User>(
            "INSERT INTO users (name, email, password_hash, verification_code, verification_code_expiry) \
             VALUES ($1, LOWER($2), $3, $4, $5) \
             RETURNING *",
        )
        .bind(&data.name)
        .bind(&data.email)
        .bind(&data.password_hash)
        .bind(&data.verification_code)
        .bind(data.verification_code_expiry)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| match e {
            sqlx::Error::Database(ref db_err) if db_err.constraint() == Some("users_email_key") => {
                AppError::conflict(DUPLICATE_EMAIL)
            }
            _ => AppError::with_source(ErrorKind::Database, "Failed to create user", e),
        })
    }

    async fn delete(&self, id: UserId) -> AppResult<bool> {
        let result = sqlx::query("DELETE FROM users WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await
            .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to delete user", e))?;
        Ok(result.rows_affected() > 0)
    }

    async fn set_verification_code(
        &self,
        id: UserId,
        code: &str,
        expiry: DateTime<Utc>,
    ) -> AppResult<()> {
        let result = sqlx::query(
            "UPDATE users SET verification_code = $2, verification_code_expiry = $3, \
                              updated_at = NOW() \
             WHERE id = $1",
        )
        .bind(id)
        .bind(code)
        .bind(expiry)
        .execute(&self.pool)
        .await
        .map_err(|e| {
            AppError::with_source(ErrorKind::Database, "Failed to store verification code", e)
        })?;
        expect_one(id, result)
    }

    async fn mark_verified(&self, id: UserId) -> AppResult<()> {
        let result = sqlx::query(
            "UPDATE users SET is_verified = TRUE, verification_code = NULL, \
                              verification_code_expiry = NULL, updated_at = NOW() \
             WHERE id = $1",
        )
        .bind(id)
        .execute(&self.pool)
        .await
        .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to verify user", e))?;
        expect_one(id, result)
    }

    async fn set_reset_code(
        &self,
        id: UserId,
        code: &str,
        expiry: DateTime<Utc>,
    ) -> AppResult<()> {
        let result = sqlx::query(
            "UPDATE users SET reset_password_code = $2, reset_password_code_expiry = $3, \
                              updated_at = NOW() \
             WHERE id = $1",
        )
        .bind(id)
        .bind(code)
        .bind(expiry)
        .execute(&self.pool)
        .await
        .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to store reset code", e))?;
        expect_one(id, result)
    }

    async fn reset_password(&self, id: UserId, password_hash: &str) -> AppResult<()> {
        let result = sqlx::query(
            "UPDATE users SET password_hash = $2, reset_password_code = NULL, \
                              reset_password_code_expiry = NULL, updated_at = NOW() \
             WHERE id = $1",
        )
        .bind(id)
        .bind(password_hash)
        .execute(&self.pool)
        .await
        .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to update password", e))?;
        expect_one(id, result)
    }
}
