//! Refresh-token repository implementation.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::PgPool;

use bookstore_core::error::{AppError, ErrorKind};
use bookstore_core::result::AppResult;
use bookstore_core::traits::revocation::RefreshTokenStore;
use bookstore_core::types::token::RefreshTokenRecord;

/// PostgreSQL-backed refresh-token store.
///
/// Rotation relies on a conditional UPDATE: `WHERE token = $old AND
/// revoked_at IS NULL` succeeds for exactly one of any number of concurrent
/// rotations of the same token, so the check-and-retire step needs no
/// application-level lock.
#[derive(Debug, Clone)]
pub struct RefreshTokenRepository {
    pool: PgPool,
}

impl RefreshTokenRepository {
    /// Create a new refresh-token repository.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Find the record for a token string.
    pub async fn find_by_token(&self, token: &str) -> AppResult<Option<RefreshTokenRecord>> {
        sqlx::query_as::<_, RefreshTokenRecord>(
            "SELECT id, user_id, token, expires_at, revoked_at, replaced_by, created_at \
             FROM refresh_tokens WHERE token = $1",
        )
        .bind(token)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| {
            AppError::with_source(ErrorKind::Database, "Failed to find refresh token", e)
        })
    }
}

#[async_trait]
impl RefreshTokenStore for RefreshTokenRepository {
    async fn store(&self, user_id: i64, token: &str, expires_at: DateTime<Utc>) -> AppResult<()> {
        sqlx::query("INSERT INTO refresh_tokens (user_id, token, expires_at) VALUES ($1, $2, $3)")
            .bind(user_id)
            .bind(token)
            .bind(expires_at)
            .execute(&self.pool)
            .await
            .map_err(|e| {
                AppError::with_source(ErrorKind::Database, "Failed to store refresh token", e)
            })?;
        Ok(())
    }

    async fn validate(&self, token: &str) -> AppResult<Option<i64>> {
        let record = self.find_by_token(token).await?;
        Ok(record
            .filter(|r| r.is_active(Utc::now()))
            .map(|r| r.user_id))
    }

    async fn rotate(
        &self,
        old_token: &str,
        new_token: &str,
        user_id: i64,
        expires_at: DateTime<Utc>,
    ) -> AppResult<()> {
        let result = sqlx::query(
            "UPDATE refresh_tokens \
             SET revoked_at = NOW(), replaced_by = $1 \
             WHERE token = $2 AND revoked_at IS NULL AND expires_at > NOW()",
        )
        .bind(new_token)
        .bind(old_token)
        .execute(&self.pool)
        .await
        .map_err(|e| {
            AppError::with_source(ErrorKind::Database, "Failed to rotate refresh token", e)
        })?;

        if result.rows_affected() == 0 {
            return Err(AppError::conflict("Refresh token already consumed"));
        }

        self.store(user_id, new_token, expires_at).await
    }

    async fn revoke(&self, token: &str) -> AppResult<()> {
        sqlx::query(
            "UPDATE refresh_tokens SET revoked_at = NOW() \
             WHERE token = $1 AND revoked_at IS NULL",
        )
        .bind(token)
        .execute(&self.pool)
        .await
        .map_err(|e| {
            AppError::with_source(ErrorKind::Database, "Failed to revoke refresh token", e)
        })?;
        Ok(())
    }

    async fn revoke_all(&self, user_id: i64) -> AppResult<()> {
        sqlx::query(
            "UPDATE refresh_tokens SET revoked_at = NOW() \
             WHERE user_id = $1 AND revoked_at IS NULL",
        )
        .bind(user_id)
        .execute(&self.pool)
        .await
        .map_err(|e| {
            AppError::with_source(ErrorKind::Database, "Failed to revoke user tokens", e)
        })?;
        Ok(())
    }
}
