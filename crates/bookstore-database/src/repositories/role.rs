//! Role and permission repository implementation.

use async_trait::async_trait;
use sqlx::PgPool;

use bookstore_core::error::{AppError, ErrorKind};
use bookstore_core::result::AppResult;
use bookstore_core::traits::directory::RoleStore;

/// Repository over the role/permission graph.
#[derive(Debug, Clone)]
pub struct RoleRepository {
    pool: PgPool,
}

impl RoleRepository {
    /// Create a new role repository.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl RoleStore for RoleRepository {
    async fn roles_for_user(&self, user_id: i64) -> AppResult<Vec<String>> {
        sqlx::query_scalar::<_, String>(
            "SELECT r.name \
             FROM roles r \
             JOIN user_roles ur ON r.id = ur.role_id \
             WHERE ur.user_id = $1",
        )
        .bind(user_id)
        .fetch_all(&self.pool)
        .await
        .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to load user roles", e))
    }

    async fn user_has_permission(&self, user_id: i64, permission: &str) -> AppResult<bool> {
        let count: i64 = sqlx::query_scalar(
            "SELECT COUNT(*) \
             FROM permissions p \
             JOIN role_permissions rp ON p.id = rp.permission_id \
             JOIN user_roles ur ON rp.role_id = ur.role_id \
             WHERE ur.user_id = $1 AND p.name = $2",
        )
        .bind(user_id)
        .bind(permission)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to check permission", e))?;

        Ok(count > 0)
    }
}
