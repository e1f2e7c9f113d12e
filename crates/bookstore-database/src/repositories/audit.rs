//! Audit log repository implementation.

use async_trait::async_trait;
use sqlx::PgPool;

use bookstore_core::error::{AppError, ErrorKind};
use bookstore_core::result::AppResult;
use bookstore_core::traits::audit::AuditSink;
use bookstore_core::types::audit::NewAuditEntry;

/// Repository for audit log entries. Entries are append-only; there is no
/// read, update, or delete path.
#[derive(Debug, Clone)]
pub struct AuditLogRepository {
    pool: PgPool,
}

impl AuditLogRepository {
    /// Create a new audit log repository.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl AuditSink for AuditLogRepository {
    async fn append(&self, entry: &NewAuditEntry) -> AppResult<()> {
        sqlx::query(
            "INSERT INTO audit_logs \
             (user_id, action, resource, resource_id, details, ip_address, user_agent) \
             VALUES ($1, $2, $3, $4, $5, $6, $7)",
        )
        .bind(entry.user_id)
        .bind(&entry.action)
        .bind(&entry.resource)
        .bind(&entry.resource_id)
        .bind(&entry.details)
        .bind(&entry.ip_address)
        .bind(&entry.user_agent)
        .execute(&self.pool)
        .await
        .map_err(|e| {
            AppError::with_source(ErrorKind::Database, "Failed to create audit entry", e)
        })?;
        Ok(())
    }
}
