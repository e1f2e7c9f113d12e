//! Audit persistence trait.

use async_trait::async_trait;

use crate::result::AppResult;
use crate::types::audit::NewAuditEntry;

/// Append-only sink for audit log entries.
///
/// Entries are immutable once appended. Callers treat failures as
/// best-effort; the `AuditRecorder` wrapper swallows and logs them.
#[async_trait]
pub trait AuditSink: Send + Sync + 'static {
    /// Append one entry.
    async fn append(&self, entry: &NewAuditEntry) -> AppResult<()>;
}
