//! Audit recorder wrapping the append-only sink.

use std::sync::Arc;

use tracing::warn;

use bookstore_core::traits::audit::AuditSink;
use bookstore_core::types::audit::NewAuditEntry;

/// Records privileged actions after they succeed.
///
/// Auditing is best-effort: a failed write is logged and swallowed, never
/// surfaced to the request that triggered it.
#[derive(Clone)]
pub struct AuditRecorder {
    /// Append-only persistence.
    sink: Arc<dyn AuditSink>,
}

impl AuditRecorder {
    /// Creates a recorder over the given sink.
    pub fn new(sink: Arc<dyn AuditSink>) -> Self {
        Self { sink }
    }

    /// Appends one audit entry.
    #[allow(clippy::too_many_arguments)]
    pub async fn record(
        &self,
        user_id: i64,
        action: &str,
        resource: &str,
        resource_id: Option<String>,
        details: Option<serde_json::Value>,
        ip_address: Option<String>,
        user_agent: Option<String>,
    ) {
        let entry = NewAuditEntry {
            user_id,
            action: action.to_string(),
            resource: resource.to_string(),
            resource_id,
            details,
            ip_address,
            user_agent,
        };

        if let Err(e) = self.sink.append(&entry).await {
            warn!(
                user_id,
                action,
                resource,
                error = %e,
                "Failed to write audit entry"
            );
        }
    }
}
