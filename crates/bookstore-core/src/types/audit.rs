//! Audit log entry model.

use serde::{Deserialize, Serialize};

/// Data required to append an audit log entry.
///
/// Entries are immutable once appended; there is no read-back model because
/// the audit trail is write-only from the application's point of view.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NewAuditEntry {
    /// The user who performed the action.
    pub user_id: i64,
    /// The action performed (e.g. `"login"`, `"create"`, `"delete"`).
    pub action: String,
    /// The resource kind acted on (e.g. `"auth"`, `"books"`).
    pub resource: String,
    /// The target resource ID, if applicable.
    pub resource_id: Option<String>,
    /// Opaque structured payload describing what changed.
    pub details: Option<serde_json::Value>,
    /// Actor's IP address.
    pub ip_address: Option<String>,
    /// Actor's User-Agent.
    pub user_agent: Option<String>,
}
