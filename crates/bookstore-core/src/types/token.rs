//! Refresh token record model.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// Server-side record tracking one issued refresh token.
///
/// Lifecycle: created at login or refresh; marked revoked with
/// `replaced_by` set when consumed by a rotation; revoked without a
/// replacement at logout; dead once `expires_at` passes. A revoked record
/// must never be accepted again.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct RefreshTokenRecord {
    /// Unique record identifier.
    pub id: i64,
    /// The user this token was issued to.
    pub user_id: i64,
    /// The token string itself.
    pub token: String,
    /// Natural expiry of the token.
    pub expires_at: DateTime<Utc>,
    /// When the token was revoked or rotated, if ever.
    pub revoked_at: Option<DateTime<Utc>>,
    /// The token that replaced this one on rotation, if any.
    pub replaced_by: Option<String>,
    /// When the record was created.
    pub created_at: DateTime<Utc>,
}

impl RefreshTokenRecord {
    /// Whether this record is still usable.
    pub fn is_active(&self, now: DateTime<Utc>) -> bool {
        self.revoked_at.is_none() && self.expires_at > now
    }
}
