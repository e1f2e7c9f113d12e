//! Refresh-token revocation store trait.

use async_trait::async_trait;
use chrono::{DateTime, Utc};

use crate::result::AppResult;

/// Server-side tracking of issued refresh tokens.
///
/// Two implementations are provided, both safe under concurrent requests for
/// the same user:
/// - PostgreSQL-backed (`RefreshTokenRepository`), where rotation is a single
///   conditional UPDATE
/// - In-memory (`MemoryRefreshTokenStore`), using `tokio::sync::Mutex` so
///   the rotate check-mark-insert happens in one critical section
///
/// In both, exactly one of two concurrent `rotate` calls on the same old
/// token may succeed; the loser observes the token as already consumed.
#[async_trait]
pub trait RefreshTokenStore: Send + Sync + 'static {
    /// Persist a newly issued refresh token.
    async fn store(&self, user_id: i64, token: &str, expires_at: DateTime<Utc>) -> AppResult<()>;

    /// Check whether the token is usable. Returns the owning user ID, or
    /// `None` if the token is absent, revoked, or past expiry.
    async fn validate(&self, token: &str) -> AppResult<Option<i64>>;

    /// Atomically retire `old_token` (marking it replaced by `new_token`)
    /// and store `new_token`.
    ///
    /// Fails with `ErrorKind::Conflict` if `old_token` was already consumed —
    /// reuse of a retired refresh token is a replay signal.
    async fn rotate(
        &self,
        old_token: &str,
        new_token: &str,
        user_id: i64,
        expires_at: DateTime<Utc>,
    ) -> AppResult<()>;

    /// Revoke a single token. Revoking an unknown token is not an error.
    async fn revoke(&self, token: &str) -> AppResult<()>;

    /// Revoke every live token belonging to the user (logout).
    async fn revoke_all(&self, user_id: i64) -> AppResult<()>;
}
