//! In-memory access-token blacklist.

use std::collections::HashMap;

use chrono::{DateTime, Utc};
use tokio::sync::RwLock;

/// Set of access tokens invalidated before their natural expiry.
///
/// Reads (`is_revoked`) may proceed concurrently; writes take the exclusive
/// lock. Entry lifetime is bounded by the token's own expiry: entries whose
/// tokens have already expired are purged on the next write.
#[derive(Debug, Default)]
pub struct TokenBlacklist {
    /// Token string mapped to its natural expiry.
    entries: RwLock<HashMap<String, DateTime<Utc>>>,
}

impl TokenBlacklist {
    /// Creates an empty blacklist.
    pub fn new() -> Self {
        Self::default()
    }

    /// Marks a token unusable until its natural expiry.
    pub async fn revoke(&self, token: &str, expires_at: DateTime<Utc>) {
        let now = Utc::now();
        let mut entries = self.entries.write().await;
        entries.retain(|_, exp| *exp > now);
        entries.insert(token.to_string(), expires_at);
    }

    /// Whether the token has been revoked.
    pub async fn is_revoked(&self, token: &str) -> bool {
        self.entries.read().await.contains_key(token)
    }

    /// Number of tracked entries.
    pub async fn len(&self) -> usize {
        self.entries.read().await.len()
    }

    /// Whether the blacklist is empty.
    pub async fn is_empty(&self) -> bool {
        self.entries.read().await.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Duration;

    #[tokio::test]
    async fn test_revoke_and_check() {
        let blacklist = TokenBlacklist::new();
        assert!(blacklist.is_empty().await);
        assert!(!blacklist.is_revoked("token-a").await);

        blacklist
            .revoke("token-a", Utc::now() + Duration::minutes(15))
            .await;
        assert!(blacklist.is_revoked("token-a").await);
        assert!(!blacklist.is_revoked("token-b").await);
    }

    #[tokio::test]
    async fn test_expired_entries_purged_on_write() {
        let blacklist = TokenBlacklist::new();
        blacklist
            .revoke("stale", Utc::now() - Duration::minutes(1))
            .await;
        blacklist
            .revoke("fresh", Utc::now() + Duration::minutes(15))
            .await;

        assert_eq!(blacklist.len().await, 1);
        assert!(blacklist.is_revoked("fresh").await);
        assert!(!blacklist.is_revoked("stale").await);
    }
}
