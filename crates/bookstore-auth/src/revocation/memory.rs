//! In-memory refresh-token store.

use std::collections::HashMap;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use tokio::sync::Mutex;

use bookstore_core::error::AppError;
use bookstore_core::result::AppResult;
use bookstore_core::traits::revocation::RefreshTokenStore;

/// State tracked per issued refresh token.
#[derive(Debug, Clone)]
struct Record {
    user_id: i64,
    expires_at: DateTime<Utc>,
    revoked_at: Option<DateTime<Utc>>,
    replaced_by: Option<String>,
}

impl Record {
    fn is_active(&self, now: DateTime<Utc>) -> bool {
        self.revoked_at.is_none() && self.expires_at > now
    }
}

/// Refresh-token store backed by a mutex-guarded map.
///
/// The single lock makes `rotate` a true critical section: checking the old
/// token, retiring it, and inserting the new one happen as one unit, so two
/// concurrent rotations of the same token cannot both succeed.
#[derive(Debug, Default)]
pub struct MemoryRefreshTokenStore {
    records: Mutex<HashMap<String, Record>>,
}

impl MemoryRefreshTokenStore {
    /// Creates an empty store.
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl RefreshTokenStore for MemoryRefreshTokenStore {
    async fn store(&self, user_id: i64, token: &str, expires_at: DateTime<Utc>) -> AppResult<()> {
        let mut records = self.records.lock().await;
        records.insert(
            token.to_string(),
            Record {
                user_id,
                expires_at,
                revoked_at: None,
                replaced_by: None,
            },
        );
        Ok(())
    }

    async fn validate(&self, token: &str) -> AppResult<Option<i64>> {
        let now = Utc::now();
        let records = self.records.lock().await;
        Ok(records
            .get(token)
            .filter(|r| r.is_active(now))
            .map(|r| r.user_id))
    }

    async fn rotate(
        &self,
        old_token: &str,
        new_token: &str,
        user_id: i64,
        expires_at: DateTime<Utc>,
    ) -> AppResult<()> {
        let now = Utc::now();
        let mut records = self.records.lock().await;

        match records.get_mut(old_token) {
            Some(record) if record.is_active(now) => {
                record.revoked_at = Some(now);
                record.replaced_by = Some(new_token.to_string());
            }
            _ => {
                return Err(AppError::conflict("Refresh token already consumed"));
            }
        }

        records.insert(
            new_token.to_string(),
            Record {
                user_id,
                expires_at,
                revoked_at: None,
                replaced_by: None,
            },
        );
        Ok(())
    }

    async fn revoke(&self, token: &str) -> AppResult<()> {
        let now = Utc::now();
        let mut records = self.records.lock().await;
        if let Some(record) = records.get_mut(token) {
            if record.revoked_at.is_none() {
                record.revoked_at = Some(now);
            }
        }
        Ok(())
    }

    async fn revoke_all(&self, user_id: i64) -> AppResult<()> {
        let now = Utc::now();
        let mut records = self.records.lock().await;
        for record in records.values_mut() {
            if record.user_id == user_id && record.revoked_at.is_none() {
                record.revoked_at = Some(now);
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use bookstore_core::error::ErrorKind;
    use chrono::Duration;
    use std::sync::Arc;

    fn far_future() -> DateTime<Utc> {
        Utc::now() + Duration::days(7)
    }

    #[tokio::test]
    async fn test_store_and_validate() {
        let store = MemoryRefreshTokenStore::new();
        store.store(1, "tok", far_future()).await.unwrap();

        assert_eq!(store.validate("tok").await.unwrap(), Some(1));
        assert_eq!(store.validate("other").await.unwrap(), None);
    }

    #[tokio::test]
    async fn test_expired_record_is_invalid() {
        let store = MemoryRefreshTokenStore::new();
        store
            .store(1, "tok", Utc::now() - Duration::minutes(1))
            .await
            .unwrap();

        assert_eq!(store.validate("tok").await.unwrap(), None);
    }

    #[tokio::test]
    async fn test_rotate_retires_old_token() {
        let store = MemoryRefreshTokenStore::new();
        store.store(1, "old", far_future()).await.unwrap();

        store.rotate("old", "new", 1, far_future()).await.unwrap();

        assert_eq!(store.validate("old").await.unwrap(), None);
        assert_eq!(store.validate("new").await.unwrap(), Some(1));
    }

    #[tokio::test]
    async fn test_rotate_of_consumed_token_fails() {
        let store = MemoryRefreshTokenStore::new();
        store.store(1, "old", far_future()).await.unwrap();
        store.rotate("old", "new", 1, far_future()).await.unwrap();

        let err = store
            .rotate("old", "new2", 1, far_future())
            .await
            .unwrap_err();
        assert_eq!(err.kind, ErrorKind::Conflict);
        assert_eq!(store.validate("new2").await.unwrap(), None);
    }

    #[tokio::test]
    async fn test_concurrent_rotate_single_winner() {
        let store = Arc::new(MemoryRefreshTokenStore::new());
        store.store(1, "old", far_future()).await.unwrap();

        let a = {
            let store = Arc::clone(&store);
            tokio::spawn(async move { store.rotate("old", "new-a", 1, far_future()).await })
        };
        let b = {
            let store = Arc::clone(&store);
            tokio::spawn(async move { store.rotate("old", "new-b", 1, far_future()).await })
        };

        let results = [a.await.unwrap(), b.await.unwrap()];
        let wins = results.iter().filter(|r| r.is_ok()).count();
        assert_eq!(wins, 1);
    }

    #[tokio::test]
    async fn test_revoke_all_for_user() {
        let store = MemoryRefreshTokenStore::new();
        store.store(1, "a", far_future()).await.unwrap();
        store.store(1, "b", far_future()).await.unwrap();
        store.store(2, "c", far_future()).await.unwrap();

        store.revoke_all(1).await.unwrap();

        assert_eq!(store.validate("a").await.unwrap(), None);
        assert_eq!(store.validate("b").await.unwrap(), None);
        assert_eq!(store.validate("c").await.unwrap(), Some(2));
    }

    #[tokio::test]
    async fn test_revoke_unknown_token_is_noop() {
        let store = MemoryRefreshTokenStore::new();
        store.revoke("missing").await.unwrap();
    }
}
