//! Permission evaluation over the role/permission graph.

use std::sync::Arc;

use tracing::warn;

use bookstore_core::traits::directory::RoleStore;

/// Answers whether a user holds a named permission.
///
/// Every check re-derives from the role store (user → role → permission
/// join); there is no caching. Absence of any matching grant means denied:
/// an unknown user or a user with no roles is `false`, never an error, and a
/// failing lookup is logged and treated as denied.
#[derive(Clone)]
pub struct PermissionEvaluator {
    /// Role/permission lookup.
    roles: Arc<dyn RoleStore>,
}

impl PermissionEvaluator {
    /// Creates a new evaluator over the given role store.
    pub fn new(roles: Arc<dyn RoleStore>) -> Self {
        Self { roles }
    }

    /// Whether the user holds the named permission.
    pub async fn has_permission(&self, user_id: i64, permission: &str) -> bool {
        match self.roles.user_has_permission(user_id, permission).await {
            Ok(granted) => granted,
            Err(e) => {
                warn!(
                    user_id,
                    permission,
                    error = %e,
                    "Permission check failed; denying"
                );
                false
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use bookstore_core::error::AppError;
    use bookstore_core::result::AppResult;

    /// Grants `books:read` to user 1 and nothing to anyone else.
    struct ReadOnlyStore;

    #[async_trait]
    impl RoleStore for ReadOnlyStore {
        async fn roles_for_user(&self, user_id: i64) -> AppResult<Vec<String>> {
            if user_id == 1 {
                Ok(vec!["member".to_string()])
            } else {
                Ok(Vec::new())
            }
        }

        async fn user_has_permission(&self, user_id: i64, permission: &str) -> AppResult<bool> {
            Ok(user_id == 1 && permission == "books:read")
        }
    }

    /// Always fails, as a broken database would.
    struct FailingStore;

    #[async_trait]
    impl RoleStore for FailingStore {
        async fn roles_for_user(&self, _user_id: i64) -> AppResult<Vec<String>> {
            Err(AppError::database("connection refused"))
        }

        async fn user_has_permission(&self, _user_id: i64, _permission: &str) -> AppResult<bool> {
            Err(AppError::database("connection refused"))
        }
    }

    #[tokio::test]
    async fn test_grant_and_denial() {
        let evaluator = PermissionEvaluator::new(Arc::new(ReadOnlyStore));
        assert!(evaluator.has_permission(1, "books:read").await);
        assert!(!evaluator.has_permission(1, "books:delete").await);
    }

    #[tokio::test]
    async fn test_unknown_user_is_denied() {
        let evaluator = PermissionEvaluator::new(Arc::new(ReadOnlyStore));
        assert!(!evaluator.has_permission(99, "books:read").await);
    }

    #[tokio::test]
    async fn test_store_failure_is_denied() {
        let evaluator = PermissionEvaluator::new(Arc::new(FailingStore));
        assert!(!evaluator.has_permission(1, "books:read").await);
    }
}
