//! User and role lookup traits consumed by the auth core.

use async_trait::async_trait;
use chrono::{DateTime, Utc};

use crate::result::AppResult;
use crate::types::user::User;

/// Lookup of user accounts by username or ID.
#[async_trait]
pub trait IdentityStore: Send + Sync + 'static {
    /// Find a user by login name.
    async fn find_by_username(&self, username: &str) -> AppResult<Option<User>>;

    /// Find a user by ID.
    async fn find_by_id(&self, user_id: i64) -> AppResult<Option<User>>;

    /// Record a successful login time. Best-effort; callers may ignore errors.
    async fn touch_last_login(&self, user_id: i64, at: DateTime<Utc>) -> AppResult<()>;
}

/// Role and permission lookup for a user.
///
/// Backed by the role/permission graph (`user_roles`, `role_permissions`).
/// Every check re-derives from storage; there is no caching layer.
#[async_trait]
pub trait RoleStore: Send + Sync + 'static {
    /// Return the role names assigned to the user. Unknown users yield an
    /// empty set, not an error.
    async fn roles_for_user(&self, user_id: i64) -> AppResult<Vec<String>>;

    /// Whether any of the user's roles grants the named permission.
    async fn user_has_permission(&self, user_id: i64, permission: &str) -> AppResult<bool>;
}
