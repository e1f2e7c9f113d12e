//! Application state shared across all handlers and middleware.

use std::sync::Arc;

use bookstore_auth::audit::AuditRecorder;
use bookstore_auth::jwt::{JwtDecoder, JwtEncoder};
use bookstore_auth::password::PasswordHasher;
use bookstore_auth::rbac::PermissionEvaluator;
use bookstore_auth::revocation::TokenBlacklist;
use bookstore_auth::session::AuthService;
use bookstore_core::config::AppConfig;
use bookstore_core::traits::catalog::BookCatalog;
use bookstore_core::traits::directory::{IdentityStore, RoleStore};
use bookstore_core::traits::revocation::RefreshTokenStore;

/// Application state containing all shared dependencies.
///
/// Passed to every Axum handler via `State<AppState>`. All fields are
/// `Arc`-wrapped for cheap cloning across tasks; the store fields are trait
/// objects so deployments can back them with PostgreSQL or memory.
#[derive(Clone)]
pub struct AppState {
    /// Application configuration.
    pub config: Arc<AppConfig>,

    // ── Auth ─────────────────────────────────────────────────
    /// JWT token encoder.
    pub jwt_encoder: Arc<JwtEncoder>,
    /// JWT token decoder and validator.
    pub jwt_decoder: Arc<JwtDecoder>,
    /// Password hasher (bcrypt).
    pub password_hasher: Arc<PasswordHasher>,
    /// Access-token blacklist.
    pub blacklist: Arc<TokenBlacklist>,
    /// Permission evaluator.
    pub permissions: Arc<PermissionEvaluator>,
    /// Login/refresh/logout orchestration.
    pub auth_service: Arc<AuthService>,
    /// Audit recorder.
    pub audit: Arc<AuditRecorder>,

    // ── Stores ───────────────────────────────────────────────
    /// User account lookup.
    pub identities: Arc<dyn IdentityStore>,
    /// Role/permission lookup.
    pub roles: Arc<dyn RoleStore>,
    /// Refresh-token revocation store.
    pub refresh_tokens: Arc<dyn RefreshTokenStore>,
    /// Book catalog.
    pub books: Arc<dyn BookCatalog>,
}
