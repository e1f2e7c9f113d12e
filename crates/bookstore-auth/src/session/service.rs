//! Core auth flows: login, token refresh, logout.

use std::sync::Arc;

use chrono::Utc;
use serde_json::json;
use tracing::{info, warn};

use bookstore_core::error::{AppError, ErrorKind};
use bookstore_core::result::AppResult;
use bookstore_core::traits::directory::{IdentityStore, RoleStore};
use bookstore_core::traits::revocation::RefreshTokenStore;
use bookstore_core::types::user::User;

use crate::audit::AuditRecorder;
use crate::jwt::encoder::TokenPair;
use crate::jwt::{JwtDecoder, JwtEncoder};
use crate::password::PasswordHasher;
use crate::revocation::TokenBlacklist;

/// Result of a successful login.
#[derive(Debug, Clone)]
pub struct LoginOutcome {
    /// Generated token pair.
    pub tokens: TokenPair,
    /// The authenticated user.
    pub user: User,
    /// Role names derived at login time.
    pub roles: Vec<String>,
}

/// Orchestrates the complete authentication lifecycle.
#[derive(Clone)]
pub struct AuthService {
    /// User account lookup.
    users: Arc<dyn IdentityStore>,
    /// Role/permission lookup.
    roles: Arc<dyn RoleStore>,
    /// Refresh-token revocation store.
    refresh_tokens: Arc<dyn RefreshTokenStore>,
    /// Access-token blacklist.
    blacklist: Arc<TokenBlacklist>,
    /// Password hasher.
    password_hasher: Arc<PasswordHasher>,
    /// Token encoder.
    jwt_encoder: Arc<JwtEncoder>,
    /// Token decoder.
    jwt_decoder: Arc<JwtDecoder>,
    /// Audit recorder.
    audit: Arc<AuditRecorder>,
}

impl AuthService {
    /// Creates a new auth service with all required dependencies.
    #[allow(clippy::too_many_arguments)]
    pub fn new(
        users: Arc<dyn IdentityStore>,
        roles: Arc<dyn RoleStore>,
        refresh_tokens: Arc<dyn RefreshTokenStore>,
        blacklist: Arc<TokenBlacklist>,
        password_hasher: Arc<PasswordHasher>,
        jwt_encoder: Arc<JwtEncoder>,
        jwt_decoder: Arc<JwtDecoder>,
        audit: Arc<AuditRecorder>,
    ) -> Self {
        Self {
            users,
            roles,
            refresh_tokens,
            blacklist,
            password_hasher,
            jwt_encoder,
            jwt_decoder,
            audit,
        }
    }

    /// Performs the complete login flow:
    ///
    /// 1. Find the user (unknown username and wrong password produce the
    ///    same error, so usernames cannot be enumerated)
    /// 2. Check the account is active
    /// 3. Verify the password
    /// 4. Derive roles from storage
    /// 5. Issue the token pair and persist the refresh token
    /// 6. Touch last-login and audit (both best-effort)
    pub async fn login(
        &self,
        username: &str,
        password: &str,
        ip_address: Option<String>,
        user_agent: Option<String>,
    ) -> AppResult<LoginOutcome> {
        let user = self
            .users
            .find_by_username(username)
            .await?
            .ok_or_else(|| AppError::unauthorized("invalid credentials"))?;

        if !user.is_active {
            return Err(AppError::unauthorized("account is disabled"));
        }

        if !self.password_hasher.verify(password, &user.password_hash)? {
            return Err(AppError::unauthorized("invalid credentials"));
        }

        let roles = self.roles.roles_for_user(user.id).await?;

        let now = Utc::now();
        let tokens = self
            .jwt_encoder
            .issue_pair(user.id, &user.username, &roles, now)?;

        self.refresh_tokens
            .store(user.id, &tokens.refresh_token, tokens.refresh_expires_at)
            .await?;

        if let Err(e) = self.users.touch_last_login(user.id, now).await {
            warn!(user_id = user.id, error = %e, "Failed to update last login");
        }

        self.audit
            .record(
                user.id,
                "login",
                "auth",
                None,
                Some(json!({ "username": &user.username })),
                ip_address,
                user_agent,
            )
            .await;

        info!(user_id = user.id, username = %user.username, "Login successful");

        Ok(LoginOutcome { tokens, user, roles })
    }

    /// Exchanges a refresh token for a new token pair, rotating the refresh
    /// token.
    ///
    /// Roles are re-derived from storage, never trusted from the old token.
    /// Every failure surfaces as the same generic unauthorized error so the
    /// endpoint cannot be used as an oracle.
    pub async fn refresh(
        &self,
        refresh_token: &str,
        ip_address: Option<String>,
        user_agent: Option<String>,
    ) -> AppResult<TokenPair> {
        let invalid = || AppError::unauthorized("invalid or expired refresh token");

        self.jwt_decoder
            .decode_refresh(refresh_token)
            .map_err(|_| invalid())?;

        let user_id = self
            .refresh_tokens
            .validate(refresh_token)
            .await?
            .ok_or_else(invalid)?;

        // The account-disabled flag is deliberately not rechecked here; it
        // only gates login, matching the token's stateless validity window.
        let user = self
            .users
            .find_by_id(user_id)
            .await?
            .ok_or_else(invalid)?;

        let roles = self.roles.roles_for_user(user.id).await?;

        let now = Utc::now();
        let tokens = self
            .jwt_encoder
            .issue_pair(user.id, &user.username, &roles, now)?;

        match self
            .refresh_tokens
            .rotate(
                refresh_token,
                &tokens.refresh_token,
                user.id,
                tokens.refresh_expires_at,
            )
            .await
        {
            Ok(()) => {}
            Err(e) if e.kind == ErrorKind::Conflict => {
                // A consumed token coming back is a replay, possibly theft.
                warn!(
                    user_id = user.id,
                    "Refresh token replay detected; rejecting"
                );
                return Err(invalid());
            }
            Err(e) => return Err(e),
        }

        self.audit
            .record(
                user.id,
                "refresh",
                "auth",
                None,
                Some(json!({ "rotated": true })),
                ip_address,
                user_agent,
            )
            .await;

        info!(user_id = user.id, "Token refreshed");

        Ok(tokens)
    }

    /// Best-effort logout: blacklists the access token for its remaining
    /// lifetime and revokes the user's refresh tokens. Never fails.
    pub async fn logout(
        &self,
        access_token: Option<&str>,
        refresh_token: Option<&str>,
        ip_address: Option<String>,
        user_agent: Option<String>,
    ) {
        let mut user_id = None;

        if let Some(token) = access_token {
            if let Ok(claims) = self.jwt_decoder.decode_access(token) {
                self.blacklist.revoke(token, claims.expires_at()).await;
                user_id = Some(claims.user_id);
            }
        }

        if let Some(token) = refresh_token {
            if let Err(e) = self.refresh_tokens.revoke(token).await {
                warn!(error = %e, "Failed to revoke refresh token at logout");
            }
        }

        if let Some(id) = user_id {
            if let Err(e) = self.refresh_tokens.revoke_all(id).await {
                warn!(user_id = id, error = %e, "Failed to revoke user tokens at logout");
            }

            self.audit
                .record(id, "logout", "auth", None, None, ip_address, user_agent)
                .await;

            info!(user_id = id, "Logout completed");
        }
    }
}
