//! JWT token creation with configurable signing and TTL.

use chrono::{DateTime, Duration, Utc};
use jsonwebtoken::{EncodingKey, Header, encode};

use bookstore_core::config::auth::AuthConfig;
use bookstore_core::error::AppError;

use super::claims::{Claims, TokenType};

/// Creates signed access and refresh tokens.
#[derive(Clone)]
pub struct JwtEncoder {
    /// HMAC secret key for signing.
    encoding_key: EncodingKey,
    /// Issuer claim value.
    issuer: String,
    /// Access token TTL in minutes.
    access_ttl_minutes: i64,
    /// Refresh token TTL in days.
    refresh_ttl_days: i64,
}

/// Result of a successful token pair generation.
#[derive(Debug, Clone, serde::Serialize, serde::Deserialize)]
pub struct TokenPair {
    /// Short-lived access token.
    pub access_token: String,
    /// Long-lived refresh token.
    pub refresh_token: String,
    /// Access token expiration timestamp.
    pub access_expires_at: DateTime<Utc>,
    /// Refresh token expiration timestamp.
    pub refresh_expires_at: DateTime<Utc>,
}

impl std::fmt::Debug for JwtEncoder {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("JwtEncoder")
            .field("issuer", &self.issuer)
            .field("access_ttl_minutes", &self.access_ttl_minutes)
            .field("refresh_ttl_days", &self.refresh_ttl_days)
            .finish()
    }
}

impl JwtEncoder {
    /// Creates a new encoder from auth configuration.
    pub fn new(config: &AuthConfig) -> Self {
        Self {
            encoding_key: EncodingKey::from_secret(config.jwt_secret.as_bytes()),
            issuer: config.issuer.clone(),
            access_ttl_minutes: config.access_ttl_minutes,
            refresh_ttl_days: config.refresh_ttl_days,
        }
    }

    /// Issues an access token carrying the user's roles.
    pub fn issue_access(
        &self,
        user_id: i64,
        username: &str,
        roles: &[String],
        now: DateTime<Utc>,
    ) -> Result<(String, DateTime<Utc>), AppError> {
        let expires_at = now + Duration::minutes(self.access_ttl_minutes);
        let claims = Claims {
            user_id,
            username: username.to_string(),
            roles: roles.to_vec(),
            iat: now.timestamp(),
            exp: expires_at.timestamp(),
            iss: self.issuer.clone(),
            token_type: TokenType::Access,
        };
        let token = self.sign(&claims)?;
        Ok((token, expires_at))
    }

    /// Issues a refresh token. Roles are deliberately omitted.
    pub fn issue_refresh(
        &self,
        user_id: i64,
        username: &str,
        now: DateTime<Utc>,
    ) -> Result<(String, DateTime<Utc>), AppError> {
        let expires_at = now + Duration::days(self.refresh_ttl_days);
        let claims = Claims {
            user_id,
            username: username.to_string(),
            roles: Vec::new(),
            iat: now.timestamp(),
            exp: expires_at.timestamp(),
            iss: self.issuer.clone(),
            token_type: TokenType::Refresh,
        };
        let token = self.sign(&claims)?;
        Ok((token, expires_at))
    }

    /// Issues a new access + refresh token pair.
    pub fn issue_pair(
        &self,
        user_id: i64,
        username: &str,
        roles: &[String],
        now: DateTime<Utc>,
    ) -> Result<TokenPair, AppError> {
        let (access_token, access_expires_at) = self.issue_access(user_id, username, roles, now)?;
        let (refresh_token, refresh_expires_at) = self.issue_refresh(user_id, username, now)?;
        Ok(TokenPair {
            access_token,
            refresh_token,
            access_expires_at,
            refresh_expires_at,
        })
    }

    fn sign(&self, claims: &Claims) -> Result<String, AppError> {
        encode(&Header::default(), claims, &self.encoding_key)
            .map_err(|e| AppError::internal(format!("Failed to encode token: {e}")))
    }
}
