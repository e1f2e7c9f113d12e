//! Authentication configuration.

use serde::{Deserialize, Serialize};

/// Where the access token travels on each request.
///
/// Fixed per deployment; the middleware never negotiates the carrier per
/// request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TokenCarrier {
    /// `Authorization: Bearer <token>` header.
    Bearer,
    /// HTTP-only `access_token` / `refresh_token` cookies.
    Cookie,
}

/// Authentication and credential configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AuthConfig {
    /// Secret key for JWT signing (HMAC-SHA256).
    #[serde(default = "default_jwt_secret")]
    pub jwt_secret: String,
    /// Issuer claim embedded in every token.
    #[serde(default = "default_issuer")]
    pub issuer: String,
    /// Access token TTL in minutes.
    #[serde(default = "default_access_ttl")]
    pub access_ttl_minutes: i64,
    /// Refresh token TTL in days.
    #[serde(default = "default_refresh_ttl")]
    pub refresh_ttl_days: i64,
    /// bcrypt work factor for password hashing.
    #[serde(default = "default_bcrypt_cost")]
    pub bcrypt_cost: u32,
    /// Token carrier policy for this deployment.
    #[serde(default = "default_carrier")]
    pub token_carrier: TokenCarrier,
}

impl Default for AuthConfig {
    fn default() -> Self {
        Self {
            jwt_secret: default_jwt_secret(),
            issuer: default_issuer(),
            access_ttl_minutes: default_access_ttl(),
            refresh_ttl_days: default_refresh_ttl(),
            bcrypt_cost: default_bcrypt_cost(),
            token_carrier: default_carrier(),
        }
    }
}

fn default_jwt_secret() -> String {
    "CHANGE_ME_IN_PRODUCTION".to_string()
}

fn default_issuer() -> String {
    "bookstore-api".to_string()
}

fn default_access_ttl() -> i64 {
    15
}

fn default_refresh_ttl() -> i64 {
    7
}

fn default_bcrypt_cost() -> u32 {
    12
}

fn default_carrier() -> TokenCarrier {
    TokenCarrier::Bearer
}
