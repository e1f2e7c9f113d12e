//! Request DTOs with validation.

use serde::{Deserialize, Serialize};
use validator::Validate;

/// Login request body.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct LoginRequest {
    /// Username.
    #[validate(length(min = 1, message = "Username is required"))]
    pub username: String,
    /// Password.
    #[validate(length(min = 1, message = "Password is required"))]
    pub password: String,
}

/// Token refresh request body.
///
/// The field is optional because cookie-carrier deployments send the token
/// as a cookie instead.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RefreshRequest {
    /// Refresh token.
    pub refresh_token: Option<String>,
}

/// Logout request body (bearer-carrier deployments).
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct LogoutRequest {
    /// Refresh token to revoke.
    pub refresh_token: Option<String>,
}

/// Create/replace payload for a book.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct BookPayload {
    /// Title.
    #[validate(length(min = 1, message = "Title is required"))]
    pub title: String,
    /// Author.
    #[validate(length(min = 1, message = "Author is required"))]
    pub author: String,
    /// ISBN.
    #[serde(default)]
    pub isbn: String,
    /// Publication year.
    #[serde(default)]
    pub year: i32,
    /// Price.
    #[serde(default)]
    pub price: f64,
}
