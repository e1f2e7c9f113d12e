//! Authentication middleware.
//!
//! Runs on every protected route: extracts the access token from the
//! configured carrier, validates it, checks the blacklist, and attaches the
//! resulting [`Identity`] to the request extensions. On any failure the
//! chain short-circuits with a 401 and no identity is attached.

use axum::extract::{Request, State};
use axum::http::HeaderMap;
use axum::middleware::Next;
use axum::response::Response;
use tracing::debug;

use bookstore_core::config::auth::{AuthConfig, TokenCarrier};
use bookstore_core::error::AppError;
use bookstore_core::types::identity::Identity;

use crate::error::ApiError;
use crate::state::AppState;

/// Validates the access token and attaches the identity to the request.
pub async fn authenticate(
    State(state): State<AppState>,
    mut request: Request,
    next: Next,
) -> Result<Response, ApiError> {
    let token = extract_access_token(&state.config.auth, request.headers())
        .ok_or_else(|| AppError::unauthorized("access token required"))?;

    // All decode failures collapse to one generic message so the response
    // cannot be used as an oracle for which check failed.
    let claims = state.jwt_decoder.decode_access(&token).map_err(|e| {
        debug!(error = %e, "Access token rejected");
        AppError::unauthorized("invalid or expired token")
    })?;

    if state.blacklist.is_revoked(&token).await {
        return Err(AppError::unauthorized("token revoked").into());
    }

    let identity = Identity {
        user_id: claims.user_id,
        username: claims.username,
        roles: claims.roles,
    };
    request.extensions_mut().insert(identity);

    Ok(next.run(request).await)
}

/// Pulls the access token from the deployment's configured carrier.
pub fn extract_access_token(config: &AuthConfig, headers: &HeaderMap) -> Option<String> {
    match config.token_carrier {
        TokenCarrier::Bearer => headers
            .get("authorization")
            .and_then(|v| v.to_str().ok())
            .and_then(|v| v.strip_prefix("Bearer "))
            .map(String::from),
        TokenCarrier::Cookie => cookie_value(headers, "access_token"),
    }
}

/// Reads a named cookie from the `Cookie` header.
pub fn cookie_value(headers: &HeaderMap, name: &str) -> Option<String> {
    let raw = headers.get("cookie")?.to_str().ok()?;
    raw.split(';').find_map(|pair| {
        let (key, value) = pair.trim().split_once('=')?;
        if key == name {
            Some(value.to_string())
        } else {
            None
        }
    })
}
