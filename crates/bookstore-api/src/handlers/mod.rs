//! HTTP handlers.

pub mod auth;
pub mod book;
pub mod health;

use axum::http::HeaderMap;

/// Client address and agent for audit entries.
///
/// The IP comes from `X-Forwarded-For` (first hop) since the service is
/// expected to sit behind a reverse proxy.
pub(crate) fn client_meta(headers: &HeaderMap) -> (Option<String>, Option<String>) {
    let ip = headers
        .get("x-forwarded-for")
        .and_then(|v| v.to_str().ok())
        .and_then(|v| v.split(',').next())
        .map(|v| v.trim().to_string());

    let user_agent = headers
        .get("user-agent")
        .and_then(|v| v.to_str().ok())
        .map(String::from);

    (ip, user_agent)
}
