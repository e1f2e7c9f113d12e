//! Auth handlers — login, refresh, logout, me.

use axum::Json;
use axum::body::Bytes;
use axum::extract::State;
use axum::extract::rejection::JsonRejection;
use axum::http::{HeaderMap, header};
use axum::response::{AppendHeaders, IntoResponse, Response};
use validator::Validate;

use bookstore_core::config::auth::TokenCarrier;
use bookstore_core::error::AppError;

use crate::dto::request::{LoginRequest, LogoutRequest, RefreshRequest};
use crate::dto::response::{LoginResponse, MeResponse, MessageResponse, RefreshResponse, UserInfo};
use crate::error::ApiError;
use crate::extractors::AuthUser;
use crate::middleware::auth::{cookie_value, extract_access_token};
use crate::state::AppState;

/// POST /auth/login
pub async fn login(
    State(state): State<AppState>,
    headers: HeaderMap,
    body: Result<Json<LoginRequest>, JsonRejection>,
) -> Result<Response, ApiError> {
    let Json(req) = body.map_err(|_| AppError::validation("invalid request"))?;
    req.validate()
        .map_err(|e| AppError::validation(e.to_string()))?;

    let (ip, user_agent) = super::client_meta(&headers);
    let outcome = state
        .auth_service
        .login(&req.username, &req.password, ip, user_agent)
        .await?;

    let user = UserInfo {
        id: outcome.user.id,
        username: outcome.user.username,
        email: outcome.user.email,
        roles: outcome.roles,
    };
    let tokens = outcome.tokens;

    match state.config.auth.token_carrier {
        TokenCarrier::Bearer => Ok(Json(LoginResponse {
            access_token: Some(tokens.access_token),
            refresh_token: Some(tokens.refresh_token),
            access_expires_at: tokens.access_expires_at,
            refresh_expires_at: tokens.refresh_expires_at,
            user,
        })
        .into_response()),
        TokenCarrier::Cookie => {
            let cookies = AppendHeaders([
                (
                    header::SET_COOKIE,
                    auth_cookie(&state, "access_token", &tokens.access_token),
                ),
                (
                    header::SET_COOKIE,
                    auth_cookie(&state, "refresh_token", &tokens.refresh_token),
                ),
            ]);
            let body = LoginResponse {
                access_token: None,
                refresh_token: None,
                access_expires_at: tokens.access_expires_at,
                refresh_expires_at: tokens.refresh_expires_at,
                user,
            };
            Ok((cookies, Json(body)).into_response())
        }
    }
}

/// POST /auth/refresh
pub async fn refresh(
    State(state): State<AppState>,
    headers: HeaderMap,
    body: Bytes,
) -> Result<Response, ApiError> {
    let token = match state.config.auth.token_carrier {
        TokenCarrier::Cookie => cookie_value(&headers, "refresh_token"),
        TokenCarrier::Bearer => serde_json::from_slice::<RefreshRequest>(&body)
            .ok()
            .and_then(|req| req.refresh_token),
    }
    .ok_or_else(|| AppError::unauthorized("refresh token required"))?;

    let (ip, user_agent) = super::client_meta(&headers);
    let tokens = state.auth_service.refresh(&token, ip, user_agent).await?;

    match state.config.auth.token_carrier {
        TokenCarrier::Bearer => Ok(Json(RefreshResponse {
            access_token: Some(tokens.access_token),
            refresh_token: Some(tokens.refresh_token),
            message: "tokens refreshed successfully".to_string(),
        })
        .into_response()),
        TokenCarrier::Cookie => {
            let cookies = AppendHeaders([
                (
                    header::SET_COOKIE,
                    auth_cookie(&state, "access_token", &tokens.access_token),
                ),
                (
                    header::SET_COOKIE,
                    auth_cookie(&state, "refresh_token", &tokens.refresh_token),
                ),
            ]);
            let body = RefreshResponse {
                access_token: None,
                refresh_token: None,
                message: "tokens refreshed successfully".to_string(),
            };
            Ok((cookies, Json(body)).into_response())
        }
    }
}

/// POST /auth/logout
///
/// Best-effort: always answers 200, even for garbage tokens.
pub async fn logout(
    State(state): State<AppState>,
    headers: HeaderMap,
    body: Bytes,
) -> Response {
    let access_token = extract_access_token(&state.config.auth, &headers);
    let refresh_token = match state.config.auth.token_carrier {
        TokenCarrier::Cookie => cookie_value(&headers, "refresh_token"),
        TokenCarrier::Bearer => serde_json::from_slice::<LogoutRequest>(&body)
            .ok()
            .and_then(|req| req.refresh_token),
    };

    let (ip, user_agent) = super::client_meta(&headers);
    state
        .auth_service
        .logout(
            access_token.as_deref(),
            refresh_token.as_deref(),
            ip,
            user_agent,
        )
        .await;

    let body = Json(MessageResponse {
        message: "logged out successfully".to_string(),
    });

    match state.config.auth.token_carrier {
        TokenCarrier::Bearer => body.into_response(),
        TokenCarrier::Cookie => {
            let cookies = AppendHeaders([
                (header::SET_COOKIE, clear_cookie("access_token")),
                (header::SET_COOKIE, clear_cookie("refresh_token")),
            ]);
            (cookies, body).into_response()
        }
    }
}

/// GET /auth/me
pub async fn me(auth: AuthUser) -> Json<MeResponse> {
    Json(MeResponse {
        user_id: auth.user_id,
        username: auth.username.clone(),
        roles: auth.roles.clone(),
    })
}

/// HTTP-only cookie with a lifetime matching the token's TTL.
fn auth_cookie(state: &AppState, name: &str, value: &str) -> String {
    let max_age = match name {
        "access_token" => state.config.auth.access_ttl_minutes * 60,
        _ => state.config.auth.refresh_ttl_days * 86_400,
    };
    format!("{name}={value}; Max-Age={max_age}; Path=/; HttpOnly")
}

/// Expired cookie used to clear the pair at logout.
fn clear_cookie(name: &str) -> String {
    format!("{name}=; Max-Age=0; Path=/; HttpOnly")
}
