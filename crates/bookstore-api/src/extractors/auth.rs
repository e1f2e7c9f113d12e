//! `AuthUser` extractor — exposes the identity attached by the
//! authentication middleware.

use axum::extract::FromRequestParts;
use axum::http::request::Parts;

use bookstore_core::error::AppError;
use bookstore_core::types::identity::Identity;

use crate::error::ApiError;

/// Extracted authenticated identity available in handlers.
#[derive(Debug, Clone)]
pub struct AuthUser(pub Identity);

impl std::ops::Deref for AuthUser {
    type Target = Identity;
    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

impl<S> FromRequestParts<S> for AuthUser
where
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        parts
            .extensions
            .get::<Identity>()
            .cloned()
            .map(AuthUser)
            .ok_or_else(|| AppError::unauthorized("unauthorized").into())
    }
}
