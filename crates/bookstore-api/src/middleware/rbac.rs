//! Permission middleware factory.
//!
//! Attached per route with the required permission name as part of the
//! middleware state:
//!
//! ```ignore
//! get(handlers::book::list_books)
//!     .layer(middleware::from_fn_with_state(
//!         (state.clone(), "books:read"),
//!         rbac::require_permission,
//!     ))
//! ```

use axum::extract::{Request, State};
use axum::middleware::Next;
use axum::response::Response;

use bookstore_core::error::AppError;
use bookstore_core::types::identity::Identity;

use crate::error::ApiError;
use crate::state::AppState;

/// Rejects the request unless the attached identity holds the permission.
///
/// Requires the authentication middleware to have run first; a request
/// without an attached identity is a 401, a denied permission is a 403
/// echoing the required permission name.
pub async fn require_permission(
    State((state, permission)): State<(AppState, &'static str)>,
    request: Request,
    next: Next,
) -> Result<Response, ApiError> {
    let identity = request
        .extensions()
        .get::<Identity>()
        .cloned()
        .ok_or_else(|| AppError::unauthorized("unauthorized"))?;

    if !state
        .permissions
        .has_permission(identity.user_id, permission)
        .await
    {
        return Err(AppError::forbidden(format!(
            "insufficient permissions (required: {permission})"
        ))
        .into());
    }

    Ok(next.run(request).await)
}
