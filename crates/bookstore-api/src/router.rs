//! Route definitions for the bookstore HTTP API.
//!
//! Auth endpoints live at `/auth/*`; the protected book surface is nested
//! under `/api/v1` behind the authentication middleware, with each route
//! guarded by its required permission.

use axum::{
    Router,
    middleware as axum_middleware,
    routing::{delete, get, post, put},
};
use tower_http::trace::TraceLayer;

use crate::handlers;
use crate::middleware::{auth, rbac};
use crate::state::AppState;

/// Build the complete Axum router with all routes and middleware.
pub fn build_router(state: AppState) -> Router {
    Router::new()
        .merge(auth_routes(state.clone()))
        .nest("/api/v1", protected_routes(state.clone()))
        .route("/health", get(handlers::health::health_check))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// Auth endpoints: login, refresh, logout, me.
fn auth_routes(state: AppState) -> Router<AppState> {
    Router::new()
        .route("/auth/login", post(handlers::auth::login))
        .route("/auth/refresh", post(handlers::auth::refresh))
        .route("/auth/logout", post(handlers::auth::logout))
        .route(
            "/auth/me",
            get(handlers::auth::me).layer(axum_middleware::from_fn_with_state(
                state,
                auth::authenticate,
            )),
        )
}

/// Book CRUD, grouped by required permission and wrapped in the
/// authentication middleware.
fn protected_routes(state: AppState) -> Router<AppState> {
    let read = Router::new()
        .route("/books", get(handlers::book::list_books))
        .route("/books/{id}", get(handlers::book::get_book))
        .route_layer(axum_middleware::from_fn_with_state(
            (state.clone(), "books:read"),
            rbac::require_permission,
        ));

    let create = Router::new()
        .route("/books", post(handlers::book::create_book))
        .route_layer(axum_middleware::from_fn_with_state(
            (state.clone(), "books:create"),
            rbac::require_permission,
        ));

    let update = Router::new()
        .route("/books/{id}", put(handlers::book::update_book))
        .route_layer(axum_middleware::from_fn_with_state(
            (state.clone(), "books:update"),
            rbac::require_permission,
        ));

    let remove = Router::new()
        .route("/books/{id}", delete(handlers::book::delete_book))
        .route_layer(axum_middleware::from_fn_with_state(
            (state.clone(), "books:delete"),
            rbac::require_permission,
        ));

    read.merge(create)
        .merge(update)
        .merge(remove)
        .route_layer(axum_middleware::from_fn_with_state(
            state,
            auth::authenticate,
        ))
}
