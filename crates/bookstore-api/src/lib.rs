//! # bookstore-api
//!
//! HTTP layer for the bookstore API: application state, router, error
//! mapping, request/response DTOs, authentication and permission
//! middleware, and handlers.

pub mod dto;
pub mod error;
pub mod extractors;
pub mod handlers;
pub mod middleware;
pub mod router;
pub mod state;

pub use error::ApiError;
pub use state::AppState;
