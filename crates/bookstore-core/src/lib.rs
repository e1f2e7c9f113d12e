//! # bookstore-core
//!
//! Core crate for the bookstore API. Contains the unified error system,
//! configuration schemas, domain types, and the collaborator traits
//! implemented by the storage and auth crates.
//!
//! This crate has **no** internal dependencies on other bookstore crates.

pub mod config;
pub mod error;
pub mod result;
pub mod traits;
pub mod types;

pub use error::AppError;
pub use result::AppResult;
