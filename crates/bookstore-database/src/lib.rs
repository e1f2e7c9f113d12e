//! # bookstore-database
//!
//! PostgreSQL connection management, embedded migrations, and repository
//! implementations of the `bookstore-core` collaborator traits.

pub mod connection;
pub mod migration;
pub mod repositories;
