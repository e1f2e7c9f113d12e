//! Book catalog models.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// A book in the catalog.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Book {
    /// Unique book identifier.
    pub id: i64,
    /// Title.
    pub title: String,
    /// Author.
    pub author: String,
    /// ISBN.
    pub isbn: String,
    /// Publication year.
    pub year: i32,
    /// Price.
    pub price: f64,
    /// When the record was created.
    pub created_at: DateTime<Utc>,
    /// When the record was last updated.
    pub updated_at: DateTime<Utc>,
}

/// Data for creating a book, or the full replacement payload for an update.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NewBook {
    /// Title.
    pub title: String,
    /// Author.
    pub author: String,
    /// ISBN.
    pub isbn: String,
    /// Publication year.
    pub year: i32,
    /// Price.
    pub price: f64,
}
