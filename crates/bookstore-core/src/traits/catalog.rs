//! Book catalog trait — the protected resource surface.

use async_trait::async_trait;

use crate::result::AppResult;
use crate::types::book::{Book, NewBook};

/// CRUD over the book catalog.
#[async_trait]
pub trait BookCatalog: Send + Sync + 'static {
    /// List all books.
    async fn list(&self) -> AppResult<Vec<Book>>;

    /// Find a book by ID.
    async fn find(&self, id: i64) -> AppResult<Option<Book>>;

    /// Create a book.
    async fn create(&self, book: &NewBook) -> AppResult<Book>;

    /// Replace a book's fields. Returns `None` if the book does not exist.
    async fn update(&self, id: i64, book: &NewBook) -> AppResult<Option<Book>>;

    /// Delete a book. Returns `false` if the book does not exist.
    async fn delete(&self, id: i64) -> AppResult<bool>;
}
