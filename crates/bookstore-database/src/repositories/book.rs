//! Book repository implementation.

use async_trait::async_trait;
use sqlx::PgPool;

use bookstore_core::error::{AppError, ErrorKind};
use bookstore_core::result::AppResult;
use bookstore_core::traits::catalog::BookCatalog;
use bookstore_core::types::book::{Book, NewBook};

/// Repository for the book catalog.
#[derive(Debug, Clone)]
pub struct BookRepository {
    pool: PgPool,
}

impl BookRepository {
    /// Create a new book repository.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl BookCatalog for BookRepository {
    async fn list(&self) -> AppResult<Vec<Book>> {
        sqlx::query_as::<_, Book>(
            "SELECT id, title, author, isbn, year, price, created_at, updated_at \
             FROM books ORDER BY id",
        )
        .fetch_all(&self.pool)
        .await
        .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to list books", e))
    }

    async fn find(&self, id: i64) -> AppResult<Option<Book>> {
        sqlx::query_as::<_, Book>(
            "SELECT id, title, author, isbn, year, price, created_at, updated_at \
             FROM books WHERE id = $1",
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to find book", e))
    }

    async fn create(&self, book: &NewBook) -> AppResult<Book> {
        sqlx::query_as::<_, Book>(
            "INSERT INTO books (title, author, isbn, year, price) \
             VALUES ($1, $2, $3, $4, $5) \
             RETURNING id, title, author, isbn, year, price, created_at, updated_at",
        )
        .bind(&book.title)
        .bind(&book.author)
        .bind(&book.isbn)
        .bind(book.year)
        .bind(book.price)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to create book", e))
    }

    async fn update(&self, id: i64, book: &NewBook) -> AppResult<Option<Book>> {
        sqlx::query_as::<_, Book>(
            "UPDATE books \
             SET title = $1, author = $2, isbn = $3, year = $4, price = $5, updated_at = NOW() \
             WHERE id = $6 \
             RETURNING id, title, author, isbn, year, price, created_at, updated_at",
        )
        .bind(&book.title)
        .bind(&book.author)
        .bind(&book.isbn)
        .bind(book.year)
        .bind(book.price)
        .bind(id)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to update book", e))
    }

    async fn delete(&self, id: i64) -> AppResult<bool> {
        let result = sqlx::query("DELETE FROM books WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await
            .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to delete book", e))?;
        Ok(result.rows_affected() > 0)
    }
}
