//! Book handlers — the protected CRUD surface.
//!
//! Authentication and permission checks run in middleware before these
//! handlers; mutations append an audit entry after they succeed.

use axum::Json;
use axum::extract::rejection::JsonRejection;
use axum::extract::{Path, State};
use axum::http::{HeaderMap, StatusCode};
use serde_json::json;
use validator::Validate;

use bookstore_core::error::AppError;
use bookstore_core::types::book::{Book, NewBook};

use crate::dto::request::BookPayload;
use crate::dto::response::MessageResponse;
use crate::error::ApiError;
use crate::extractors::AuthUser;
use crate::state::AppState;

/// GET /api/v1/books
pub async fn list_books(State(state): State<AppState>) -> Result<Json<Vec<Book>>, ApiError> {
    Ok(Json(state.books.list().await?))
}

/// GET /api/v1/books/{id}
pub async fn get_book(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> Result<Json<Book>, ApiError> {
    let book = state
        .books
        .find(id)
        .await?
        .ok_or_else(|| AppError::not_found("book not found"))?;
    Ok(Json(book))
}

/// POST /api/v1/books
pub async fn create_book(
    State(state): State<AppState>,
    auth: AuthUser,
    headers: HeaderMap,
    body: Result<Json<BookPayload>, JsonRejection>,
) -> Result<(StatusCode, Json<Book>), ApiError> {
    let req = parse_payload(body)?;
    let book = state.books.create(&to_new_book(&req)).await?;

    let (ip, user_agent) = super::client_meta(&headers);
    state
        .audit
        .record(
            auth.user_id,
            "create",
            "books",
            Some(book.id.to_string()),
            Some(json!({
                "title": &book.title,
                "author": &book.author,
                "isbn": &book.isbn,
            })),
            ip,
            user_agent,
        )
        .await;

    Ok((StatusCode::CREATED, Json(book)))
}

/// PUT /api/v1/books/{id}
pub async fn update_book(
    State(state): State<AppState>,
    auth: AuthUser,
    headers: HeaderMap,
    Path(id): Path<i64>,
    body: Result<Json<BookPayload>, JsonRejection>,
) -> Result<Json<Book>, ApiError> {
    let req = parse_payload(body)?;
    let book = state
        .books
        .update(id, &to_new_book(&req))
        .await?
        .ok_or_else(|| AppError::not_found("book not found"))?;

    let (ip, user_agent) = super::client_meta(&headers);
    state
        .audit
        .record(
            auth.user_id,
            "update",
            "books",
            Some(book.id.to_string()),
            Some(json!({
                "title": &book.title,
                "author": &book.author,
            })),
            ip,
            user_agent,
        )
        .await;

    Ok(Json(book))
}

/// DELETE /api/v1/books/{id}
pub async fn delete_book(
    State(state): State<AppState>,
    auth: AuthUser,
    headers: HeaderMap,
    Path(id): Path<i64>,
) -> Result<Json<MessageResponse>, ApiError> {
    if !state.books.delete(id).await? {
        return Err(AppError::not_found("book not found").into());
    }

    let (ip, user_agent) = super::client_meta(&headers);
    state
        .audit
        .record(
            auth.user_id,
            "delete",
            "books",
            Some(id.to_string()),
            None,
            ip,
            user_agent,
        )
        .await;

    Ok(Json(MessageResponse {
        message: "book deleted successfully".to_string(),
    }))
}

fn parse_payload(body: Result<Json<BookPayload>, JsonRejection>) -> Result<BookPayload, ApiError> {
    let Json(req) = body.map_err(|_| AppError::validation("invalid request"))?;
    req.validate()
        .map_err(|e| AppError::validation(e.to_string()))?;
    Ok(req)
}

fn to_new_book(req: &BookPayload) -> NewBook {
    NewBook {
        title: req.title.clone(),
        author: req.author.clone(),
        isbn: req.isbn.clone(),
        year: req.year,
        price: req.price,
    }
}
