//! Health check handler.

use axum::Json;

use crate::dto::response::MessageResponse;

/// GET /health
pub async fn health_check() -> Json<MessageResponse> {
    Json(MessageResponse {
        message: "healthy".to_string(),
    })
}
