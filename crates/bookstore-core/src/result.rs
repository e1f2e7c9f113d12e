//! Application-wide result alias.

use crate::error::AppError;

/// Result alias using [`AppError`] as the error type.
pub type AppResult<T> = Result<T, AppError>;
