//! HTTP handlers

pub mod health;
pub mod risk;
pub mod tokens;

use axum::http::Uri;

use crate::AppError;

/// Fallback for unknown routes
pub async fn not_found(uri: Uri) -> AppError {
    AppError::NotFound(format!("route {}", uri.path()))
}
