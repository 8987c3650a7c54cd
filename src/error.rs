//! Application error types and HTTP response mapping.
//!
//! Defines `AppError` for the surface-level failures the HTTP layer can see
//! and implements Axum's `IntoResponse` to convert them to JSON error bodies.
//! Git failures never reach this type: the lookup service absorbs them into
//! sentinel attributions or suppressed results (see `git::lookup`).
//!
//! Error mappings:
//! - `RepoNotFound` → 404
//! - `InvalidPath`, `InvalidLine` → 400
//! - `Internal` → 500

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum AppError {
    #[error("Repository not found: {0}")]
    RepoNotFound(String),

    #[error("Invalid path: {0}")]
    InvalidPath(String),

    #[error("Invalid line number: {0}")]
    InvalidLine(u32),

    #[error("Internal error: {0}")]
    Internal(String),
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, error_message) = match &self {
            AppError::RepoNotFound(path) => {
                (StatusCode::NOT_FOUND, format!("Repository not found: {}", path))
            }
            AppError::InvalidPath(path) => {
                (StatusCode::BAD_REQUEST, format!("Invalid path: {}", path))
            }
            AppError::InvalidLine(line) => {
                (StatusCode::BAD_REQUEST, format!("Invalid line number: {}", line))
            }
            AppError::Internal(msg) => (StatusCode::INTERNAL_SERVER_ERROR, msg.clone()),
        };

        let body = Json(json!({
            "error": error_message,
        }));

        (status, body).into_response()
    }
}

pub type Result<T> = std::result::Result<T, AppError>;
