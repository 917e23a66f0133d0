/**
 * Routes Module
 * API route handlers
 */
use axum::http::StatusCode;
use axum::Json;
use serde::Serialize;

use crate::engine::EngineError;

pub mod assistant;
pub mod health;
pub mod pages;
pub mod themes;
pub mod upload;

/// Shared error body for all endpoints.
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub error: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

/// Map an engine error to its HTTP response. Server-side failures get
/// logged here; the client only sees the generic message.
pub fn engine_error(err: EngineError) -> (StatusCode, Json<ErrorResponse>) {
    let status = err.status_code();
    if status.is_server_error() {
        tracing::error!("operation failed: {}", err);
    }
    (
        status,
        Json(ErrorResponse {
            error: err.to_string(),
            message: None,
        }),
    )
}
