//! Canonical pipeline responses.
//!
//! # Design Decisions
//! - Short-circuit and not-found answers are distinguishable from faults
//! - Server errors carry a fixed body; fault detail stays in the logs

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};

pub fn not_found() -> Response {
    (StatusCode::NOT_FOUND, "Not Found").into_response()
}

pub fn unauthorized() -> Response {
    (StatusCode::UNAUTHORIZED, "Unauthorized").into_response()
}

pub fn server_error() -> Response {
    (StatusCode::INTERNAL_SERVER_ERROR, "Internal Server Error").into_response()
}

/// Rejection for a request that never made it into the pipeline.
pub fn rejected(status: StatusCode) -> Response {
    let reason = status.canonical_reason().unwrap_or("Bad Request");
    (status, reason).into_response()
}
