//! Error mapping shared by the handlers.

use std::fmt::Display;

use axum::http::StatusCode;
use tracing::{error, warn};

pub type ApiError = (StatusCode, String);

pub fn internal<E: Display>(e: E) -> ApiError {
    error!(error = %e, "internal error");
    (StatusCode::INTERNAL_SERVER_ERROR, e.to_string())
}

pub fn bad_request<E: Display>(e: E) -> ApiError {
    warn!(error = %e, "bad request");
    (StatusCode::BAD_REQUEST, e.to_string())
}

pub fn not_found(what: &str) -> ApiError {
    (StatusCode::NOT_FOUND, format!("{what} not found"))
}

pub const UPSTREAM_UNAVAILABLE: &str = "The AI service is unavailable, try again later";

/// Upstream detail goes to the log only.
pub fn bad_gateway<E: Display>(e: E) -> ApiError {
    error!(error = %e, "upstream failure");
    (StatusCode::BAD_GATEWAY, UPSTREAM_UNAVAILABLE.to_string())
}
