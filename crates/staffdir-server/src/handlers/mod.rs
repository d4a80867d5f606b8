//! HTTP handler modules for the directory API.
//!
//! Each sub-module implements thin handlers that parse requests, acquire the
//! directory lock, delegate to [`staffdir_directory::Directory`], and return
//! JSON responses. No business logic lives in handlers.

pub mod departments;
pub mod employees;
pub mod roles;

use crate::error::ApiError;

/// Fallback for unmatched routes.
pub async fn route_not_found() -> ApiError {
    ApiError::NotFound("Route Not found".to_string())
}

/// Parses a path id. Anything but a positive integer is a 400 naming the
/// entity, e.g. "Invalid role ID".
pub(crate) fn parse_id(raw: &str, entity: &str) -> Result<i64, ApiError> {
    match raw.trim().parse::<i64>() {
        Ok(id) if id > 0 => Ok(id),
        _ => Err(ApiError::BadRequest(format!("Invalid {} ID", entity))),
    }
}
