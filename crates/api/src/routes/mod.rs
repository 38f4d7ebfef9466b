//! HTTP route handlers.

pub mod auth;
pub mod cart;
pub mod catalog;
pub mod checkout;
pub mod health;
pub mod metrics;

use crate::error::ApiError;

/// Parses a UUID path segment, mapping failure to a 400 response.
pub(crate) fn parse_uuid(raw: &str, what: &str) -> Result<uuid::Uuid, ApiError> {
    uuid::Uuid::parse_str(raw).map_err(|e| ApiError::BadRequest(format!("Invalid {what}: {e}")))
}
