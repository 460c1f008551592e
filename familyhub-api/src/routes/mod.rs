/// API route handlers
///
/// Handlers are organized by resource:
///
/// - `health`: Health check endpoint
/// - `auth`: Registration and login
/// - `admin`: Account approval queue (owner/admin only)
/// - `categories`: Category reference data
/// - `posts`: Shared post feed
/// - `tasks`: Shared task list
/// - `facebook`: Stubbed external feed

pub mod admin;
pub mod auth;
pub mod categories;
pub mod facebook;
pub mod health;
pub mod posts;
pub mod tasks;

use crate::error::ApiError;
use uuid::Uuid;

/// Parses a path id, treating anything that is not a UUID as absent
pub(crate) fn parse_id(raw: &str, entity: &str) -> Result<Uuid, ApiError> {
    Uuid::parse_str(raw).map_err(|_| ApiError::NotFound(format!("{} not found", entity)))
}
