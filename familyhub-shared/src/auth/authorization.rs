//! Role checks on an authenticated caller
//!
//! FamilyHub has a flat model: owners and admins may manage accounts,
//! everyone who is logged in may post and edit tasks.
//!
//! ```text
//! Unauthenticated ──(valid credential)──▶ Authenticated{id, role}
//!                                           │
//!                                           └─(role ∈ {owner, admin})──▶ Admin
//! ```

use super::middleware::AuthContext;
use crate::models::user::UserRole;

/// Error type for authorization checks
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum AuthzError {
    /// Caller's role cannot do this
    #[error("Insufficient permissions: {actual} cannot {action}")]
    InsufficientRole { actual: UserRole, action: &'static str },
}

/// Requires the caller to be an owner or admin
///
/// # Errors
///
/// Returns `AuthzError::InsufficientRole` for members
pub fn require_admin(auth: &AuthContext) -> Result<(), AuthzError> {
    if !auth.is_admin() {
        return Err(AuthzError::InsufficientRole {
            actual: auth.role,
            action: "manage users",
        });
    }

    Ok(())
}
