//! User model and repository operations
//!
//! Accounts go through an approval gate. The first registrant bootstraps the
//! household as `owner`/`approved`; everyone after that starts as
//! `member`/`pending` until an owner or admin approves them.
//!
//! # Stored shape
//!
//! ```json
//! {
//!   "id": "9b2f...",
//!   "name": "Alex",
//!   "email": "alex@example.com",
//!   "passwordHash": "$argon2id$v=19$...",
//!   "role": "owner",
//!   "status": "approved",
//!   "createdAt": "2024-05-01T12:00:00Z"
//! }
//! ```
//!
//! # Example
//!
//! ```
//! use familyhub_shared::models::user::{RegisterUser, User, UserRole, UserStatus};
//! use familyhub_shared::store::DocumentStore;
//!
//! # async fn example() -> Result<(), familyhub_shared::models::RepoError> {
//! let store = DocumentStore::in_memory();
//!
//! let owner = User::register(&store, RegisterUser {
//!     name: "Alex".to_string(),
//!     email: "alex@example.com".to_string(),
//!     password: "correct horse".to_string(),
//! })
//! .await?;
//!
//! assert_eq!(owner.role, UserRole::Owner);
//! assert_eq!(owner.status, UserStatus::Approved);
//! # Ok(())
//! # }
//! ```

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tracing::{info, warn};
use uuid::Uuid;

use super::{required_text, RepoError};
use crate::auth::{jwt, password};
use crate::store::DocumentStore;

/// Household role
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum UserRole {
    /// Bootstrapped first account
    Owner,

    /// Can approve and deny registrants
    Admin,

    /// Regular family member
    Member,
}

impl UserRole {
    /// Converts role to string for display
    pub fn as_str(&self) -> &'static str {
        match self {
            UserRole::Owner => "owner",
            UserRole::Admin => "admin",
            UserRole::Member => "member",
        }
    }

    /// Owners and admins may manage other accounts
    pub fn can_manage_users(&self) -> bool {
        matches!(self, UserRole::Owner | UserRole::Admin)
    }
}

impl std::fmt::Display for UserRole {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Approval state
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum UserStatus {
    /// Waiting for an owner/admin; cannot log in
    Pending,

    /// Allowed to log in
    Approved,
}

/// Stored user account
///
/// The password hash never leaves this module; use [`User::to_public`] for
/// anything sent to a client.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct User {
    /// Unique user ID (UUID v4)
    pub id: Uuid,

    /// Display name
    pub name: String,

    /// Email address, stored trimmed and lowercased
    pub email: String,

    /// Argon2id PHC string
    pub password_hash: String,

    /// Household role
    pub role: UserRole,

    /// Approval state
    pub status: UserStatus,

    /// When the account was registered
    pub created_at: DateTime<Utc>,
}

/// Client-facing view of a user
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PublicUser {
    pub id: Uuid,
    pub name: String,
    pub email: String,
    pub role: UserRole,
    pub status: UserStatus,
    pub created_at: DateTime<Utc>,
}

/// Input for registering a new account
///
/// The raw password is hashed before anything is stored.
#[derive(Debug, Clone)]
pub struct RegisterUser {
    pub name: String,
    pub email: String,
    pub password: String,
}

/// Result of a successful login
#[derive(Debug, Clone, Serialize)]
pub struct Authenticated {
    /// Signed bearer credential
    pub token: String,

    /// The logged-in user
    pub user: PublicUser,
}

fn normalize_email(email: &str) -> String {
    email.trim().to_lowercase()
}

impl User {
    /// Returns the client-facing view
    pub fn to_public(&self) -> PublicUser {
        PublicUser {
            id: self.id,
            name: self.name.clone(),
            email: self.email.clone(),
            role: self.role,
            status: self.status,
            created_at: self.created_at,
        }
    }

    /// Whether the account has passed the approval gate
    pub fn is_approved(&self) -> bool {
        self.status == UserStatus::Approved
    }

    /// Registers a new account
    ///
    /// The new user becomes `owner`/`approved` when no approved owner or
    /// admin exists yet, otherwise `member`/`pending`. The role decision and
    /// the duplicate check happen under the store's writer lock, so two
    /// simultaneous first registrations cannot both become owner.
    ///
    /// # Errors
    ///
    /// - `RepoError::Validation` if name, email or password is blank
    /// - `RepoError::Conflict` if the email is already registered
    ///   (case-insensitive)
    pub async fn register(store: &DocumentStore, data: RegisterUser) -> Result<Self, RepoError> {
        let name = required_text("name", &data.name)?;
        let email = normalize_email(&required_text("email", &data.email)?);
        if data.password.is_empty() {
            return Err(RepoError::Validation("password is required".to_string()));
        }

        let password_hash = password::hash_password(&data.password)?;

        let user = store
            .mutate(|doc| {
                if doc.users.iter().any(|u| normalize_email(&u.email) == email) {
                    return Err(RepoError::Conflict("Email already registered".to_string()));
                }

                let has_approved_admin = doc
                    .users
                    .iter()
                    .any(|u| u.role.can_manage_users() && u.is_approved());

                let (role, status) = if has_approved_admin {
                    (UserRole::Member, UserStatus::Pending)
                } else {
                    (UserRole::Owner, UserStatus::Approved)
                };

                let user = User {
                    id: Uuid::new_v4(),
                    name,
                    email,
                    password_hash,
                    role,
                    status,
                    created_at: Utc::now(),
                };
                doc.users.push(user.clone());
                Ok(user)
            })
            .await?;

        info!(user_id = %user.id, role = %user.role, "User registered");
        Ok(user)
    }

    /// Verifies credentials and issues a signed bearer credential
    ///
    /// A pending account is rejected before its password is checked.
    ///
    /// # Errors
    ///
    /// - `RepoError::InvalidCredentials` for an unknown email or wrong
    ///   password (same error for both)
    /// - `RepoError::PendingApproval` if the account is not approved
    pub async fn authenticate(
        store: &DocumentStore,
        email: &str,
        password: &str,
        settings: &jwt::JwtSettings,
    ) -> Result<Authenticated, RepoError> {
        let email = normalize_email(email);

        let found = store
            .read(|doc| {
                doc.users
                    .iter()
                    .find(|u| normalize_email(&u.email) == email)
                    .cloned()
            })
            .await;

        let Some(user) = found else {
            password::verify_dummy(password);
            warn!("Login rejected: unknown email");
            return Err(RepoError::InvalidCredentials);
        };

        if !user.is_approved() {
            warn!(user_id = %user.id, "Login rejected: pending approval");
            return Err(RepoError::PendingApproval);
        }

        if !password::verify_password(password, &user.password_hash)? {
            warn!(user_id = %user.id, "Login rejected: wrong password");
            return Err(RepoError::InvalidCredentials);
        }

        let claims = jwt::Claims::for_user(&user, settings.ttl);
        let token = jwt::create_token(&claims, &settings.secret)?;

        info!(user_id = %user.id, "User logged in");
        Ok(Authenticated {
            token,
            user: user.to_public(),
        })
    }

    /// Finds a user by ID
    pub async fn find_by_id(store: &DocumentStore, id: Uuid) -> Option<Self> {
        store
            .read(|doc| doc.users.iter().find(|u| u.id == id).cloned())
            .await
    }

    /// Finds a user by email (case-insensitive)
    pub async fn find_by_email(store: &DocumentStore, email: &str) -> Option<Self> {
        let email = normalize_email(email);
        store
            .read(|doc| {
                doc.users
                    .iter()
                    .find(|u| normalize_email(&u.email) == email)
                    .cloned()
            })
            .await
    }

    /// Lists accounts awaiting approval, in registration order
    pub async fn list_pending(store: &DocumentStore) -> Vec<PublicUser> {
        store
            .read(|doc| {
                doc.users
                    .iter()
                    .filter(|u| u.status == UserStatus::Pending)
                    .map(User::to_public)
                    .collect()
            })
            .await
    }

    /// Approves an account
    ///
    /// Approving an already approved account is a no-op.
    ///
    /// # Errors
    ///
    /// Returns `RepoError::NotFound` if no user has this ID
    pub async fn approve(store: &DocumentStore, id: Uuid) -> Result<PublicUser, RepoError> {
        let user = store
            .mutate(|doc| {
                let user = doc
                    .users
                    .iter_mut()
                    .find(|u| u.id == id)
                    .ok_or_else(|| RepoError::NotFound("User not found".to_string()))?;
                user.status = UserStatus::Approved;
                Ok::<_, RepoError>(user.to_public())
            })
            .await?;

        info!(user_id = %id, "User approved");
        Ok(user)
    }

    /// Removes an account entirely
    ///
    /// Posts written by the user are kept. Credentials already issued to the
    /// user stay valid until they expire.
    ///
    /// # Errors
    ///
    /// Returns `RepoError::NotFound` if no user has this ID
    pub async fn deny(store: &DocumentStore, id: Uuid) -> Result<PublicUser, RepoError> {
        let removed = store
            .mutate(|doc| {
                let index = doc
                    .users
                    .iter()
                    .position(|u| u.id == id)
                    .ok_or_else(|| RepoError::NotFound("User not found".to_string()))?;
                Ok::<_, RepoError>(doc.users.remove(index))
            })
            .await?;

        info!(user_id = %id, "User denied and removed");
        Ok(removed.to_public())
    }
}
