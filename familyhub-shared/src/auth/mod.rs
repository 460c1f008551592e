//! Authentication and authorization utilities
//!
//! # Modules
//!
//! - [`password`]: Argon2id password hashing and verification
//! - [`jwt`]: Signed bearer credentials (HS256, 7-day window)
//! - [`middleware`]: Bearer-header extraction and the `AuthContext` extension
//! - [`authorization`]: Role checks (owner/admin gate)
//!
//! # Example
//!
//! ```
//! use familyhub_shared::auth::password::{hash_password, verify_password};
//! use familyhub_shared::auth::jwt::{create_token, validate_token, Claims};
//! use familyhub_shared::models::user::UserRole;
//! use uuid::Uuid;
//!
//! # fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let hash = hash_password("my_password")?;
//! assert!(verify_password("my_password", &hash)?);
//!
//! let claims = Claims::new(Uuid::new_v4(), "Alex", UserRole::Member);
//! let token = create_token(&claims, "secret")?;
//! let validated = validate_token(&token, "secret")?;
//! assert_eq!(validated.sub, claims.sub);
//! # Ok(())
//! # }
//! ```

pub mod authorization;
pub mod jwt;
pub mod middleware;
pub mod password;
