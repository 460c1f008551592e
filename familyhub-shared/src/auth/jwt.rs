//! Signed bearer credentials (JWT)
//!
//! Credentials are HS256-signed JWTs carrying the user's id, display name
//! and role. Verification is stateless: there is no revocation list, so a
//! credential stays valid for its whole window even if the account is denied
//! afterwards.
//!
//! # Claims
//!
//! - `sub`: User ID
//! - `name`: Display name at login time
//! - `role`: `owner` | `admin` | `member`
//! - `iss`: Always "familyhub"
//! - `iat` / `nbf` / `exp`: Unix timestamps (default window: 7 days)
//!
//! # Example
//!
//! ```
//! use familyhub_shared::auth::jwt::{create_token, validate_token, Claims};
//! use familyhub_shared::models::user::UserRole;
//! use uuid::Uuid;
//!
//! # fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let claims = Claims::new(Uuid::new_v4(), "Alex", UserRole::Owner);
//! let token = create_token(&claims, "your-secret-key")?;
//!
//! let validated = validate_token(&token, "your-secret-key")?;
//! assert_eq!(validated.role, UserRole::Owner);
//! # Ok(())
//! # }
//! ```

use chrono::{Duration, Utc};
use jsonwebtoken::{decode, encode, Algorithm, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::models::user::{User, UserRole};

/// Issuer embedded in and required of every credential
pub const ISSUER: &str = "familyhub";

/// Default credential lifetime
pub fn default_ttl() -> Duration {
    Duration::days(7)
}

/// Error type for JWT operations
#[derive(Debug, thiserror::Error)]
pub enum JwtError {
    /// Failed to create token
    #[error("Failed to create token: {0}")]
    CreateError(String),

    /// Signature, format or claim check failed
    #[error("Failed to validate token: {0}")]
    ValidationError(String),

    /// Token has expired
    #[error("Token has expired")]
    Expired,

    /// Token was issued by someone else
    #[error("Invalid issuer")]
    InvalidIssuer,
}

/// Signing secret and lifetime for issued credentials
#[derive(Debug, Clone)]
pub struct JwtSettings {
    /// HMAC secret (at least 32 bytes in production)
    pub secret: String,

    /// Validity window of issued credentials
    pub ttl: Duration,
}

impl JwtSettings {
    /// Settings with the default 7-day window
    pub fn new(secret: impl Into<String>) -> Self {
        Self {
            secret: secret.into(),
            ttl: default_ttl(),
        }
    }

    /// Overrides the validity window
    pub fn with_ttl(mut self, ttl: Duration) -> Self {
        self.ttl = ttl;
        self
    }
}

/// JWT claims structure
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Claims {
    /// Subject - User ID
    pub sub: Uuid,

    /// Display name
    pub name: String,

    /// Household role
    pub role: UserRole,

    /// Issuer - Always "familyhub"
    pub iss: String,

    /// Issued at (Unix timestamp)
    pub iat: i64,

    /// Expiration time (Unix timestamp)
    pub exp: i64,

    /// Not before (Unix timestamp)
    pub nbf: i64,
}

impl Claims {
    /// Creates claims with the default 7-day expiration
    pub fn new(user_id: Uuid, name: impl Into<String>, role: UserRole) -> Self {
        Self::with_expiration(user_id, name, role, default_ttl())
    }

    /// Creates claims with a custom expiration
    ///
    /// A negative duration yields an already expired credential (useful in
    /// tests).
    pub fn with_expiration(
        user_id: Uuid,
        name: impl Into<String>,
        role: UserRole,
        expires_in: Duration,
    ) -> Self {
        let now = Utc::now();
        let expiration = now + expires_in;

        Self {
            sub: user_id,
            name: name.into(),
            role,
            iss: ISSUER.to_string(),
            iat: now.timestamp(),
            exp: expiration.timestamp(),
            nbf: now.timestamp(),
        }
    }

    /// Creates claims for a stored user
    pub fn for_user(user: &User, expires_in: Duration) -> Self {
        Self::with_expiration(user.id, user.name.clone(), user.role, expires_in)
    }

    /// Checks if token has expired
    pub fn is_expired(&self) -> bool {
        Utc::now().timestamp() >= self.exp
    }

    /// Gets time until expiration
    pub fn time_until_expiration(&self) -> Option<Duration> {
        let now = Utc::now().timestamp();
        if self.exp > now {
            Some(Duration::seconds(self.exp - now))
        } else {
            None
        }
    }
}

/// Signs claims into a compact JWT
///
/// # Errors
///
/// Returns `JwtError::CreateError` if encoding fails
pub fn create_token(claims: &Claims, secret: &str) -> Result<String, JwtError> {
    let header = Header::new(Algorithm::HS256);
    let key = EncodingKey::from_secret(secret.as_bytes());

    encode(&header, claims, &key)
        .map_err(|e| JwtError::CreateError(format!("Token encoding failed: {}", e)))
}

/// Verifies a JWT and extracts its claims
///
/// Checks the signature, `exp`, `nbf` and that `iss` is "familyhub".
///
/// # Errors
///
/// - `JwtError::Expired` if the window has passed
/// - `JwtError::InvalidIssuer` if `iss` does not match
/// - `JwtError::ValidationError` for bad signatures, garbage input or
///   claims that do not fit the schema
pub fn validate_token(token: &str, secret: &str) -> Result<Claims, JwtError> {
    let key = DecodingKey::from_secret(secret.as_bytes());

    let mut validation = Validation::new(Algorithm::HS256);
    validation.set_issuer(&[ISSUER]);
    validation.validate_exp = true;
    validation.validate_nbf = true;
    validation.leeway = 0;

    let token_data = decode::<Claims>(token, &key, &validation).map_err(|e| match e.kind() {
        jsonwebtoken::errors::ErrorKind::ExpiredSignature => JwtError::Expired,
        jsonwebtoken::errors::ErrorKind::InvalidIssuer => JwtError::InvalidIssuer,
        _ => JwtError::ValidationError(format!("Token validation failed: {}", e)),
    })?;

    Ok(token_data.claims)
}
