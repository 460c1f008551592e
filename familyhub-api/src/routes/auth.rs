/// Authentication endpoints
///
/// # Endpoints
///
/// - `POST /api/auth/register` - Create an account (first one becomes owner)
/// - `POST /api/auth/login` - Exchange email/password for a bearer credential
///
/// New accounts after the first wait in the approval queue; logging in to a
/// pending account answers 403.

use crate::{app::AppState, error::ApiResult, extract::ApiJson};
use axum::{extract::State, http::StatusCode, Json};
use familyhub_shared::models::user::{Authenticated, PublicUser, RegisterUser, User};
use serde::Deserialize;
use validator::Validate;

/// Register request
///
/// Missing fields deserialize as empty and are rejected as required.
#[derive(Debug, Deserialize, Validate)]
pub struct RegisterRequest {
    /// Display name
    #[serde(default)]
    #[validate(length(max = 100, message = "Name must be at most 100 characters"))]
    pub name: String,

    /// Email address
    #[serde(default)]
    #[validate(email(message = "Invalid email format"))]
    pub email: String,

    /// Password
    #[serde(default)]
    #[validate(length(min = 1, message = "Password is required"))]
    pub password: String,
}

/// Login request
#[derive(Debug, Deserialize, Validate)]
pub struct LoginRequest {
    /// Email address
    #[serde(default)]
    #[validate(email(message = "Invalid email format"))]
    pub email: String,

    /// Password
    #[serde(default)]
    #[validate(length(min = 1, message = "Password is required"))]
    pub password: String,
}

/// Register endpoint
///
/// # Errors
///
/// - 400 if a field is missing, blank or the email is malformed
/// - 409 if the email is already registered
pub async fn register(
    State(state): State<AppState>,
    ApiJson(req): ApiJson<RegisterRequest>,
) -> ApiResult<(StatusCode, Json<PublicUser>)> {
    req.validate()?;

    let user = User::register(
        &state.store,
        RegisterUser {
            name: req.name,
            email: req.email,
            password: req.password,
        },
    )
    .await?;

    Ok((StatusCode::CREATED, Json(user.to_public())))
}

/// Login endpoint
///
/// # Errors
///
/// - 400 if the body is malformed
/// - 401 for an unknown email or wrong password
/// - 403 if the account is still pending approval
pub async fn login(
    State(state): State<AppState>,
    ApiJson(req): ApiJson<LoginRequest>,
) -> ApiResult<Json<Authenticated>> {
    req.validate()?;

    let authenticated = User::authenticate(
        &state.store,
        &req.email,
        &req.password,
        &state.config.jwt.settings(),
    )
    .await?;

    Ok(Json(authenticated))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_register_request_validation() {
        let valid = RegisterRequest {
            name: "Alex".to_string(),
            email: "alex@example.com".to_string(),
            password: "hunter22".to_string(),
        };
        assert!(valid.validate().is_ok());

        let bad_email = RegisterRequest {
            email: "not-an-email".to_string(),
            ..valid
        };
        assert!(bad_email.validate().is_err());
    }

    #[test]
    fn test_login_request_missing_fields() {
        let req: LoginRequest = serde_json::from_str("{}").unwrap();
        let errors = req.validate().unwrap_err();
        let fields = errors.field_errors();
        assert!(fields.contains_key("email"));
        assert!(fields.contains_key("password"));
    }
}
