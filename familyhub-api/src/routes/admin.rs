/// Account approval queue
///
/// Every route here sits behind the JWT layer and the owner/admin gate
/// configured in [`crate::app::build_router`].
///
/// # Endpoints
///
/// - `GET  /api/admin/pending-users`
/// - `POST /api/admin/users/:id/approve`
/// - `POST /api/admin/users/:id/deny`

use crate::{app::AppState, error::ApiResult, routes::parse_id};
use axum::{
    extract::{Path, State},
    Json,
};
use familyhub_shared::models::user::{PublicUser, User, UserStatus};
use serde::Serialize;
use uuid::Uuid;

/// Approve response
#[derive(Debug, Serialize)]
pub struct ApproveResponse {
    pub id: Uuid,
    pub status: UserStatus,
}

/// Deny response
#[derive(Debug, Serialize)]
pub struct DenyResponse {
    pub id: Uuid,
    pub removed: bool,
}

/// Lists accounts awaiting approval, in registration order
pub async fn list_pending_users(State(state): State<AppState>) -> Json<Vec<PublicUser>> {
    Json(User::list_pending(&state.store).await)
}

/// Approves an account (idempotent)
///
/// # Errors
///
/// - 404 if no user has this id
pub async fn approve_user(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> ApiResult<Json<ApproveResponse>> {
    let id = parse_id(&id, "User")?;
    let user = User::approve(&state.store, id).await?;

    Ok(Json(ApproveResponse {
        id: user.id,
        status: user.status,
    }))
}

/// Denies an account, removing it
///
/// # Errors
///
/// - 404 if no user has this id
pub async fn deny_user(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> ApiResult<Json<DenyResponse>> {
    let id = parse_id(&id, "User")?;
    let user = User::deny(&state.store, id).await?;

    Ok(Json(DenyResponse {
        id: user.id,
        removed: true,
    }))
}
