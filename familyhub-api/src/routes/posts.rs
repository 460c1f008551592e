//! Shared post feed
//!
//! Anyone can read the feed; writing requires a credential and records the
//! caller as the author.

use crate::{app::AppState, error::ApiResult, extract::ApiJson};
use axum::{
    extract::{Query, State},
    http::StatusCode,
    Extension, Json,
};
use familyhub_shared::{
    auth::middleware::AuthContext,
    models::{
        post::{CreatePost, Post},
        ListQuery,
    },
};
use serde::Deserialize;

/// Create post request
#[derive(Debug, Deserialize)]
pub struct CreatePostRequest {
    #[serde(default)]
    pub category: Option<String>,

    #[serde(default)]
    pub subcategory: Option<String>,

    /// Post body (must not be blank)
    #[serde(default)]
    pub content: String,
}

/// `GET /api/posts?category&subcategory`, newest first
pub async fn list_posts(
    State(state): State<AppState>,
    Query(query): Query<ListQuery>,
) -> Json<Vec<Post>> {
    Json(Post::list(&state.store, &query).await)
}

/// `POST /api/posts`
///
/// # Errors
///
/// - 400 if the content is blank
pub async fn create_post(
    State(state): State<AppState>,
    Extension(auth): Extension<AuthContext>,
    ApiJson(req): ApiJson<CreatePostRequest>,
) -> ApiResult<(StatusCode, Json<Post>)> {
    let post = Post::create(
        &state.store,
        CreatePost {
            user_id: Some(auth.user_id),
            category: req.category,
            subcategory: req.subcategory,
            content: req.content,
        },
    )
    .await?;

    Ok((StatusCode::CREATED, Json(post)))
}
