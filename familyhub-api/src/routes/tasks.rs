//! Shared task list
//!
//! # Endpoints
//!
//! - `GET    /api/tasks?category&subcategory` - oldest first (public)
//! - `POST   /api/tasks` - create
//! - `PUT    /api/tasks/:id` - partial update of title and completion
//! - `DELETE /api/tasks/:id` - remove, returning the removed task

use crate::{app::AppState, error::ApiResult, extract::ApiJson, routes::parse_id};
use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    Json,
};
use familyhub_shared::models::{
    task::{CreateTask, Task, UpdateTask},
    ListQuery,
};
use serde::Deserialize;

/// Create task request
#[derive(Debug, Deserialize)]
pub struct CreateTaskRequest {
    /// Task title (must not be blank)
    #[serde(default)]
    pub title: String,

    #[serde(default)]
    pub category: Option<String>,

    #[serde(default)]
    pub subcategory: Option<String>,
}

/// Lists tasks matching the filter, oldest first
pub async fn list_tasks(
    State(state): State<AppState>,
    Query(query): Query<ListQuery>,
) -> Json<Vec<Task>> {
    Json(Task::list(&state.store, &query).await)
}

/// Creates a task
///
/// # Errors
///
/// - 400 if the title is blank
pub async fn create_task(
    State(state): State<AppState>,
    ApiJson(req): ApiJson<CreateTaskRequest>,
) -> ApiResult<(StatusCode, Json<Task>)> {
    let task = Task::create(
        &state.store,
        CreateTask {
            title: req.title,
            category: req.category,
            subcategory: req.subcategory,
        },
    )
    .await?;

    Ok((StatusCode::CREATED, Json(task)))
}

/// Applies a partial update
///
/// # Errors
///
/// - 404 if the task does not exist
/// - 400 if a provided title is blank
pub async fn update_task(
    State(state): State<AppState>,
    Path(id): Path<String>,
    ApiJson(update): ApiJson<UpdateTask>,
) -> ApiResult<Json<Task>> {
    let id = parse_id(&id, "Task")?;
    let task = Task::update(&state.store, id, update).await?;
    Ok(Json(task))
}

/// Deletes a task
///
/// # Errors
///
/// - 404 if the task does not exist
pub async fn delete_task(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> ApiResult<Json<Task>> {
    let id = parse_id(&id, "Task")?;
    let task = Task::delete(&state.store, id).await?;
    Ok(Json(task))
}
