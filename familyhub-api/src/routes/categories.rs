//! Category reference data

use crate::app::AppState;
use axum::{extract::State, Json};
use familyhub_shared::models::category::{Categories, Category};

/// `GET /api/categories`: category name to subcategory list
pub async fn list_categories(State(state): State<AppState>) -> Json<Categories> {
    Json(Category::all(&state.store).await)
}
