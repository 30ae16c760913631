//! Category API handlers (read-only)

use axum::{extract::State, Json};
use jobboard_common::{Error, PathParam, Result};
use uuid::Uuid;

use crate::api::middleware::JobsState;
use crate::domain::entities::JobCategory;

/// GET /categories
pub async fn list_categories(State(state): State<JobsState>) -> Result<Json<Vec<JobCategory>>> {
    let categories = state.repos.categories.list().await?;
    Ok(Json(categories))
}

/// GET /categories/{id}
pub async fn get_category(
    State(state): State<JobsState>,
    PathParam(id): PathParam<Uuid>,
) -> Result<Json<JobCategory>> {
    let category = state
        .repos
        .categories
        .find(id)
        .await?
        .ok_or_else(|| Error::NotFound("Category not found".to_string()))?;
    Ok(Json(category))
}
