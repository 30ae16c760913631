//! Saved job API handlers

use axum::{
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use chrono::{DateTime, Utc};
use jobboard_auth::AuthUser;
use jobboard_common::{Error, Pagination, PathParam, QueryParams, Result};
use serde::Serialize;
use serde_json::json;
use uuid::Uuid;

use super::jobs::JobResponse;
use super::Paginated;
use crate::api::middleware::JobsState;
use crate::domain::entities::{SaveToggle, SavedJobEntry};
use crate::domain::policy::can_toggle_save;
use crate::repository::transactions::toggle_saved_job_tx;

/// Saved job response DTO
#[derive(Debug, Serialize)]
pub struct SavedJobResponse {
    pub id: Uuid,
    pub job: JobResponse,
    pub saved_at: DateTime<Utc>,
    pub saved: bool,
}

impl From<SavedJobEntry> for SavedJobResponse {
    fn from(entry: SavedJobEntry) -> Self {
        Self {
            id: entry.saved_id,
            job: entry.listing.into(),
            saved_at: entry.saved_at,
            saved: true,
        }
    }
}

/// POST /jobs/{id}/save - Toggle a bookmark
pub async fn toggle_save(
    AuthUser(ctx): AuthUser,
    State(state): State<JobsState>,
    PathParam(job_id): PathParam<Uuid>,
) -> Result<Response> {
    can_toggle_save(Some(&ctx))?;

    let job = state
        .repos
        .jobs
        .find(job_id)
        .await?
        .filter(|job| job.is_active)
        .ok_or_else(|| Error::NotFound("Job not found".to_string()))?;

    let mut tx = state.repos.begin().await?;
    let toggle = toggle_saved_job_tx(&mut tx, ctx.user_id(), job.id).await?;
    tx.commit().await?;

    tracing::info!(
        user_id = %ctx.user_id(),
        job_id = %job.id,
        saved = toggle.is_saved(),
        "Saved job toggled"
    );

    match toggle {
        SaveToggle::Added(entry) => {
            Ok((StatusCode::CREATED, Json(SavedJobResponse::from(entry))).into_response())
        }
        SaveToggle::Removed => Ok((
            StatusCode::OK,
            Json(json!({
                "detail": "Job removed from saved list.",
                "saved": false
            })),
        )
            .into_response()),
    }
}

/// GET /jobs/saved - The caller's bookmarks, newest first
pub async fn list_saved_jobs(
    AuthUser(ctx): AuthUser,
    State(state): State<JobsState>,
    QueryParams(page): QueryParams<Pagination>,
) -> Result<Json<Paginated<SavedJobResponse>>> {
    let (count, entries) = state
        .repos
        .saved_jobs
        .list_for_user(ctx.user_id(), page)
        .await?;

    Ok(Json(Paginated::new(count, entries)))
}
