//! Application API handlers
//!
//! - POST /jobs/{id}/apply - Job seeker applies to an active posting
//! - GET /applications - Employer: received; job seeker: submitted
//! - GET|PUT|PATCH|DELETE /applications/{id}

use axum::{
    extract::State,
    http::StatusCode,
    Json,
};
use chrono::{DateTime, Utc};
use jobboard_auth::AuthUser;
use jobboard_common::{Error, JsonBody, PathParam, QueryParams, Result};
use serde::{Deserialize, Serialize};
use uuid::Uuid;
use validator::Validate;

use super::Paginated;
use crate::api::middleware::JobsState;
use crate::domain::entities::{ApplicationDetail, ApplicationStatus, JobApplication};
use crate::domain::filters::ApplicationListQuery;
use crate::domain::policy::{
    can_amend_application, can_apply, can_review_application, can_view_application, Denial,
};
use crate::repository::ApplicationScope;

/// Application response DTO
#[derive(Debug, Serialize)]
pub struct ApplicationResponse {
    pub id: Uuid,
    pub job_id: Uuid,
    pub job_title: String,
    pub company_name: String,
    pub applicant_id: Uuid,
    pub applicant_name: String,
    pub cover_letter: String,
    pub resume: String,
    pub status: ApplicationStatus,
    pub applied_at: DateTime<Utc>,
    pub reviewed_at: Option<DateTime<Utc>>,
}

impl From<ApplicationDetail> for ApplicationResponse {
    fn from(d: ApplicationDetail) -> Self {
        let a = d.application;
        Self {
            id: a.id,
            job_id: a.job_id,
            job_title: d.job_title,
            company_name: d.company_name,
            applicant_id: a.applicant_id,
            applicant_name: d.applicant_name,
            cover_letter: a.cover_letter,
            resume: a.resume,
            status: a.status,
            applied_at: a.applied_at,
            reviewed_at: a.reviewed_at,
        }
    }
}

/// Request for applying to a job
#[derive(Debug, Deserialize, Validate)]
pub struct ApplyRequest {
    #[serde(default)]
    #[validate(length(min = 1, message = "This field may not be blank."))]
    pub cover_letter: String,

    #[serde(default)]
    #[validate(length(min = 1, max = 500, message = "A resume reference is required."))]
    pub resume: String,
}

/// Request for updating an application
#[derive(Debug, Default, Deserialize, Validate)]
pub struct UpdateApplicationRequest {
    pub status: Option<ApplicationStatus>,

    pub cover_letter: Option<String>,

    #[validate(length(max = 500))]
    pub resume: Option<String>,
}

impl UpdateApplicationRequest {
    fn amends_material(&self) -> bool {
        self.cover_letter.is_some() || self.resume.is_some()
    }
}

async fn load_detail(state: &JobsState, id: Uuid) -> Result<ApplicationDetail> {
    state
        .repos
        .applications
        .find_detail(id)
        .await?
        .ok_or_else(|| Error::NotFound("Application not found".to_string()))
}

/// POST /jobs/{id}/apply - Apply to a job
pub async fn apply(
    AuthUser(ctx): AuthUser,
    State(state): State<JobsState>,
    PathParam(job_id): PathParam<Uuid>,
    JsonBody(request): JsonBody<ApplyRequest>,
) -> Result<(StatusCode, Json<ApplicationResponse>)> {
    let job = state
        .repos
        .jobs
        .find(job_id)
        .await?
        .filter(|job| job.is_active)
        .ok_or_else(|| Error::NotFound("Job not found".to_string()))?;

    let already_applied = state
        .repos
        .applications
        .exists(job.id, ctx.user_id())
        .await?;
    can_apply(Some(&ctx), &job, already_applied, Utc::now().date_naive())?;
    request.validate()?;

    let application = JobApplication::new(
        job.id,
        ctx.user_id(),
        request.cover_letter,
        request.resume.trim().to_string(),
    );
    let created = state
        .repos
        .applications
        .create(&application)
        .await?
        .ok_or(Denial::AlreadyApplied)?;

    tracing::info!(
        application_id = %created.id,
        job_id = %created.job_id,
        applicant_id = %created.applicant_id,
        "Application submitted"
    );

    let detail = load_detail(&state, created.id).await?;
    Ok((StatusCode::CREATED, Json(detail.into())))
}

/// GET /applications - Applications visible to the caller, newest first
pub async fn list_applications(
    AuthUser(ctx): AuthUser,
    State(state): State<JobsState>,
    QueryParams(params): QueryParams<ApplicationListQuery>,
) -> Result<Json<Paginated<ApplicationResponse>>> {
    let scope = if ctx.is_employer() {
        ApplicationScope::Employer(ctx.user_id())
    } else {
        ApplicationScope::Applicant(ctx.user_id())
    };

    let (count, rows) = state
        .repos
        .applications
        .list(scope, params.status, params.pagination())
        .await?;

    Ok(Json(Paginated::new(count, rows)))
}

/// GET /applications/{id}
pub async fn get_application(
    AuthUser(ctx): AuthUser,
    State(state): State<JobsState>,
    PathParam(id): PathParam<Uuid>,
) -> Result<Json<ApplicationResponse>> {
    let detail = load_detail(&state, id).await?;
    can_view_application(&ctx, &detail)?;

    Ok(Json(detail.into()))
}

/// PUT|PATCH /applications/{id} - Employer review or applicant amendment
pub async fn update_application(
    AuthUser(ctx): AuthUser,
    State(state): State<JobsState>,
    PathParam(id): PathParam<Uuid>,
    JsonBody(request): JsonBody<UpdateApplicationRequest>,
) -> Result<Json<ApplicationResponse>> {
    let detail = load_detail(&state, id).await?;
    can_view_application(&ctx, &detail)?;
    if request.status.is_some() {
        can_review_application(&ctx, &detail)?;
    }
    if request.amends_material() {
        can_amend_application(&ctx, &detail)?;
    }
    request.validate()?;

    if request.status.is_none() && !request.amends_material() {
        return Ok(Json(detail.into()));
    }

    let mut application = detail.application;
    let previous = application.status;
    if let Some(status) = request.status {
        application.set_status(status)?;
    }
    application.amend(request.cover_letter, request.resume)?;

    state
        .repos
        .applications
        .update(&application)
        .await?
        .ok_or_else(|| Error::NotFound("Application not found".to_string()))?;

    if request.status.is_some() {
        tracing::info!(
            application_id = %application.id,
            from = %previous,
            to = %application.status,
            "Application reviewed"
        );
    }

    let detail = load_detail(&state, application.id).await?;
    Ok(Json(detail.into()))
}

/// DELETE /applications/{id} - Withdraw or discard an application
pub async fn delete_application(
    AuthUser(ctx): AuthUser,
    State(state): State<JobsState>,
    PathParam(id): PathParam<Uuid>,
) -> Result<StatusCode> {
    let detail = load_detail(&state, id).await?;
    can_view_application(&ctx, &detail)?;

    if !state.repos.applications.delete(id).await? {
        return Err(Error::NotFound("Application not found".to_string()));
    }

    tracing::info!(application_id = %id, deleted_by = %ctx.user_id(), "Application deleted");

    Ok(StatusCode::NO_CONTENT)
}
