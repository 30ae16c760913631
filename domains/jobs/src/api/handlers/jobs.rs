//! Job posting API handlers

use axum::{
    extract::State,
    http::StatusCode,
    Json,
};
use chrono::{DateTime, NaiveDate, Utc};
use jobboard_auth::{AuthUser, EmployerUser, MaybeAuthUser};
use jobboard_common::{
    Error, FieldErrors, JsonBody, Pagination, PathParam, QueryParams, Result,
};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;
use validator::Validate;

use super::{double_option, Paginated};
use crate::api::middleware::JobsState;
use crate::domain::entities::{ExperienceLevel, Job, JobChanges, JobListing, JobType, NewJob};
use crate::domain::filters::{JobFilter, JobListQuery};
use crate::domain::policy::{can_manage_job, JobAction};

/// Job response DTO
#[derive(Debug, Serialize)]
pub struct JobResponse {
    pub id: Uuid,
    pub company_id: Uuid,
    pub company_name: String,
    pub category_id: Option<Uuid>,
    pub category_name: Option<String>,
    pub title: String,
    pub description: String,
    pub job_type: JobType,
    pub experience_level: ExperienceLevel,
    pub location: String,
    pub salary_min: Option<Decimal>,
    pub salary_max: Option<Decimal>,
    pub is_active: bool,
    pub application_deadline: Option<NaiveDate>,
    pub is_expired: bool,
    pub applications_count: i64,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<JobListing> for JobResponse {
    fn from(listing: JobListing) -> Self {
        let j = listing.job;
        Self {
            is_expired: j.is_expired(),
            id: j.id,
            company_id: j.company_id,
            company_name: listing.company_name,
            category_id: j.category_id,
            category_name: listing.category_name,
            title: j.title,
            description: j.description,
            job_type: j.job_type,
            experience_level: j.experience_level,
            location: j.location,
            salary_min: j.salary_min,
            salary_max: j.salary_max,
            is_active: j.is_active,
            application_deadline: j.application_deadline,
            applications_count: listing.applications_count,
            created_at: j.created_at,
            updated_at: j.updated_at,
        }
    }
}

/// Request for posting a job
#[derive(Debug, Deserialize, Validate)]
pub struct CreateJobRequest {
    #[validate(length(min = 1, max = 255))]
    pub title: String,

    #[validate(length(min = 1, message = "This field may not be blank."))]
    pub description: String,

    pub category_id: Option<Uuid>,

    pub job_type: JobType,

    pub experience_level: ExperienceLevel,

    #[validate(length(min = 1, max = 255))]
    pub location: String,

    pub salary_min: Option<Decimal>,

    pub salary_max: Option<Decimal>,

    pub application_deadline: Option<NaiveDate>,

    pub is_active: Option<bool>,
}

impl From<CreateJobRequest> for NewJob {
    fn from(req: CreateJobRequest) -> Self {
        Self {
            category_id: req.category_id,
            title: req.title,
            description: req.description,
            job_type: req.job_type,
            experience_level: req.experience_level,
            location: req.location,
            salary_min: req.salary_min,
            salary_max: req.salary_max,
            application_deadline: req.application_deadline,
            is_active: req.is_active.unwrap_or(true),
        }
    }
}

/// Request for a partial posting update. Explicit `null` clears a nullable field.
#[derive(Debug, Default, Deserialize, Validate)]
pub struct UpdateJobRequest {
    #[validate(length(min = 1, max = 255))]
    pub title: Option<String>,

    #[validate(length(min = 1, message = "This field may not be blank."))]
    pub description: Option<String>,

    #[serde(default, deserialize_with = "double_option")]
    pub category_id: Option<Option<Uuid>>,

    pub job_type: Option<JobType>,

    pub experience_level: Option<ExperienceLevel>,

    #[validate(length(min = 1, max = 255))]
    pub location: Option<String>,

    #[serde(default, deserialize_with = "double_option")]
    pub salary_min: Option<Option<Decimal>>,

    #[serde(default, deserialize_with = "double_option")]
    pub salary_max: Option<Option<Decimal>>,

    #[serde(default, deserialize_with = "double_option")]
    pub application_deadline: Option<Option<NaiveDate>>,

    pub is_active: Option<bool>,
}

impl From<UpdateJobRequest> for JobChanges {
    fn from(req: UpdateJobRequest) -> Self {
        Self {
            category_id: req.category_id,
            title: req.title,
            description: req.description,
            job_type: req.job_type,
            experience_level: req.experience_level,
            location: req.location,
            salary_min: req.salary_min,
            salary_max: req.salary_max,
            application_deadline: req.application_deadline,
            is_active: req.is_active,
        }
    }
}

async fn check_category(state: &JobsState, category_id: Option<Uuid>) -> Result<()> {
    if let Some(id) = category_id {
        if !state.repos.categories.exists(id).await? {
            return Err(Error::InvalidFields(FieldErrors::single(
                "category_id",
                format!("Invalid category \"{}\" - object does not exist.", id),
            )));
        }
    }
    Ok(())
}

async fn load_listing(state: &JobsState, id: Uuid) -> Result<JobListing> {
    state
        .repos
        .jobs
        .find_listing(id)
        .await?
        .ok_or_else(|| Error::NotFound("Job not found".to_string()))
}

/// Load a posting the actor is allowed to know about
async fn load_visible_job(state: &JobsState, id: Uuid, viewer: Option<Uuid>) -> Result<Job> {
    state
        .repos
        .jobs
        .find(id)
        .await?
        .filter(|job| job.is_visible_to(viewer))
        .ok_or_else(|| Error::NotFound("Job not found".to_string()))
}

/// GET /jobs - Filtered list of active postings
pub async fn list_jobs(
    State(state): State<JobsState>,
    QueryParams(params): QueryParams<JobListQuery>,
) -> Result<Json<Paginated<JobResponse>>> {
    can_manage_job(None, JobAction::List, None)?;

    let page = params.pagination();
    let filter = params.into_filter()?;
    let (count, listings) = state.repos.jobs.list(&filter, page).await?;

    Ok(Json(Paginated::new(count, listings)))
}

/// GET /jobs/mine - The caller's own postings, inactive included
pub async fn list_my_jobs(
    EmployerUser(ctx): EmployerUser,
    State(state): State<JobsState>,
    QueryParams(page): QueryParams<Pagination>,
) -> Result<Json<Paginated<JobResponse>>> {
    let filter = JobFilter::owned_by(ctx.user_id());
    let (count, listings) = state.repos.jobs.list(&filter, page).await?;

    Ok(Json(Paginated::new(count, listings)))
}

/// GET /jobs/{id} - Single posting with its application count
pub async fn get_job(
    MaybeAuthUser(actor): MaybeAuthUser,
    State(state): State<JobsState>,
    PathParam(id): PathParam<Uuid>,
) -> Result<Json<JobResponse>> {
    let listing = load_listing(&state, id).await?;
    if !listing.job.is_visible_to(actor.as_ref().map(|a| a.user_id())) {
        return Err(Error::NotFound("Job not found".to_string()));
    }
    can_manage_job(actor.as_ref(), JobAction::Retrieve, Some(&listing.job))?;

    Ok(Json(listing.into()))
}

/// POST /jobs - Post a job owned by the caller
pub async fn create_job(
    AuthUser(ctx): AuthUser,
    State(state): State<JobsState>,
    JsonBody(request): JsonBody<CreateJobRequest>,
) -> Result<(StatusCode, Json<JobResponse>)> {
    can_manage_job(Some(&ctx), JobAction::Create, None)?;
    request.validate()?;
    check_category(&state, request.category_id).await?;

    let job = Job::new(ctx.user_id(), request.into())?;
    let created = state.repos.jobs.create(&job).await?;

    tracing::info!(job_id = %created.id, company_id = %created.company_id, "Job posted");

    let listing = load_listing(&state, created.id).await?;
    Ok((StatusCode::CREATED, Json(listing.into())))
}

/// PUT|PATCH /jobs/{id} - Partial update by the owning employer
pub async fn update_job(
    AuthUser(ctx): AuthUser,
    State(state): State<JobsState>,
    PathParam(id): PathParam<Uuid>,
    JsonBody(request): JsonBody<UpdateJobRequest>,
) -> Result<Json<JobResponse>> {
    let mut job = load_visible_job(&state, id, Some(ctx.user_id())).await?;
    can_manage_job(Some(&ctx), JobAction::Update, Some(&job))?;
    request.validate()?;
    if let Some(category_id) = request.category_id {
        check_category(&state, category_id).await?;
    }

    job.apply_changes(request.into())?;
    state
        .repos
        .jobs
        .update(&job)
        .await?
        .ok_or_else(|| Error::NotFound("Job not found".to_string()))?;

    tracing::info!(job_id = %job.id, is_active = job.is_active, "Job updated");

    let listing = load_listing(&state, job.id).await?;
    Ok(Json(listing.into()))
}

/// DELETE /jobs/{id} - Deactivate a posting
pub async fn delete_job(
    AuthUser(ctx): AuthUser,
    State(state): State<JobsState>,
    PathParam(id): PathParam<Uuid>,
) -> Result<StatusCode> {
    let mut job = load_visible_job(&state, id, Some(ctx.user_id())).await?;
    can_manage_job(Some(&ctx), JobAction::Delete, Some(&job))?;

    job.deactivate();
    state
        .repos
        .jobs
        .update(&job)
        .await?
        .ok_or_else(|| Error::NotFound("Job not found".to_string()))?;

    tracing::info!(job_id = %job.id, "Job deactivated");

    Ok(StatusCode::NO_CONTENT)
}
