//! Route definitions for Jobs domain API

use axum::{
    routing::{get, post},
    Router,
};

use super::handlers::{applications, categories, jobs, saved_jobs};
use super::middleware::JobsState;

/// Postings, applying, and bookmarks
fn job_routes() -> Router<JobsState> {
    Router::new()
        .route("/jobs", get(jobs::list_jobs).post(jobs::create_job))
        .route("/jobs/mine", get(jobs::list_my_jobs))
        .route("/jobs/saved", get(saved_jobs::list_saved_jobs))
        .route(
            "/jobs/{id}",
            get(jobs::get_job)
                .put(jobs::update_job)
                .patch(jobs::update_job)
                .delete(jobs::delete_job),
        )
        .route("/jobs/{id}/apply", post(applications::apply))
        .route("/jobs/{id}/save", post(saved_jobs::toggle_save))
}

fn application_routes() -> Router<JobsState> {
    Router::new()
        .route("/applications", get(applications::list_applications))
        .route(
            "/applications/{id}",
            get(applications::get_application)
                .put(applications::update_application)
                .patch(applications::update_application)
                .delete(applications::delete_application),
        )
}

fn category_routes() -> Router<JobsState> {
    Router::new()
        .route("/categories", get(categories::list_categories))
        .route("/categories/{id}", get(categories::get_category))
}

/// Create all Jobs domain API routes
pub fn routes() -> Router<JobsState> {
    Router::new()
        .merge(job_routes())
        .merge(application_routes())
        .merge(category_routes())
}
