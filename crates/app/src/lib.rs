//! Jobboard application composition root
//!
//! Composes all domain routers into a single application.

use axum::{routing::get, Router};
use jobboard_accounts::{AccountsRepositories, AccountsState};
use jobboard_auth::{AuthBackend, AuthConfig};
use jobboard_common::config::Config;
use jobboard_jobs::{JobsRepositories, JobsState};
use sqlx::PgPool;

/// Create the main application router with all routes
pub fn create_app(config: &Config, pool: PgPool) -> Router {
    let auth = AuthBackend::new(pool.clone(), AuthConfig::from(config));

    let accounts_state = AccountsState {
        repos: AccountsRepositories::new(pool.clone()),
        auth: auth.clone(),
    };

    let jobs_state = JobsState {
        repos: JobsRepositories::new(pool),
        auth,
    };

    Router::new()
        .route("/health", get(health_check))
        .route("/", get(banner))
        .merge(jobboard_accounts::routes().with_state(accounts_state))
        .merge(jobboard_jobs::routes().with_state(jobs_state))
}

/// Apply pending schema migrations
pub async fn run_migrations(pool: &PgPool) -> Result<(), sqlx::migrate::MigrateError> {
    sqlx::migrate!("../../migrations").run(pool).await
}

/// Health check endpoint
async fn health_check() -> &'static str {
    "OK"
}

async fn banner() -> String {
    format!("Jobboard API v{}", env!("CARGO_PKG_VERSION"))
}
