//! Repository implementations for Jobs domain

pub mod applications;
pub mod categories;
pub mod jobs;
pub mod saved_jobs;
pub mod transactions;

use sqlx::{PgPool, Postgres, Transaction};

pub use applications::{ApplicationRepository, ApplicationScope};
pub use categories::CategoryRepository;
pub use jobs::JobRepository;
pub use saved_jobs::SavedJobRepository;

/// Combined repository access for the Jobs domain
#[derive(Clone)]
pub struct JobsRepositories {
    pool: PgPool,
    pub categories: CategoryRepository,
    pub jobs: JobRepository,
    pub applications: ApplicationRepository,
    pub saved_jobs: SavedJobRepository,
}

impl JobsRepositories {
    pub fn new(pool: PgPool) -> Self {
        Self {
            categories: CategoryRepository::new(pool.clone()),
            jobs: JobRepository::new(pool.clone()),
            applications: ApplicationRepository::new(pool.clone()),
            saved_jobs: SavedJobRepository::new(pool.clone()),
            pool,
        }
    }

    /// Begin a new database transaction.
    pub async fn begin(&self) -> std::result::Result<Transaction<'static, Postgres>, sqlx::Error> {
        self.pool.begin().await
    }
}
