//! Job category repository

use crate::domain::entities::JobCategory;
use jobboard_common::Result;
use sqlx::PgPool;
use uuid::Uuid;

#[derive(Clone)]
pub struct CategoryRepository {
    pool: PgPool,
}

impl CategoryRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// All categories, alphabetical
    pub async fn list(&self) -> Result<Vec<JobCategory>> {
        let rows = sqlx::query_as::<_, JobCategory>(
            "SELECT id, name, description, created_at FROM job_categories ORDER BY name",
        )
        .fetch_all(&self.pool)
        .await?;
        Ok(rows)
    }

    pub async fn find(&self, id: Uuid) -> Result<Option<JobCategory>> {
        let row = sqlx::query_as::<_, JobCategory>(
            "SELECT id, name, description, created_at FROM job_categories WHERE id = $1",
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;
        Ok(row)
    }

    pub async fn exists(&self, id: Uuid) -> Result<bool> {
        let exists = sqlx::query_scalar::<_, bool>(
            "SELECT EXISTS(SELECT 1 FROM job_categories WHERE id = $1)",
        )
        .bind(id)
        .fetch_one(&self.pool)
        .await?;
        Ok(exists)
    }
}
