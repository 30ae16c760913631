//! Saved job repository

use super::jobs::{LISTING_FIELDS, LISTING_FROM};
use crate::domain::entities::SavedJobEntry;
use jobboard_common::{Pagination, Result};
use sqlx::PgPool;
use uuid::Uuid;

#[derive(Clone)]
pub struct SavedJobRepository {
    pool: PgPool,
}

impl SavedJobRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Newest-first page of a user's bookmarks plus the total count
    pub async fn list_for_user(
        &self,
        user_id: Uuid,
        page: Pagination,
    ) -> Result<(i64, Vec<SavedJobEntry>)> {
        let count = sqlx::query_scalar::<_, i64>(
            "SELECT COUNT(*) FROM saved_jobs WHERE user_id = $1",
        )
        .bind(user_id)
        .fetch_one(&self.pool)
        .await?;

        let query = format!(
            "SELECT s.id AS saved_id, s.saved_at, {LISTING_FIELDS} \
             {LISTING_FROM} \
             JOIN saved_jobs s ON s.job_id = j.id \
             WHERE s.user_id = $1 \
             ORDER BY s.saved_at DESC, s.id DESC \
             LIMIT $2 OFFSET $3"
        );
        let rows = sqlx::query_as::<_, SavedJobEntry>(&query)
            .bind(user_id)
            .bind(page.limit())
            .bind(page.offset())
            .fetch_all(&self.pool)
            .await?;

        Ok((count, rows))
    }
}
