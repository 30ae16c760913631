//! Transaction helpers for Jobs domain

use super::jobs::{LISTING_FIELDS, LISTING_FROM};
use crate::domain::entities::{SaveToggle, SavedJob, SavedJobEntry};
use sqlx::{Postgres, Transaction};
use uuid::Uuid;

/// Flip a bookmark within a transaction.
///
/// Toggles for the same (user, job) pair are serialized by a transaction-scoped
/// advisory lock taken before anything is read, so each caller sees the
/// previous caller's committed outcome. The lock is released on commit or
/// rollback.
pub async fn toggle_saved_job_tx(
    tx: &mut Transaction<'_, Postgres>,
    user_id: Uuid,
    job_id: Uuid,
) -> Result<SaveToggle, sqlx::Error> {
    sqlx::query("SELECT pg_advisory_xact_lock(hashtext($1::text), hashtext($2::text))")
        .bind(user_id)
        .bind(job_id)
        .execute(&mut **tx)
        .await?;

    let removed = sqlx::query("DELETE FROM saved_jobs WHERE user_id = $1 AND job_id = $2")
        .bind(user_id)
        .bind(job_id)
        .execute(&mut **tx)
        .await?;
    if removed.rows_affected() > 0 {
        return Ok(SaveToggle::Removed);
    }

    // No-op update on conflict so RETURNING always yields the stored row
    let saved = sqlx::query_as::<_, SavedJob>(
        r#"
        INSERT INTO saved_jobs (id, user_id, job_id, saved_at)
        VALUES ($1, $2, $3, NOW())
        ON CONFLICT (user_id, job_id) DO UPDATE SET saved_at = saved_jobs.saved_at
        RETURNING id, user_id, job_id, saved_at
        "#,
    )
    .bind(Uuid::new_v4())
    .bind(user_id)
    .bind(job_id)
    .fetch_one(&mut **tx)
    .await?;

    let entry = saved_job_entry_tx(tx, saved.id).await?;
    Ok(SaveToggle::Added(entry))
}

/// Bookmark with its posting, read inside the caller's transaction
pub async fn saved_job_entry_tx(
    tx: &mut Transaction<'_, Postgres>,
    saved_id: Uuid,
) -> Result<SavedJobEntry, sqlx::Error> {
    let query = format!(
        "SELECT s.id AS saved_id, s.saved_at, {LISTING_FIELDS} \
         {LISTING_FROM} \
         JOIN saved_jobs s ON s.job_id = j.id \
         WHERE s.id = $1"
    );
    sqlx::query_as::<_, SavedJobEntry>(&query)
        .bind(saved_id)
        .fetch_one(&mut **tx)
        .await
}
