//! Job repository

use crate::domain::entities::{Job, JobListing};
use crate::domain::filters::JobFilter;
use jobboard_common::{Pagination, Result};
use sqlx::{PgPool, Postgres, QueryBuilder};
use uuid::Uuid;

/// Column list for `jobs`, in `Job` field order
pub(crate) const JOB_COLUMNS: &str = "id, company_id, category_id, title, description, \
    job_type, experience_level, location, salary_min, salary_max, is_active, \
    application_deadline, created_at, updated_at";

/// Select list for `JobListing` over the aliases in `LISTING_FROM`
pub(crate) const LISTING_FIELDS: &str = "j.id, j.company_id, j.category_id, j.title, \
    j.description, j.job_type, j.experience_level, j.location, j.salary_min, j.salary_max, \
    j.is_active, j.application_deadline, j.created_at, j.updated_at, \
    COALESCE(NULLIF(u.company_name, ''), u.username) AS company_name, \
    c.name AS category_name, \
    (SELECT COUNT(*) FROM job_applications a WHERE a.job_id = j.id) AS applications_count";

pub(crate) const LISTING_FROM: &str = "FROM jobs j \
    JOIN users u ON u.id = j.company_id \
    LEFT JOIN job_categories c ON c.id = j.category_id";

/// Escape `%`, `_` and `\` so user input matches literally inside ILIKE
fn like_pattern(search: &str) -> String {
    let mut escaped = String::with_capacity(search.len() + 2);
    escaped.push('%');
    for ch in search.chars() {
        if matches!(ch, '%' | '_' | '\\') {
            escaped.push('\\');
        }
        escaped.push(ch);
    }
    escaped.push('%');
    escaped
}

fn push_filters(qb: &mut QueryBuilder<'_, Postgres>, filter: &JobFilter) {
    qb.push(" WHERE TRUE");
    if filter.active_only {
        qb.push(" AND j.is_active");
    }
    if let Some(company_id) = filter.company_id {
        qb.push(" AND j.company_id = ").push_bind(company_id);
    }
    if let Some(job_type) = filter.job_type {
        qb.push(" AND j.job_type = ").push_bind(job_type);
    }
    if let Some(level) = filter.experience_level {
        qb.push(" AND j.experience_level = ").push_bind(level);
    }
    if let Some(category_id) = filter.category_id {
        qb.push(" AND j.category_id = ").push_bind(category_id);
    }
    if let Some(location) = &filter.location {
        qb.push(" AND j.location = ").push_bind(location.clone());
    }
    if let Some(search) = &filter.search {
        let pattern = like_pattern(search);
        qb.push(" AND (j.title ILIKE ")
            .push_bind(pattern.clone())
            .push(" OR j.description ILIKE ")
            .push_bind(pattern.clone())
            .push(" OR u.company_name ILIKE ")
            .push_bind(pattern)
            .push(")");
    }
}

#[derive(Clone)]
pub struct JobRepository {
    pool: PgPool,
}

impl JobRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Find job by ID
    pub async fn find(&self, id: Uuid) -> Result<Option<Job>> {
        let query = format!("SELECT {JOB_COLUMNS} FROM jobs WHERE id = $1");
        let row = sqlx::query_as::<_, Job>(&query)
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;
        Ok(row)
    }

    /// Find job by ID with employer, category, and application count
    pub async fn find_listing(&self, id: Uuid) -> Result<Option<JobListing>> {
        let query = format!("SELECT {LISTING_FIELDS} {LISTING_FROM} WHERE j.id = $1");
        let row = sqlx::query_as::<_, JobListing>(&query)
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;
        Ok(row)
    }

    /// Filtered page of listings plus the total match count
    pub async fn list(
        &self,
        filter: &JobFilter,
        page: Pagination,
    ) -> Result<(i64, Vec<JobListing>)> {
        let mut count_query = QueryBuilder::<Postgres>::new(
            "SELECT COUNT(*) FROM jobs j JOIN users u ON u.id = j.company_id",
        );
        push_filters(&mut count_query, filter);
        let count = count_query
            .build_query_scalar::<i64>()
            .fetch_one(&self.pool)
            .await?;

        let mut query =
            QueryBuilder::<Postgres>::new(format!("SELECT {LISTING_FIELDS} {LISTING_FROM}"));
        push_filters(&mut query, filter);
        query
            .push(" ORDER BY ")
            .push(filter.ordering.sql())
            .push(" LIMIT ")
            .push_bind(page.limit())
            .push(" OFFSET ")
            .push_bind(page.offset());
        let rows = query
            .build_query_as::<JobListing>()
            .fetch_all(&self.pool)
            .await?;

        Ok((count, rows))
    }

    /// Create a new job
    pub async fn create(&self, job: &Job) -> Result<Job> {
        let query = format!(
            "INSERT INTO jobs ({JOB_COLUMNS}) \
             VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12, $13, $14) \
             RETURNING {JOB_COLUMNS}"
        );
        let row = sqlx::query_as::<_, Job>(&query)
            .bind(job.id)
            .bind(job.company_id)
            .bind(job.category_id)
            .bind(&job.title)
            .bind(&job.description)
            .bind(job.job_type)
            .bind(job.experience_level)
            .bind(&job.location)
            .bind(job.salary_min)
            .bind(job.salary_max)
            .bind(job.is_active)
            .bind(job.application_deadline)
            .bind(job.created_at)
            .bind(job.updated_at)
            .fetch_one(&self.pool)
            .await?;
        Ok(row)
    }

    /// Persist every mutable column. Owner and creation time are fixed.
    pub async fn update(&self, job: &Job) -> Result<Option<Job>> {
        let query = format!(
            "UPDATE jobs SET \
                category_id = $2, title = $3, description = $4, job_type = $5, \
                experience_level = $6, location = $7, salary_min = $8, salary_max = $9, \
                is_active = $10, application_deadline = $11, updated_at = NOW() \
             WHERE id = $1 \
             RETURNING {JOB_COLUMNS}"
        );
        let row = sqlx::query_as::<_, Job>(&query)
            .bind(job.id)
            .bind(job.category_id)
            .bind(&job.title)
            .bind(&job.description)
            .bind(job.job_type)
            .bind(job.experience_level)
            .bind(&job.location)
            .bind(job.salary_min)
            .bind(job.salary_max)
            .bind(job.is_active)
            .bind(job.application_deadline)
            .fetch_optional(&self.pool)
            .await?;
        Ok(row)
    }
}
