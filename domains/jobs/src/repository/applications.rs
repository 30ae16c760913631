//! Job application repository

use crate::domain::entities::{ApplicationDetail, ApplicationStatus, JobApplication};
use jobboard_common::{Pagination, Result};
use sqlx::{PgPool, Postgres, QueryBuilder};
use uuid::Uuid;

/// Column list for `job_applications`, in `JobApplication` field order
pub(crate) const APPLICATION_COLUMNS: &str =
    "id, job_id, applicant_id, cover_letter, resume, status, applied_at, reviewed_at";

const DETAIL_SELECT: &str = "SELECT a.id, a.job_id, a.applicant_id, a.cover_letter, \
    a.resume, a.status, a.applied_at, a.reviewed_at, \
    j.title AS job_title, j.company_id AS employer_id, \
    COALESCE(NULLIF(e.company_name, ''), e.username) AS company_name, \
    COALESCE(NULLIF(TRIM(CONCAT(s.first_name, ' ', s.last_name)), ''), s.username) AS applicant_name \
    FROM job_applications a \
    JOIN jobs j ON j.id = a.job_id \
    JOIN users e ON e.id = j.company_id \
    JOIN users s ON s.id = a.applicant_id";

/// Whose applications a listing covers
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ApplicationScope {
    /// Submitted by this job seeker
    Applicant(Uuid),
    /// Received on this employer's postings
    Employer(Uuid),
}

impl ApplicationScope {
    fn push_where(&self, qb: &mut QueryBuilder<'_, Postgres>) {
        match *self {
            Self::Applicant(id) => qb.push(" WHERE a.applicant_id = ").push_bind(id),
            Self::Employer(id) => qb.push(" WHERE j.company_id = ").push_bind(id),
        };
    }
}

#[derive(Clone)]
pub struct ApplicationRepository {
    pool: PgPool,
}

impl ApplicationRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Find application with job, employer, and applicant names
    pub async fn find_detail(&self, id: Uuid) -> Result<Option<ApplicationDetail>> {
        let query = format!("{DETAIL_SELECT} WHERE a.id = $1");
        let row = sqlx::query_as::<_, ApplicationDetail>(&query)
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;
        Ok(row)
    }

    /// Newest-first page of applications in scope plus the total count
    pub async fn list(
        &self,
        scope: ApplicationScope,
        status: Option<ApplicationStatus>,
        page: Pagination,
    ) -> Result<(i64, Vec<ApplicationDetail>)> {
        let mut count_query = QueryBuilder::<Postgres>::new(
            "SELECT COUNT(*) FROM job_applications a JOIN jobs j ON j.id = a.job_id",
        );
        scope.push_where(&mut count_query);
        if let Some(status) = status {
            count_query.push(" AND a.status = ").push_bind(status);
        }
        let count = count_query
            .build_query_scalar::<i64>()
            .fetch_one(&self.pool)
            .await?;

        let mut query = QueryBuilder::<Postgres>::new(DETAIL_SELECT);
        scope.push_where(&mut query);
        if let Some(status) = status {
            query.push(" AND a.status = ").push_bind(status);
        }
        query
            .push(" ORDER BY a.applied_at DESC, a.id DESC LIMIT ")
            .push_bind(page.limit())
            .push(" OFFSET ")
            .push_bind(page.offset());
        let rows = query
            .build_query_as::<ApplicationDetail>()
            .fetch_all(&self.pool)
            .await?;

        Ok((count, rows))
    }

    /// Whether the applicant already applied to the job
    pub async fn exists(&self, job_id: Uuid, applicant_id: Uuid) -> Result<bool> {
        let exists = sqlx::query_scalar::<_, bool>(
            "SELECT EXISTS(SELECT 1 FROM job_applications WHERE job_id = $1 AND applicant_id = $2)",
        )
        .bind(job_id)
        .bind(applicant_id)
        .fetch_one(&self.pool)
        .await?;
        Ok(exists)
    }

    /// Insert unless the (job, applicant) pair already exists.
    ///
    /// Returns `None` when a concurrent request won the race.
    pub async fn create(&self, application: &JobApplication) -> Result<Option<JobApplication>> {
        let query = format!(
            "INSERT INTO job_applications ({APPLICATION_COLUMNS}) \
             VALUES ($1, $2, $3, $4, $5, $6, $7, $8) \
             ON CONFLICT (job_id, applicant_id) DO NOTHING \
             RETURNING {APPLICATION_COLUMNS}"
        );
        let row = sqlx::query_as::<_, JobApplication>(&query)
            .bind(application.id)
            .bind(application.job_id)
            .bind(application.applicant_id)
            .bind(&application.cover_letter)
            .bind(&application.resume)
            .bind(application.status)
            .bind(application.applied_at)
            .bind(application.reviewed_at)
            .fetch_optional(&self.pool)
            .await?;
        Ok(row)
    }

    /// Persist review and amendment fields. `applied_at` never changes.
    pub async fn update(&self, application: &JobApplication) -> Result<Option<JobApplication>> {
        let query = format!(
            "UPDATE job_applications SET \
                cover_letter = $2, resume = $3, status = $4, reviewed_at = $5 \
             WHERE id = $1 \
             RETURNING {APPLICATION_COLUMNS}"
        );
        let row = sqlx::query_as::<_, JobApplication>(&query)
            .bind(application.id)
            .bind(&application.cover_letter)
            .bind(&application.resume)
            .bind(application.status)
            .bind(application.reviewed_at)
            .fetch_optional(&self.pool)
            .await?;
        Ok(row)
    }

    pub async fn delete(&self, id: Uuid) -> Result<bool> {
        let result = sqlx::query("DELETE FROM job_applications WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }
}
