//! Domain entities for the Jobs domain
//!
//! Postings are owned by one employer. Applications and saved jobs link a
//! user to a posting; both carry a storage-level uniqueness constraint on
//! the pair.

use chrono::{DateTime, NaiveDate, Utc};
use jobboard_common::{FieldErrors, Result};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::state::ApplicationStateMachine;

/// Largest whole part that fits `NUMERIC(10,2)`
const MAX_WHOLE_SALARY: Decimal = Decimal::from_parts(99_999_999, 0, 0, false, 0);

/// Employment type
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, sqlx::Type)]
#[sqlx(type_name = "job_type", rename_all = "snake_case")]
#[serde(rename_all = "snake_case")]
pub enum JobType {
    FullTime,
    PartTime,
    Contract,
    Internship,
    Remote,
}

/// Required experience
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, sqlx::Type)]
#[sqlx(type_name = "experience_level", rename_all = "snake_case")]
#[serde(rename_all = "snake_case")]
pub enum ExperienceLevel {
    Entry,
    Mid,
    Senior,
    Executive,
}

/// Application review status
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize, sqlx::Type,
)]
#[sqlx(type_name = "application_status", rename_all = "snake_case")]
#[serde(rename_all = "snake_case")]
pub enum ApplicationStatus {
    #[default]
    Pending,
    Reviewed,
    Shortlisted,
    Rejected,
    Accepted,
}

impl std::fmt::Display for ApplicationStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Pending => write!(f, "pending"),
            Self::Reviewed => write!(f, "reviewed"),
            Self::Shortlisted => write!(f, "shortlisted"),
            Self::Rejected => write!(f, "rejected"),
            Self::Accepted => write!(f, "accepted"),
        }
    }
}

/// Flat lookup for postings
#[derive(Debug, Clone, PartialEq, Serialize, sqlx::FromRow)]
pub struct JobCategory {
    pub id: Uuid,
    pub name: String,
    pub description: String,
    pub created_at: DateTime<Utc>,
}

/// Job posting
#[derive(Debug, Clone, PartialEq, sqlx::FromRow)]
pub struct Job {
    pub id: Uuid,
    pub company_id: Uuid,
    pub category_id: Option<Uuid>,
    pub title: String,
    pub description: String,
    pub job_type: JobType,
    pub experience_level: ExperienceLevel,
    pub location: String,
    pub salary_min: Option<Decimal>,
    pub salary_max: Option<Decimal>,
    pub is_active: bool,
    pub application_deadline: Option<NaiveDate>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Fields supplied when posting a job
#[derive(Debug, Clone)]
pub struct NewJob {
    pub category_id: Option<Uuid>,
    pub title: String,
    pub description: String,
    pub job_type: JobType,
    pub experience_level: ExperienceLevel,
    pub location: String,
    pub salary_min: Option<Decimal>,
    pub salary_max: Option<Decimal>,
    pub application_deadline: Option<NaiveDate>,
    pub is_active: bool,
}

/// Partial update of a posting.
///
/// Nullable columns use `Option<Option<_>>`: the outer `None` leaves the
/// column alone, `Some(None)` clears it.
#[derive(Debug, Clone, Default)]
pub struct JobChanges {
    pub category_id: Option<Option<Uuid>>,
    pub title: Option<String>,
    pub description: Option<String>,
    pub job_type: Option<JobType>,
    pub experience_level: Option<ExperienceLevel>,
    pub location: Option<String>,
    pub salary_min: Option<Option<Decimal>>,
    pub salary_max: Option<Option<Decimal>>,
    pub application_deadline: Option<Option<NaiveDate>>,
    pub is_active: Option<bool>,
}

impl Job {
    /// Create a posting owned by `company_id`
    pub fn new(company_id: Uuid, new: NewJob) -> Result<Self> {
        let now = Utc::now();
        let job = Job {
            id: Uuid::new_v4(),
            company_id,
            category_id: new.category_id,
            title: new.title.trim().to_string(),
            description: new.description,
            job_type: new.job_type,
            experience_level: new.experience_level,
            location: new.location.trim().to_string(),
            salary_min: new.salary_min,
            salary_max: new.salary_max,
            is_active: new.is_active,
            application_deadline: new.application_deadline,
            created_at: now,
            updated_at: now,
        };
        job.validate()?;
        Ok(job)
    }

    /// Apply a partial update, then re-check the posting invariants
    pub fn apply_changes(&mut self, changes: JobChanges) -> Result<()> {
        let mut updated = self.clone();
        if let Some(category_id) = changes.category_id {
            updated.category_id = category_id;
        }
        if let Some(title) = changes.title {
            updated.title = title.trim().to_string();
        }
        if let Some(description) = changes.description {
            updated.description = description;
        }
        if let Some(job_type) = changes.job_type {
            updated.job_type = job_type;
        }
        if let Some(level) = changes.experience_level {
            updated.experience_level = level;
        }
        if let Some(location) = changes.location {
            updated.location = location.trim().to_string();
        }
        if let Some(salary_min) = changes.salary_min {
            updated.salary_min = salary_min;
        }
        if let Some(salary_max) = changes.salary_max {
            updated.salary_max = salary_max;
        }
        if let Some(deadline) = changes.application_deadline {
            updated.application_deadline = deadline;
        }
        if let Some(is_active) = changes.is_active {
            updated.is_active = is_active;
        }

        updated.validate()?;
        updated.updated_at = Utc::now();
        *self = updated;
        Ok(())
    }

    /// Soft delete
    pub fn deactivate(&mut self) {
        self.is_active = false;
        self.updated_at = Utc::now();
    }

    pub fn is_owned_by(&self, user_id: Uuid) -> bool {
        self.company_id == user_id
    }

    /// Deadline present and strictly before `today`
    pub fn is_expired_on(&self, today: NaiveDate) -> bool {
        self.application_deadline
            .is_some_and(|deadline| deadline < today)
    }

    pub fn is_expired(&self) -> bool {
        self.is_expired_on(Utc::now().date_naive())
    }

    /// Visible to everyone while active, to the owner always
    pub fn is_visible_to(&self, user_id: Option<Uuid>) -> bool {
        self.is_active || user_id.is_some_and(|id| self.is_owned_by(id))
    }

    fn validate(&self) -> Result<()> {
        let mut errors = FieldErrors::new();

        if self.title.is_empty() {
            errors.add("title", "This field may not be blank.");
        } else if self.title.chars().count() > 255 {
            errors.add("title", "Ensure this field has no more than 255 characters.");
        }
        if self.description.trim().is_empty() {
            errors.add("description", "This field may not be blank.");
        }
        if self.location.is_empty() {
            errors.add("location", "This field may not be blank.");
        } else if self.location.chars().count() > 255 {
            errors.add("location", "Ensure this field has no more than 255 characters.");
        }

        check_salary(&mut errors, "salary_min", self.salary_min);
        check_salary(&mut errors, "salary_max", self.salary_max);
        if let (Some(min), Some(max)) = (self.salary_min, self.salary_max) {
            if min > max {
                errors.add(
                    "salary_min",
                    "Minimum salary must not exceed maximum salary.",
                );
            }
        }

        errors.into_result()
    }
}

fn check_salary(errors: &mut FieldErrors, field: &str, value: Option<Decimal>) {
    let Some(value) = value else {
        return;
    };
    if value.is_sign_negative() {
        errors.add(field, "Ensure this value is greater than or equal to 0.");
    }
    if value.normalize().scale() > 2 {
        errors.add(field, "Ensure that there are no more than 2 decimal places.");
    }
    if value.abs().trunc() > MAX_WHOLE_SALARY {
        errors.add(field, "Ensure that there are no more than 10 digits in total.");
    }
}

/// Posting joined with its employer, category, and application count
#[derive(Debug, Clone, sqlx::FromRow)]
pub struct JobListing {
    #[sqlx(flatten)]
    pub job: Job,
    pub company_name: String,
    pub category_name: Option<String>,
    pub applications_count: i64,
}

/// Job application
#[derive(Debug, Clone, PartialEq, sqlx::FromRow)]
pub struct JobApplication {
    pub id: Uuid,
    pub job_id: Uuid,
    pub applicant_id: Uuid,
    pub cover_letter: String,
    pub resume: String,
    pub status: ApplicationStatus,
    pub applied_at: DateTime<Utc>,
    pub reviewed_at: Option<DateTime<Utc>>,
}

impl JobApplication {
    /// New pending application
    pub fn new(job_id: Uuid, applicant_id: Uuid, cover_letter: String, resume: String) -> Self {
        Self {
            id: Uuid::new_v4(),
            job_id,
            applicant_id,
            cover_letter,
            resume,
            status: ApplicationStatus::Pending,
            applied_at: Utc::now(),
            reviewed_at: None,
        }
    }

    /// Record an employer's decision.
    ///
    /// Every status-bearing update stamps `reviewed_at`, even when the
    /// status is unchanged. The stamp never moves backwards.
    pub fn set_status(&mut self, target: ApplicationStatus) -> Result<()> {
        self.set_status_at(target, Utc::now())
    }

    fn set_status_at(&mut self, target: ApplicationStatus, now: DateTime<Utc>) -> Result<()> {
        self.status = ApplicationStateMachine::apply_status(self.status, target)?;
        self.reviewed_at = Some(match self.reviewed_at {
            Some(previous) if previous > now => previous,
            _ => now,
        });
        Ok(())
    }

    /// Applicant edits to the submitted material
    pub fn amend(&mut self, cover_letter: Option<String>, resume: Option<String>) -> Result<()> {
        let mut errors = FieldErrors::new();
        if let Some(cover_letter) = cover_letter {
            if cover_letter.trim().is_empty() {
                errors.add("cover_letter", "This field may not be blank.");
            } else {
                self.cover_letter = cover_letter;
            }
        }
        if let Some(resume) = resume {
            if resume.trim().is_empty() {
                errors.add("resume", "This field may not be blank.");
            } else {
                self.resume = resume.trim().to_string();
            }
        }
        errors.into_result()
    }
}

/// Application joined with the posting, its employer, and the applicant
#[derive(Debug, Clone, sqlx::FromRow)]
pub struct ApplicationDetail {
    #[sqlx(flatten)]
    pub application: JobApplication,
    pub job_title: String,
    pub employer_id: Uuid,
    pub company_name: String,
    pub applicant_name: String,
}

/// Bookmark of a posting
#[derive(Debug, Clone, PartialEq, sqlx::FromRow)]
pub struct SavedJob {
    pub id: Uuid,
    pub user_id: Uuid,
    pub job_id: Uuid,
    pub saved_at: DateTime<Utc>,
}

/// Bookmark with the posting it points to
#[derive(Debug, Clone, sqlx::FromRow)]
pub struct SavedJobEntry {
    pub saved_id: Uuid,
    pub saved_at: DateTime<Utc>,
    #[sqlx(flatten)]
    pub listing: JobListing,
}

/// Outcome of a save toggle
#[derive(Debug, Clone)]
pub enum SaveToggle {
    Added(SavedJobEntry),
    Removed,
}

impl SaveToggle {
    pub fn is_saved(&self) -> bool {
        matches!(self, Self::Added(_))
    }
}
