//! Job listing filters and ordering

use std::str::FromStr;

use jobboard_common::{Error, FieldErrors, Pagination};
use serde::Deserialize;
use uuid::Uuid;

use super::entities::{ApplicationStatus, ExperienceLevel, JobType};

/// Sort order for job listings
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum JobOrdering {
    CreatedAt,
    #[default]
    NewestFirst,
    SalaryMin,
    SalaryMinDesc,
    SalaryMax,
    SalaryMaxDesc,
}

impl JobOrdering {
    /// `ORDER BY` clause over the `j` alias. Ties fall back to newest first.
    pub fn sql(&self) -> &'static str {
        match self {
            Self::CreatedAt => "j.created_at ASC, j.id ASC",
            Self::NewestFirst => "j.created_at DESC, j.id DESC",
            Self::SalaryMin => "j.salary_min ASC NULLS LAST, j.created_at DESC",
            Self::SalaryMinDesc => "j.salary_min DESC NULLS LAST, j.created_at DESC",
            Self::SalaryMax => "j.salary_max ASC NULLS LAST, j.created_at DESC",
            Self::SalaryMaxDesc => "j.salary_max DESC NULLS LAST, j.created_at DESC",
        }
    }
}

impl FromStr for JobOrdering {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim() {
            "created_at" => Ok(Self::CreatedAt),
            "-created_at" => Ok(Self::NewestFirst),
            "salary_min" => Ok(Self::SalaryMin),
            "-salary_min" => Ok(Self::SalaryMinDesc),
            "salary_max" => Ok(Self::SalaryMax),
            "-salary_max" => Ok(Self::SalaryMaxDesc),
            other => Err(Error::InvalidFields(FieldErrors::single(
                "ordering",
                format!("Unknown ordering '{}'.", other),
            ))),
        }
    }
}

/// Query string for `GET /jobs`
#[derive(Debug, Clone, Default, Deserialize)]
pub struct JobListQuery {
    pub job_type: Option<JobType>,
    pub experience_level: Option<ExperienceLevel>,
    pub category: Option<Uuid>,
    pub location: Option<String>,
    pub search: Option<String>,
    pub ordering: Option<String>,
    pub limit: Option<i64>,
    pub offset: Option<i64>,
}

impl JobListQuery {
    /// Filter over active postings
    pub fn into_filter(self) -> Result<JobFilter, Error> {
        let ordering = match self.ordering.as_deref().filter(|o| !o.trim().is_empty()) {
            Some(raw) => raw.parse()?,
            None => JobOrdering::default(),
        };
        Ok(JobFilter {
            job_type: self.job_type,
            experience_level: self.experience_level,
            category_id: self.category,
            location: non_blank(self.location),
            search: non_blank(self.search),
            ordering,
            company_id: None,
            active_only: true,
        })
    }

    pub fn pagination(&self) -> Pagination {
        Pagination {
            limit: self.limit,
            offset: self.offset,
        }
    }
}

/// Resolved listing filter
#[derive(Debug, Clone, PartialEq)]
pub struct JobFilter {
    pub job_type: Option<JobType>,
    pub experience_level: Option<ExperienceLevel>,
    pub category_id: Option<Uuid>,
    pub location: Option<String>,
    pub search: Option<String>,
    pub ordering: JobOrdering,
    pub company_id: Option<Uuid>,
    pub active_only: bool,
}

impl JobFilter {
    /// An employer's own postings, inactive ones included
    pub fn owned_by(company_id: Uuid) -> Self {
        Self {
            job_type: None,
            experience_level: None,
            category_id: None,
            location: None,
            search: None,
            ordering: JobOrdering::default(),
            company_id: Some(company_id),
            active_only: false,
        }
    }
}

/// Query string for `GET /applications`
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ApplicationListQuery {
    pub status: Option<ApplicationStatus>,
    pub limit: Option<i64>,
    pub offset: Option<i64>,
}

impl ApplicationListQuery {
    pub fn pagination(&self) -> Pagination {
        Pagination {
            limit: self.limit,
            offset: self.offset,
        }
    }
}

fn non_blank(value: Option<String>) -> Option<String> {
    value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}
