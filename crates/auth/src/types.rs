//! Auth read-model types
//!
//! Lightweight views of the rows owned by the accounts domain.
//! These types carry only the fields needed for authentication and authorization.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Lightweight identity for authenticated users.
///
/// Handlers needing the full profile load it from the accounts repository.
#[derive(Debug, Clone, sqlx::FromRow)]
pub struct AuthIdentity {
    pub id: Uuid,
    pub username: String,
    pub email: String,
    pub role: AuthRole,
    pub created_at: DateTime<Utc>,
}

/// Account role for auth decisions
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, sqlx::Type, Serialize, Deserialize)]
#[sqlx(type_name = "user_role", rename_all = "snake_case")]
#[serde(rename_all = "snake_case")]
pub enum AuthRole {
    JobSeeker,
    Employer,
}

impl std::fmt::Display for AuthRole {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            AuthRole::JobSeeker => write!(f, "job_seeker"),
            AuthRole::Employer => write!(f, "employer"),
        }
    }
}
