//! Authorization context for authenticated users

use uuid::Uuid;

use crate::types::{AuthIdentity, AuthRole};

/// Represents an authenticated user context
#[derive(Debug, Clone)]
pub struct AuthContext {
    pub user: AuthIdentity,
}

impl AuthContext {
    /// Create new auth context for a user
    pub fn new(user: AuthIdentity) -> Self {
        Self { user }
    }

    pub fn user_id(&self) -> Uuid {
        self.user.id
    }

    /// Check if user is an employer
    pub fn is_employer(&self) -> bool {
        self.user.role == AuthRole::Employer
    }

    /// Check if user is a job seeker
    pub fn is_job_seeker(&self) -> bool {
        self.user.role == AuthRole::JobSeeker
    }

    /// Check if this context belongs to the given user
    pub fn is_user(&self, user_id: Uuid) -> bool {
        self.user.id == user_id
    }
}
