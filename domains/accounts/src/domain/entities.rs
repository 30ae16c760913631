//! Account entities
//!
//! A single `User` record carries a role tag. Role-specific attributes are
//! stored side by side but only exposed and editable through the matching
//! `RoleProfile` variant.

use chrono::{DateTime, Utc};
use jobboard_auth::{AuthIdentity, AuthRole};
use jobboard_common::{Error, FieldErrors, Result};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Account role, fixed at registration
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize, sqlx::Type,
)]
#[sqlx(type_name = "user_role", rename_all = "snake_case")]
#[serde(rename_all = "snake_case")]
pub enum UserRole {
    #[default]
    JobSeeker,
    Employer,
}

impl From<UserRole> for AuthRole {
    fn from(role: UserRole) -> Self {
        match role {
            UserRole::JobSeeker => AuthRole::JobSeeker,
            UserRole::Employer => AuthRole::Employer,
        }
    }
}

/// Role-specific view of a user
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum RoleProfile {
    Employer {
        company_name: String,
        company_website: String,
    },
    JobSeeker {
        skills: String,
        resume: Option<String>,
    },
}

/// User entity
#[derive(Debug, Clone, PartialEq, sqlx::FromRow)]
pub struct User {
    pub id: Uuid,
    pub username: String,
    pub email: String,
    pub password_hash: String,
    pub role: UserRole,
    pub first_name: String,
    pub last_name: String,
    pub phone_number: String,
    pub bio: String,
    pub location: String,
    pub profile_picture: Option<String>,
    pub company_name: String,
    pub company_website: String,
    pub skills: String,
    pub resume: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Partial profile update. `None` leaves a field untouched.
#[derive(Debug, Clone, Default)]
pub struct ProfileChanges {
    pub email: Option<String>,
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub phone_number: Option<String>,
    pub bio: Option<String>,
    pub location: Option<String>,
    pub profile_picture: Option<String>,
    pub company_name: Option<String>,
    pub company_website: Option<String>,
    pub skills: Option<String>,
    pub resume: Option<String>,
}

impl ProfileChanges {
    /// Reject attributes that belong to the other role
    pub fn check_role(&self, role: UserRole) -> Result<()> {
        let mut errors = FieldErrors::new();
        match role {
            UserRole::Employer => {
                if self.skills.is_some() {
                    errors.add("skills", "Only job seekers have skills.");
                }
                if self.resume.is_some() {
                    errors.add("resume", "Only job seekers have a resume.");
                }
            }
            UserRole::JobSeeker => {
                if self.company_name.is_some() {
                    errors.add("company_name", "Only employers have a company name.");
                }
                if self.company_website.is_some() {
                    errors.add("company_website", "Only employers have a company website.");
                }
            }
        }
        errors.into_result()
    }
}

impl User {
    /// Create a new user with an already-hashed password
    pub fn new(
        username: String,
        email: String,
        password_hash: String,
        role: UserRole,
    ) -> Result<Self> {
        if username.trim().is_empty() {
            return Err(Error::InvalidFields(FieldErrors::single(
                "username",
                "This field may not be blank.",
            )));
        }
        if password_hash.is_empty() {
            return Err(Error::Internal("Password hash missing".to_string()));
        }

        let now = Utc::now();
        Ok(User {
            id: Uuid::new_v4(),
            username,
            email: normalize_email(&email),
            password_hash,
            role,
            first_name: String::new(),
            last_name: String::new(),
            phone_number: String::new(),
            bio: String::new(),
            location: String::new(),
            profile_picture: None,
            company_name: String::new(),
            company_website: String::new(),
            skills: String::new(),
            resume: None,
            created_at: now,
            updated_at: now,
        })
    }

    pub fn is_employer(&self) -> bool {
        self.role == UserRole::Employer
    }

    /// "First Last", or the username when no name is set
    pub fn display_name(&self) -> String {
        let full = format!("{} {}", self.first_name.trim(), self.last_name.trim());
        let full = full.trim();
        if full.is_empty() {
            self.username.clone()
        } else {
            full.to_string()
        }
    }

    /// The attributes that belong to this user's role
    pub fn role_profile(&self) -> RoleProfile {
        match self.role {
            UserRole::Employer => RoleProfile::Employer {
                company_name: self.company_name.clone(),
                company_website: self.company_website.clone(),
            },
            UserRole::JobSeeker => RoleProfile::JobSeeker {
                skills: self.skills.clone(),
                resume: self.resume.clone(),
            },
        }
    }

    /// Apply a partial update. Fields of the other role are rejected.
    pub fn apply_profile_changes(&mut self, changes: ProfileChanges) -> Result<()> {
        changes.check_role(self.role)?;

        if let Some(email) = changes.email {
            self.email = normalize_email(&email);
        }
        set_if_some(&mut self.first_name, changes.first_name);
        set_if_some(&mut self.last_name, changes.last_name);
        set_if_some(&mut self.phone_number, changes.phone_number);
        set_if_some(&mut self.bio, changes.bio);
        set_if_some(&mut self.location, changes.location);
        set_if_some(&mut self.company_name, changes.company_name);
        set_if_some(&mut self.company_website, changes.company_website);
        set_if_some(&mut self.skills, changes.skills);
        if let Some(picture) = changes.profile_picture {
            self.profile_picture = non_blank(picture);
        }
        if let Some(resume) = changes.resume {
            self.resume = non_blank(resume);
        }

        self.updated_at = Utc::now();
        Ok(())
    }

    /// Auth read model for token issuance
    pub fn identity(&self) -> AuthIdentity {
        AuthIdentity {
            id: self.id,
            username: self.username.clone(),
            email: self.email.clone(),
            role: self.role.into(),
            created_at: self.created_at,
        }
    }
}

fn set_if_some(target: &mut String, value: Option<String>) {
    if let Some(value) = value {
        *target = value.trim().to_string();
    }
}

fn non_blank(value: String) -> Option<String> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        None
    } else {
        Some(trimmed.to_string())
    }
}

/// Emails compare case-insensitively
pub fn normalize_email(email: &str) -> String {
    email.trim().to_lowercase()
}
