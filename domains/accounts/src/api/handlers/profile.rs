//! Profile API handlers
//!
//! - GET /profile - Current user's profile
//! - PUT|PATCH /profile - Partial profile update (username and role are read-only)

use axum::{extract::State, Json};
use chrono::{DateTime, Utc};
use jobboard_auth::AuthUser;
use jobboard_common::{Error, FieldErrors, Result, ValidatedJson};
use serde::{Deserialize, Serialize};
use uuid::Uuid;
use validator::Validate;

use crate::api::middleware::AccountsState;
use crate::domain::entities::{ProfileChanges, RoleProfile, User, UserRole};

/// Response for profile operations
#[derive(Debug, Serialize)]
pub struct ProfileResponse {
    pub id: Uuid,
    pub username: String,
    pub email: String,
    pub role: UserRole,
    pub first_name: String,
    pub last_name: String,
    pub display_name: String,
    pub phone_number: String,
    pub bio: String,
    pub location: String,
    pub profile_picture: Option<String>,
    pub profile: RoleProfile,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<User> for ProfileResponse {
    fn from(user: User) -> Self {
        Self {
            display_name: user.display_name(),
            profile: user.role_profile(),
            id: user.id,
            username: user.username,
            email: user.email,
            role: user.role,
            first_name: user.first_name,
            last_name: user.last_name,
            phone_number: user.phone_number,
            bio: user.bio,
            location: user.location,
            profile_picture: user.profile_picture,
            created_at: user.created_at,
            updated_at: user.updated_at,
        }
    }
}

/// Request for updating the caller's profile
#[derive(Debug, Default, Deserialize, Validate)]
pub struct UpdateProfileRequest {
    #[validate(email)]
    pub email: Option<String>,

    #[validate(length(max = 150))]
    pub first_name: Option<String>,

    #[validate(length(max = 150))]
    pub last_name: Option<String>,

    #[validate(length(max = 20))]
    pub phone_number: Option<String>,

    #[validate(length(max = 5000))]
    pub bio: Option<String>,

    #[validate(length(max = 255))]
    pub location: Option<String>,

    #[validate(length(max = 500))]
    pub profile_picture: Option<String>,

    #[validate(length(max = 255))]
    pub company_name: Option<String>,

    #[validate(url)]
    pub company_website: Option<String>,

    #[validate(length(max = 5000))]
    pub skills: Option<String>,

    #[validate(length(max = 500))]
    pub resume: Option<String>,

    // Read-only; present only so they can be rejected explicitly
    pub id: Option<serde_json::Value>,
    pub username: Option<serde_json::Value>,
    #[serde(alias = "user_type")]
    pub role: Option<serde_json::Value>,
}

impl UpdateProfileRequest {
    fn reject_read_only(&self) -> Result<()> {
        let mut errors = FieldErrors::new();
        if self.id.is_some() {
            errors.add("id", "This field is read-only.");
        }
        if self.username.is_some() {
            errors.add("username", "This field is read-only.");
        }
        if self.role.is_some() {
            errors.add("role", "Role cannot be changed after registration.");
        }
        errors.into_result()
    }

    fn into_changes(self) -> ProfileChanges {
        ProfileChanges {
            email: self.email,
            first_name: self.first_name,
            last_name: self.last_name,
            phone_number: self.phone_number,
            bio: self.bio,
            location: self.location,
            profile_picture: self.profile_picture,
            company_name: self.company_name,
            company_website: self.company_website,
            skills: self.skills,
            resume: self.resume,
        }
    }
}

/// GET /profile - Get current user profile
pub async fn get_profile(
    AuthUser(ctx): AuthUser,
    State(state): State<AccountsState>,
) -> Result<Json<ProfileResponse>> {
    let user = state
        .repos
        .users
        .get_by_id(ctx.user_id())
        .await?
        .ok_or_else(|| Error::NotFound("User not found".to_string()))?;

    Ok(Json(user.into()))
}

/// PUT|PATCH /profile - Update user profile
pub async fn update_profile(
    AuthUser(ctx): AuthUser,
    State(state): State<AccountsState>,
    ValidatedJson(request): ValidatedJson<UpdateProfileRequest>,
) -> Result<Json<ProfileResponse>> {
    request.reject_read_only()?;

    let mut user = state
        .repos
        .users
        .get_by_id(ctx.user_id())
        .await?
        .ok_or_else(|| Error::NotFound("User not found".to_string()))?;

    user.apply_profile_changes(request.into_changes())?;

    let updated = state
        .repos
        .users
        .update_profile(&user)
        .await?
        .ok_or_else(|| Error::NotFound("User not found".to_string()))?;

    tracing::info!(user_id = %updated.id, "Profile updated");

    Ok(Json(updated.into()))
}
