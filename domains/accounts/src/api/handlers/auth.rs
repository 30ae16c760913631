//! Registration, login, and token refresh handlers

use axum::{extract::State, http::StatusCode, Json};
use jobboard_auth::TokenPair;
use jobboard_common::{Error, FieldErrors, Result, ValidatedJson};
use serde::{Deserialize, Serialize};
use validator::Validate;

use super::profile::ProfileResponse;
use crate::api::middleware::AccountsState;
use crate::domain::entities::{normalize_email, ProfileChanges, User, UserRole};
use crate::domain::validation::{password_problems, validate_username};

/// Profile plus a fresh token pair
#[derive(Debug, Serialize)]
pub struct AuthResponse {
    pub user: ProfileResponse,
    #[serde(flatten)]
    pub tokens: TokenPair,
}

/// Request for account registration
#[derive(Debug, Deserialize, Validate)]
pub struct RegisterRequest {
    #[validate(custom(function = "validate_username"))]
    pub username: String,

    #[validate(email)]
    pub email: String,

    pub password: String,

    pub password2: String,

    #[serde(default, alias = "user_type")]
    pub role: UserRole,

    #[validate(length(max = 150))]
    pub first_name: Option<String>,

    #[validate(length(max = 150))]
    pub last_name: Option<String>,

    #[validate(length(max = 20))]
    pub phone_number: Option<String>,

    #[validate(length(max = 255))]
    pub location: Option<String>,

    #[validate(length(max = 255))]
    pub company_name: Option<String>,

    #[validate(url)]
    pub company_website: Option<String>,

    #[validate(length(max = 5000))]
    pub skills: Option<String>,

    #[validate(length(max = 500))]
    pub resume: Option<String>,
}

impl RegisterRequest {
    /// Password confirmation and strength rules, keyed under `password`
    fn check_password(&self) -> Result<()> {
        let mut errors = FieldErrors::new();
        if self.password != self.password2 {
            errors.add("password", "Password fields didn't match.");
        }
        for problem in password_problems(&self.password, &self.username) {
            errors.add("password", problem);
        }
        errors.into_result()
    }

    fn profile_changes(&self) -> ProfileChanges {
        ProfileChanges {
            first_name: self.first_name.clone(),
            last_name: self.last_name.clone(),
            phone_number: self.phone_number.clone(),
            location: self.location.clone(),
            company_name: self.company_name.clone(),
            company_website: self.company_website.clone(),
            skills: self.skills.clone(),
            resume: self.resume.clone(),
            ..Default::default()
        }
    }
}

/// Request for username/password login
#[derive(Debug, Deserialize, Validate)]
pub struct LoginRequest {
    #[validate(length(min = 1, message = "This field may not be blank."))]
    pub username: String,

    #[validate(length(min = 1, message = "This field may not be blank."))]
    pub password: String,
}

/// Request for exchanging a refresh token
#[derive(Debug, Deserialize, Validate)]
pub struct RefreshRequest {
    #[validate(length(min = 1, message = "This field may not be blank."))]
    pub refresh: String,
}

/// POST /register - Create an account and issue a token pair
pub async fn register(
    State(state): State<AccountsState>,
    ValidatedJson(request): ValidatedJson<RegisterRequest>,
) -> Result<(StatusCode, Json<AuthResponse>)> {
    request.check_password()?;

    let changes = request.profile_changes();
    changes.check_role(request.role)?;

    let email = normalize_email(&request.email);
    let (username_taken, email_taken) = state
        .repos
        .users
        .find_taken(&request.username, &email)
        .await?;
    if username_taken {
        return Err(Error::Conflict(
            "A user with that username already exists.".to_string(),
        ));
    }
    if email_taken {
        return Err(Error::Conflict(
            "A user with that email already exists.".to_string(),
        ));
    }

    let password_hash = state.auth.hash_password(&request.password).await?;

    let mut user = User::new(request.username, email, password_hash, request.role)?;
    user.apply_profile_changes(changes)?;

    // Unique constraints still guard a concurrent registration
    let user = state.repos.users.create(&user).await?;
    let tokens = state.auth.issue_tokens(&user.identity())?;

    tracing::info!(user_id = %user.id, role = ?user.role, "User registered");

    Ok((
        StatusCode::CREATED,
        Json(AuthResponse {
            user: user.into(),
            tokens,
        }),
    ))
}

/// POST /login - Verify credentials and issue a token pair
pub async fn login(
    State(state): State<AccountsState>,
    ValidatedJson(request): ValidatedJson<LoginRequest>,
) -> Result<Json<AuthResponse>> {
    let ctx = state
        .auth
        .authenticate_credentials(&request.username, &request.password)
        .await?;

    let user = state
        .repos
        .users
        .get_by_id(ctx.user_id())
        .await?
        .ok_or_else(|| Error::Authentication("Invalid username or password".to_string()))?;

    let tokens = state.auth.issue_tokens(&ctx.user)?;

    tracing::info!(user_id = %user.id, "User logged in");

    Ok(Json(AuthResponse {
        user: user.into(),
        tokens,
    }))
}

/// POST /token/refresh - Exchange a refresh token for a new pair
pub async fn refresh(
    State(state): State<AccountsState>,
    ValidatedJson(request): ValidatedJson<RefreshRequest>,
) -> Result<Json<TokenPair>> {
    let (ctx, tokens) = state.auth.refresh(&request.refresh).await?;

    tracing::debug!(user_id = %ctx.user_id(), "Token pair refreshed");

    Ok(Json(tokens))
}
