//! User repository

use crate::domain::entities::User;
use jobboard_common::{Error, Result};
use sqlx::PgPool;
use uuid::Uuid;

/// Column list for `users`, in `User` field order
pub(crate) const USER_COLUMNS: &str = "id, username, email, password_hash, role, \
    first_name, last_name, phone_number, bio, location, profile_picture, \
    company_name, company_website, skills, resume, created_at, updated_at";

/// Translate uniqueness violations on `users` into readable conflicts
fn map_user_constraint(err: sqlx::Error) -> Error {
    let constraint = err
        .as_database_error()
        .and_then(|db| db.constraint())
        .map(str::to_owned);
    match constraint.as_deref() {
        Some("users_username_key") => {
            Error::Conflict("A user with that username already exists.".to_string())
        }
        Some("users_email_key") => {
            Error::Conflict("A user with that email already exists.".to_string())
        }
        _ => Error::from(err),
    }
}

#[derive(Clone)]
pub struct UserRepository {
    pool: PgPool,
}

impl UserRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Get user by ID
    pub async fn get_by_id(&self, id: Uuid) -> Result<Option<User>> {
        let query = format!("SELECT {USER_COLUMNS} FROM users WHERE id = $1");
        let user = sqlx::query_as::<_, User>(&query)
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;
        Ok(user)
    }

    /// Check whether a username or email is already registered
    pub async fn find_taken(&self, username: &str, email: &str) -> Result<(bool, bool)> {
        let row: (bool, bool) = sqlx::query_as(
            r#"
            SELECT EXISTS(SELECT 1 FROM users WHERE username = $1),
                   EXISTS(SELECT 1 FROM users WHERE email = $2)
            "#,
        )
        .bind(username)
        .bind(email)
        .fetch_one(&self.pool)
        .await?;
        Ok(row)
    }

    /// Create a new user
    pub async fn create(&self, user: &User) -> Result<User> {
        let query = format!(
            "INSERT INTO users ({USER_COLUMNS}) \
             VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12, $13, $14, $15, $16, $17) \
             RETURNING {USER_COLUMNS}"
        );
        let row = sqlx::query_as::<_, User>(&query)
            .bind(user.id)
            .bind(&user.username)
            .bind(&user.email)
            .bind(&user.password_hash)
            .bind(user.role)
            .bind(&user.first_name)
            .bind(&user.last_name)
            .bind(&user.phone_number)
            .bind(&user.bio)
            .bind(&user.location)
            .bind(&user.profile_picture)
            .bind(&user.company_name)
            .bind(&user.company_website)
            .bind(&user.skills)
            .bind(&user.resume)
            .bind(user.created_at)
            .bind(user.updated_at)
            .fetch_one(&self.pool)
            .await
            .map_err(map_user_constraint)?;
        Ok(row)
    }

    /// Persist editable profile fields. Username, role and password are untouched.
    pub async fn update_profile(&self, user: &User) -> Result<Option<User>> {
        let query = format!(
            "UPDATE users SET \
                email = $2, first_name = $3, last_name = $4, phone_number = $5, \
                bio = $6, location = $7, profile_picture = $8, company_name = $9, \
                company_website = $10, skills = $11, resume = $12, updated_at = NOW() \
             WHERE id = $1 \
             RETURNING {USER_COLUMNS}"
        );
        let row = sqlx::query_as::<_, User>(&query)
            .bind(user.id)
            .bind(&user.email)
            .bind(&user.first_name)
            .bind(&user.last_name)
            .bind(&user.phone_number)
            .bind(&user.bio)
            .bind(&user.location)
            .bind(&user.profile_picture)
            .bind(&user.company_name)
            .bind(&user.company_website)
            .bind(&user.skills)
            .bind(&user.resume)
            .fetch_optional(&self.pool)
            .await
            .map_err(map_user_constraint)?;
        Ok(row)
    }
}
