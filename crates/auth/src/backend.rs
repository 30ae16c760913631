//! Concrete authentication backend
//!
//! Wraps `PgPool` + `AuthConfig` and owns auth-specific SQL queries.
//! Uses runtime `sqlx::query_as` (not macros) so the identity read model
//! stays independent of the accounts domain's entity types.

use sqlx::PgPool;
use uuid::Uuid;

use crate::claims::TokenType;
use crate::config::AuthConfig;
use crate::context::AuthContext;
use crate::error::AuthError;
use crate::jwt::{issue_token_pair, validate_jwt_token, TokenPair};
use crate::password;
use crate::types::{AuthIdentity, AuthRole};

/// Row type for credential lookup (includes password_hash for verification)
#[derive(sqlx::FromRow)]
struct CredentialRow {
    id: Uuid,
    username: String,
    email: String,
    role: AuthRole,
    created_at: chrono::DateTime<chrono::Utc>,
    password_hash: String,
}

/// Concrete authentication backend.
///
/// Domain states expose this via `FromRef`:
/// ```ignore
/// impl FromRef<MyDomainState> for AuthBackend {
///     fn from_ref(state: &MyDomainState) -> Self {
///         state.auth.clone()
///     }
/// }
/// ```
#[derive(Clone)]
pub struct AuthBackend {
    pool: PgPool,
    config: AuthConfig,
}

impl AuthBackend {
    pub fn new(pool: PgPool, config: AuthConfig) -> Self {
        Self { pool, config }
    }

    /// Find user identity by ID
    pub async fn find_identity(&self, id: Uuid) -> Result<Option<AuthIdentity>, AuthError> {
        let user: Option<AuthIdentity> = sqlx::query_as(
            r#"
            SELECT id, username, email, role, created_at
            FROM users
            WHERE id = $1
            "#,
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| {
            tracing::error!(error = %e, user_id = %id, "Failed to load user");
            AuthError::UserLoadError
        })?;

        Ok(user)
    }

    /// Verify a username/password pair.
    ///
    /// Unknown usernames and wrong passwords are indistinguishable to the caller.
    pub async fn authenticate_credentials(
        &self,
        username: &str,
        candidate_password: &str,
    ) -> Result<AuthContext, AuthError> {
        let row: Option<CredentialRow> = sqlx::query_as(
            r#"
            SELECT id, username, email, role, created_at, password_hash
            FROM users
            WHERE username = $1
            "#,
        )
        .bind(username)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| {
            tracing::error!(error = %e, "Failed to load credentials");
            AuthError::UserLoadError
        })?;

        let Some(row) = row else {
            tracing::debug!(username = %username, "Login for unknown username");
            return Err(AuthError::InvalidCredentials);
        };

        if !password::verify_password(candidate_password, &row.password_hash).await? {
            tracing::debug!(user_id = %row.id, "Login with wrong password");
            return Err(AuthError::InvalidCredentials);
        }

        Ok(AuthContext::new(AuthIdentity {
            id: row.id,
            username: row.username,
            email: row.email,
            role: row.role,
            created_at: row.created_at,
        }))
    }

    /// Resolve an access token into an auth context, reloading the user.
    pub(crate) async fn authenticate_jwt(&self, token: &str) -> Result<AuthContext, AuthError> {
        let claims = validate_jwt_token(token, &self.config, TokenType::Access)?;
        let user_id = Uuid::parse_str(&claims.sub).map_err(|_| AuthError::InvalidUserId)?;

        let user = self
            .find_identity(user_id)
            .await?
            .ok_or(AuthError::UserNotFound)?;

        Ok(AuthContext::new(user))
    }

    /// Exchange a refresh token for a new pair
    pub async fn refresh(&self, refresh_token: &str) -> Result<(AuthContext, TokenPair), AuthError> {
        let claims = validate_jwt_token(refresh_token, &self.config, TokenType::Refresh)?;
        let user_id = Uuid::parse_str(&claims.sub).map_err(|_| AuthError::InvalidUserId)?;

        let user = self
            .find_identity(user_id)
            .await?
            .ok_or(AuthError::UserNotFound)?;

        let pair = issue_token_pair(&user, &self.config)?;
        Ok((AuthContext::new(user), pair))
    }

    /// Issue a token pair for an identity
    pub fn issue_tokens(&self, identity: &AuthIdentity) -> Result<TokenPair, AuthError> {
        issue_token_pair(identity, &self.config)
    }

    /// Hash a new password with the configured work factor
    pub async fn hash_password(&self, plain: &str) -> Result<String, AuthError> {
        password::hash_password(plain, self.config.bcrypt_cost).await
    }
}
