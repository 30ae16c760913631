//! Password hashing
//!
//! bcrypt is CPU-bound, so both directions run on the blocking pool.

use crate::error::AuthError;

pub(crate) async fn hash_password(password: &str, cost: u32) -> Result<String, AuthError> {
    let password = password.to_owned();
    tokio::task::spawn_blocking(move || bcrypt::hash(password, cost))
        .await
        .map_err(|e| {
            tracing::error!(error = %e, "Password hashing task failed");
            AuthError::PasswordHashFailed
        })?
        .map_err(|e| {
            tracing::error!(error = %e, "Password hashing failed");
            AuthError::PasswordHashFailed
        })
}

pub(crate) async fn verify_password(password: &str, hash: &str) -> Result<bool, AuthError> {
    let password = password.to_owned();
    let hash = hash.to_owned();
    tokio::task::spawn_blocking(move || bcrypt::verify(password, &hash))
        .await
        .map_err(|e| {
            tracing::error!(error = %e, "Password verification task failed");
            AuthError::PasswordHashFailed
        })?
        .map_err(|e| {
            // A malformed stored hash never authenticates
            tracing::warn!(error = %e, "Stored password hash could not be verified");
            AuthError::InvalidCredentials
        })
}
