//! Axum extractors for authentication
//!
//! Generic over any state `S` where `AuthBackend: FromRef<S>`, so each
//! domain router keeps its own state type.

use axum::{
    extract::{FromRef, FromRequestParts},
    http::{header::AUTHORIZATION, request::Parts},
};

use crate::backend::AuthBackend;
use crate::context::AuthContext;
use crate::error::AuthError;
use crate::jwt::extract_bearer_token;

/// Resolve the bearer token, if any, into a context.
async fn resolve_bearer<S>(parts: &Parts, state: &S) -> Result<Option<AuthContext>, AuthError>
where
    AuthBackend: FromRef<S>,
{
    let Some(header) = parts.headers.get(AUTHORIZATION) else {
        return Ok(None);
    };
    let token = extract_bearer_token(header)?;
    let context = AuthBackend::from_ref(state).authenticate_jwt(&token).await?;
    Ok(Some(context))
}

/// Caller with a valid access token
#[derive(Debug)]
pub struct AuthUser(pub AuthContext);

impl<S> FromRequestParts<S> for AuthUser
where
    AuthBackend: FromRef<S>,
    S: Send + Sync,
{
    type Rejection = AuthError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        resolve_bearer(parts, state)
            .await?
            .map(AuthUser)
            .ok_or(AuthError::MissingAuthorization)
    }
}

/// Anonymous callers become `None`; a bad token is still a 401.
#[derive(Debug)]
pub struct MaybeAuthUser(pub Option<AuthContext>);

impl<S> FromRequestParts<S> for MaybeAuthUser
where
    AuthBackend: FromRef<S>,
    S: Send + Sync,
{
    type Rejection = AuthError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        Ok(MaybeAuthUser(resolve_bearer(parts, state).await?))
    }
}

/// Authenticated employer; job seekers get 403
#[derive(Debug)]
pub struct EmployerUser(pub AuthContext);

impl<S> FromRequestParts<S> for EmployerUser
where
    AuthBackend: FromRef<S>,
    S: Send + Sync,
{
    type Rejection = AuthError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let AuthUser(context) = AuthUser::from_request_parts(parts, state).await?;
        if !context.is_employer() {
            return Err(AuthError::EmployerRequired);
        }
        Ok(EmployerUser(context))
    }
}
