//! JWT issuance, validation, and token extraction helpers

use axum::http::HeaderValue;
use chrono::Utc;
use jsonwebtoken::{decode, encode, Algorithm, DecodingKey, EncodingKey, Header, Validation};
use serde::Serialize;
use uuid::Uuid;

use crate::claims::{TokenClaims, TokenType};
use crate::config::AuthConfig;
use crate::error::AuthError;
use crate::types::AuthIdentity;

/// Access/refresh pair returned by register, login, and refresh
#[derive(Debug, Clone, Serialize)]
pub struct TokenPair {
    pub access: String,
    pub refresh: String,
    pub token_type: &'static str,
    /// Access token lifetime in seconds
    pub expires_in: i64,
}

fn sign(
    identity: &AuthIdentity,
    token_type: TokenType,
    config: &AuthConfig,
) -> Result<String, AuthError> {
    let now = Utc::now();
    let ttl = match token_type {
        TokenType::Access => config.access_ttl,
        TokenType::Refresh => config.refresh_ttl,
    };

    let claims = TokenClaims {
        sub: identity.id.to_string(),
        username: identity.username.clone(),
        role: identity.role,
        token_type,
        jti: Uuid::new_v4().to_string(),
        iat: now.timestamp() as u64,
        exp: (now + ttl).timestamp() as u64,
        iss: config.issuer.clone(),
    };

    let key = EncodingKey::from_secret(config.jwt_secret.as_ref());
    encode(&Header::new(Algorithm::HS256), &claims, &key).map_err(|e| {
        tracing::error!(error = %e, user_id = %identity.id, "Failed to sign token");
        AuthError::TokenIssueFailed
    })
}

/// Issue a fresh access/refresh pair for an identity
pub(crate) fn issue_token_pair(
    identity: &AuthIdentity,
    config: &AuthConfig,
) -> Result<TokenPair, AuthError> {
    Ok(TokenPair {
        access: sign(identity, TokenType::Access, config)?,
        refresh: sign(identity, TokenType::Refresh, config)?,
        token_type: "Bearer",
        expires_in: config.access_ttl.num_seconds(),
    })
}

/// Validate a JWT and require it to be of the expected type
pub(crate) fn validate_jwt_token(
    token: &str,
    config: &AuthConfig,
    expected: TokenType,
) -> Result<TokenClaims, AuthError> {
    let mut validation = Validation::new(Algorithm::HS256);
    validation.validate_aud = false;

    if let Some(iss) = &config.issuer {
        validation.set_issuer(&[iss]);
    }

    let decoding_key = DecodingKey::from_secret(config.jwt_secret.as_ref());

    let token_data = decode::<TokenClaims>(token, &decoding_key, &validation).map_err(|e| {
        tracing::debug!(error = %e, "JWT validation failed");
        AuthError::InvalidToken
    })?;

    if token_data.claims.token_type != expected {
        tracing::debug!(
            expected = ?expected,
            actual = ?token_data.claims.token_type,
            "JWT has wrong token type"
        );
        return Err(AuthError::InvalidToken);
    }

    Ok(token_data.claims)
}

/// Extract bearer token from Authorization header
pub(crate) fn extract_bearer_token(header: &HeaderValue) -> Result<String, AuthError> {
    let header_str = header
        .to_str()
        .map_err(|_| AuthError::InvalidAuthorizationFormat)?;

    match header_str.strip_prefix("Bearer ") {
        Some(token) if !token.trim().is_empty() => Ok(token.trim().to_string()),
        _ => Err(AuthError::InvalidAuthorizationFormat),
    }
}
