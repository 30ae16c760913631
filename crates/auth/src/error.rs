//! Authentication errors

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;

/// Authentication error
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AuthError {
    MissingAuthorization,
    InvalidAuthorizationFormat,
    InvalidToken,
    UserNotFound,
    UserLoadError,
    InvalidUserId,
    InvalidCredentials,
    TokenIssueFailed,
    PasswordHashFailed,
    /// Route restricted to employer accounts
    EmployerRequired,
}

impl AuthError {
    fn parts(&self) -> (StatusCode, &'static str, &'static str) {
        match self {
            AuthError::MissingAuthorization => (
                StatusCode::UNAUTHORIZED,
                "MISSING_AUTHORIZATION",
                "Authorization header required",
            ),
            AuthError::InvalidAuthorizationFormat => (
                StatusCode::UNAUTHORIZED,
                "INVALID_AUTHORIZATION",
                "Invalid authorization header format",
            ),
            AuthError::InvalidToken => (
                StatusCode::UNAUTHORIZED,
                "INVALID_TOKEN",
                "Invalid or expired token",
            ),
            AuthError::UserNotFound => {
                (StatusCode::UNAUTHORIZED, "USER_NOT_FOUND", "User not found")
            }
            AuthError::UserLoadError => (
                StatusCode::INTERNAL_SERVER_ERROR,
                "USER_LOAD_ERROR",
                "Failed to load user",
            ),
            AuthError::InvalidUserId => (
                StatusCode::UNAUTHORIZED,
                "INVALID_TOKEN",
                "Invalid user ID in token",
            ),
            AuthError::InvalidCredentials => (
                StatusCode::UNAUTHORIZED,
                "INVALID_CREDENTIALS",
                "Invalid username or password",
            ),
            AuthError::TokenIssueFailed => (
                StatusCode::INTERNAL_SERVER_ERROR,
                "TOKEN_ISSUE_ERROR",
                "Failed to issue tokens",
            ),
            AuthError::PasswordHashFailed => (
                StatusCode::INTERNAL_SERVER_ERROR,
                "PASSWORD_HASH_ERROR",
                "Failed to process password",
            ),
            AuthError::EmployerRequired => (
                StatusCode::FORBIDDEN,
                "EMPLOYER_REQUIRED",
                "Only employer accounts can perform this action",
            ),
        }
    }

    pub fn status_code(&self) -> StatusCode {
        self.parts().0
    }
}

impl std::fmt::Display for AuthError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.parts().2)
    }
}

impl std::error::Error for AuthError {}

impl IntoResponse for AuthError {
    fn into_response(self) -> Response {
        let (status, code, message) = self.parts();

        let body = Json(json!({
            "error": {
                "code": code,
                "message": message,
            }
        }));

        (status, body).into_response()
    }
}

impl From<AuthError> for jobboard_common::Error {
    fn from(err: AuthError) -> Self {
        let message = err.to_string();
        match err.status_code() {
            StatusCode::UNAUTHORIZED => jobboard_common::Error::Authentication(message),
            StatusCode::FORBIDDEN => jobboard_common::Error::Authorization(message),
            _ => jobboard_common::Error::Internal(message),
        }
    }
}
