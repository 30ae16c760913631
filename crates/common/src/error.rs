//! Common error types and handling for Jobboard

use std::collections::BTreeMap;
use std::fmt;

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;
use serde_json::json;

/// Common result type
pub type Result<T> = std::result::Result<T, Error>;

/// Field-keyed validation messages, ordered by field name.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct FieldErrors(BTreeMap<String, Vec<String>>);

impl FieldErrors {
    pub fn new() -> Self {
        Self::default()
    }

    /// Single-field shorthand
    pub fn single(field: impl Into<String>, message: impl Into<String>) -> Self {
        let mut errors = Self::new();
        errors.add(field, message);
        errors
    }

    pub fn add(&mut self, field: impl Into<String>, message: impl Into<String>) {
        self.0.entry(field.into()).or_default().push(message.into());
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn get(&self, field: &str) -> Option<&[String]> {
        self.0.get(field).map(Vec::as_slice)
    }

    /// `Ok(())` when nothing was collected, otherwise `Error::InvalidFields`.
    pub fn into_result(self) -> Result<()> {
        if self.is_empty() {
            Ok(())
        } else {
            Err(Error::InvalidFields(self))
        }
    }
}

impl fmt::Display for FieldErrors {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut first = true;
        for (field, messages) in &self.0 {
            for message in messages {
                if !first {
                    write!(f, "; ")?;
                }
                write!(f, "{}: {}", field, message)?;
                first = false;
            }
        }
        Ok(())
    }
}

/// Common error type for the Jobboard application
#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("Unexpected error: {0}")]
    Unexpected(#[from] anyhow::Error),

    #[error("Database error: {0}")]
    Database(#[source] sqlx::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("Authentication error: {0}")]
    Authentication(String),

    #[error("Authorization error: {0}")]
    Authorization(String),

    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Validation failed: {0}")]
    InvalidFields(FieldErrors),

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Conflict: {0}")]
    Conflict(String),

    #[error("Business rule violated: {0}")]
    BusinessRule(String),

    #[error("Internal error: {0}")]
    Internal(String),
}

impl Error {
    /// Get the appropriate HTTP status code for this error
    pub fn status_code(&self) -> StatusCode {
        match self {
            Error::Authentication(_) => StatusCode::UNAUTHORIZED,
            Error::Authorization(_) => StatusCode::FORBIDDEN,
            Error::Validation(_) | Error::InvalidFields(_) | Error::BusinessRule(_) => {
                StatusCode::BAD_REQUEST
            }
            Error::NotFound(_) => StatusCode::NOT_FOUND,
            Error::Conflict(_) => StatusCode::CONFLICT,
            Error::Unexpected(_)
            | Error::Database(_)
            | Error::Serialization(_)
            | Error::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// Get the error code for API responses
    pub fn error_code(&self) -> &'static str {
        match self {
            Error::Unexpected(_) => "UNEXPECTED_ERROR",
            Error::Database(_) => "DATABASE_ERROR",
            Error::Serialization(_) => "SERIALIZATION_ERROR",
            Error::Authentication(_) => "AUTHENTICATION_ERROR",
            Error::Authorization(_) => "AUTHORIZATION_ERROR",
            Error::Validation(_) | Error::InvalidFields(_) => "VALIDATION_ERROR",
            Error::NotFound(_) => "NOT_FOUND",
            Error::Conflict(_) => "CONFLICT",
            Error::BusinessRule(_) => "BUSINESS_RULE_VIOLATION",
            Error::Internal(_) => "INTERNAL_ERROR",
        }
    }

    /// Client-facing message. Server-side failures never leak their cause.
    fn public_message(&self) -> String {
        match self {
            Error::Unexpected(_)
            | Error::Database(_)
            | Error::Serialization(_)
            | Error::Internal(_) => "Internal server error".to_string(),
            Error::Authentication(message)
            | Error::Authorization(message)
            | Error::Validation(message)
            | Error::NotFound(message)
            | Error::Conflict(message)
            | Error::BusinessRule(message) => message.clone(),
            Error::InvalidFields(fields) => fields.to_string(),
        }
    }
}

/// Storage constraint violations surface as domain errors, never as raw driver errors.
impl From<sqlx::Error> for Error {
    fn from(err: sqlx::Error) -> Self {
        if matches!(err, sqlx::Error::RowNotFound) {
            return Error::NotFound("Record not found".to_string());
        }

        if let Some(db_err) = err.as_database_error() {
            let constraint = db_err.constraint().unwrap_or("unknown").to_string();
            match db_err.kind() {
                sqlx::error::ErrorKind::UniqueViolation => {
                    tracing::debug!(constraint = %constraint, "Unique constraint violated");
                    return Error::Conflict(format!(
                        "Record already exists (constraint {})",
                        constraint
                    ));
                }
                sqlx::error::ErrorKind::ForeignKeyViolation => {
                    tracing::debug!(constraint = %constraint, "Foreign key constraint violated");
                    return Error::Validation(format!(
                        "Referenced record does not exist (constraint {})",
                        constraint
                    ));
                }
                sqlx::error::ErrorKind::CheckViolation => {
                    return Error::Validation(format!(
                        "Value rejected by constraint {}",
                        constraint
                    ));
                }
                _ => {}
            }
        }

        Error::Database(err)
    }
}

impl From<validator::ValidationErrors> for Error {
    fn from(errors: validator::ValidationErrors) -> Self {
        let mut fields = FieldErrors::new();
        for (field, field_errors) in errors.field_errors() {
            for error in field_errors {
                let message = match &error.message {
                    Some(message) => message.to_string(),
                    None => format!("invalid value ({})", error.code),
                };
                fields.add(field.to_string(), message);
            }
        }
        if fields.is_empty() {
            return Error::Validation(errors.to_string());
        }
        Error::InvalidFields(fields)
    }
}

impl IntoResponse for Error {
    fn into_response(self) -> Response {
        let status = self.status_code();
        let error_code = self.error_code();

        // Log internal errors with full context
        if matches!(status, StatusCode::INTERNAL_SERVER_ERROR) {
            tracing::error!(error = %self, "Internal server error");
        }

        let body = match &self {
            Error::InvalidFields(fields) => json!({
                "error": {
                    "code": error_code,
                    "message": self.public_message(),
                    "fields": fields,
                }
            }),
            _ => json!({
                "error": {
                    "code": error_code,
                    "message": self.public_message(),
                }
            }),
        };

        (status, Json(body)).into_response()
    }
}
