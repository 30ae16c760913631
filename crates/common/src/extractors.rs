//! Request extractors shared by the domain routers

use axum::{
    extract::{
        path::ErrorKind,
        rejection::{JsonRejection, PathRejection, QueryRejection},
        FromRequest, FromRequestParts, Path, Query, RawPathParams, Request,
    },
    http::request::Parts,
    Json,
};
use serde::{de::DeserializeOwned, Deserialize};
use validator::Validate;

use crate::{Error, FieldErrors};

const DEFAULT_PAGE_SIZE: i64 = 50;
const MAX_PAGE_SIZE: i64 = 100;

/// `?limit=&offset=` window for list endpoints
#[derive(Debug, Clone, Copy, Default, Deserialize)]
pub struct Pagination {
    #[serde(default)]
    pub offset: Option<i64>,
    #[serde(default)]
    pub limit: Option<i64>,
}

impl Pagination {
    pub fn offset(&self) -> i64 {
        self.offset.unwrap_or(0).max(0)
    }

    /// Page size, 50 when absent, clamped to 1..=100
    pub fn limit(&self) -> i64 {
        self.limit
            .unwrap_or(DEFAULT_PAGE_SIZE)
            .clamp(1, MAX_PAGE_SIZE)
    }
}

/// Malformed bodies become a 400 keyed under `body`, matching the
/// field-keyed shape of every other input error.
impl From<JsonRejection> for Error {
    fn from(rejection: JsonRejection) -> Self {
        let message = match &rejection {
            JsonRejection::MissingJsonContentType(_) => {
                "Expected request with `Content-Type: application/json`".to_string()
            }
            JsonRejection::JsonSyntaxError(_) => "Malformed JSON body".to_string(),
            _ => rejection.body_text(),
        };
        Error::InvalidFields(FieldErrors::single("body", message))
    }
}

/// Query-string failures are keyed by the offending parameter when serde
/// names it, otherwise under `query`.
impl From<QueryRejection> for Error {
    fn from(rejection: QueryRejection) -> Self {
        let text = rejection.body_text();
        let detail = text
            .strip_prefix("Failed to deserialize query string: ")
            .unwrap_or(&text);
        let (field, message) = match detail.split_once(": ") {
            Some((field, message))
                if !field.is_empty()
                    && field.chars().all(|c| c.is_ascii_alphanumeric() || c == '_') =>
            {
                (field, message)
            }
            _ => ("query", detail),
        };
        Error::InvalidFields(FieldErrors::single(field, message))
    }
}

fn path_error_key(kind: &ErrorKind) -> Option<String> {
    match kind {
        ErrorKind::ParseErrorAtKey { key, .. }
        | ErrorKind::DeserializeError { key, .. }
        | ErrorKind::InvalidUtf8InPathParam { key } => Some(key.clone()),
        _ => None,
    }
}

/// Unparseable path segments are keyed by the route parameter name.
impl From<PathRejection> for Error {
    fn from(rejection: PathRejection) -> Self {
        match rejection {
            PathRejection::FailedToDeserializePathParams(err) => {
                let field = path_error_key(err.kind()).unwrap_or_else(|| "path".to_string());
                Error::InvalidFields(FieldErrors::single(field, err.body_text()))
            }
            other => Error::Internal(other.body_text()),
        }
    }
}

/// `Query` with the structured error body
#[derive(Debug)]
pub struct QueryParams<T>(pub T);

impl<T, S> FromRequestParts<S> for QueryParams<T>
where
    T: DeserializeOwned,
    S: Send + Sync,
{
    type Rejection = Error;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let Query(value) = Query::<T>::from_request_parts(parts, state).await?;
        Ok(Self(value))
    }
}

/// `Path` with the structured error body
#[derive(Debug)]
pub struct PathParam<T>(pub T);

impl<T, S> FromRequestParts<S> for PathParam<T>
where
    T: DeserializeOwned + Send,
    S: Send + Sync,
{
    type Rejection = Error;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        match Path::<T>::from_request_parts(parts, state).await {
            Ok(Path(value)) => Ok(Self(value)),
            Err(PathRejection::FailedToDeserializePathParams(err)) => {
                // Scalar targets lose the key; a single-parameter route still names it
                let field = match path_error_key(err.kind()) {
                    Some(key) => key,
                    None => RawPathParams::from_request_parts(parts, state)
                        .await
                        .ok()
                        .and_then(|raw| {
                            let mut names = raw.iter().map(|(name, _)| name.to_string());
                            match (names.next(), names.next()) {
                                (Some(name), None) => Some(name),
                                _ => None,
                            }
                        })
                        .unwrap_or_else(|| "path".to_string()),
                };
                Err(Error::InvalidFields(FieldErrors::single(field, err.body_text())))
            }
            Err(other) => Err(other.into()),
        }
    }
}

/// Deserializes then validates the payload; both failures are 400s.
#[derive(Debug)]
pub struct ValidatedJson<T>(pub T);

impl<T, S> FromRequest<S> for ValidatedJson<T>
where
    T: DeserializeOwned + Validate,
    S: Send + Sync,
{
    type Rejection = Error;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let JsonBody(value) = JsonBody::<T>::from_request(req, state).await?;
        value.validate()?;
        Ok(Self(value))
    }
}

/// Deserialize only. Handlers that authorize before validating call
/// `validate()` themselves.
#[derive(Debug)]
pub struct JsonBody<T>(pub T);

impl<T, S> FromRequest<S> for JsonBody<T>
where
    T: DeserializeOwned,
    S: Send + Sync,
{
    type Rejection = Error;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let Json(value) = Json::<T>::from_request(req, state).await?;
        Ok(Self(value))
    }
}
