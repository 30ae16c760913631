//! HTTP handlers for the Jobs domain

pub mod applications;
pub mod categories;
pub mod jobs;
pub mod saved_jobs;

use serde::{Deserialize, Deserializer, Serialize};

/// Page of results with the total match count
#[derive(Debug, Serialize)]
pub struct Paginated<T> {
    pub count: i64,
    pub results: Vec<T>,
}

impl<T> Paginated<T> {
    pub fn new<U: Into<T>>(count: i64, rows: Vec<U>) -> Self {
        Self {
            count,
            results: rows.into_iter().map(Into::into).collect(),
        }
    }
}

/// Distinguish an absent field (`None`) from an explicit `null` (`Some(None)`).
/// Pair with `#[serde(default)]`.
pub(crate) fn double_option<'de, T, D>(deserializer: D) -> Result<Option<Option<T>>, D::Error>
where
    T: Deserialize<'de>,
    D: Deserializer<'de>,
{
    Option::<T>::deserialize(deserializer).map(Some)
}
