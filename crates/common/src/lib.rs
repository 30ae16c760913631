//! Shared utilities, configuration, and error handling for Jobboard
//!
//! This crate provides common functionality used across the Jobboard application:
//! - Configuration management following 12-factor principles
//! - Error types and their HTTP mapping
//! - Request extractors (validated JSON, pagination)
//! - State machine error type

pub mod config;
pub mod error;
pub mod extractors;
pub mod state;

pub use error::{Error, FieldErrors, Result};
pub use extractors::{JsonBody, Pagination, PathParam, QueryParams, ValidatedJson};
pub use state::StateError;
