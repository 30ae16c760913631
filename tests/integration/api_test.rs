//! HTTP-level integration tests driven through the composed router.
//!
//! Tests in `routing` need no database. Everything else is `#[ignore]`d and
//! runs against `TEST_DATABASE_URL` with `cargo test -- --ignored`.

#![allow(dead_code)]

mod accounts;
mod applications;
mod common;
mod jobs;
mod routing;
mod saved_jobs;
