//! Jobs domain: categories, postings, applications, saved jobs

pub mod api;
pub mod domain;
pub mod repository;

// Re-export domain types at the crate root for convenience
pub use domain::entities::*;
pub use domain::policy::{Denial, JobAction};
pub use domain::state::{ApplicationEvent, ApplicationStateMachine};
pub use repository::JobsRepositories;

// Re-export API types
pub use api::routes;
pub use api::JobsState;
