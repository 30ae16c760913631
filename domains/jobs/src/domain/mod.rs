//! Domain layer for the Jobs domain

pub mod entities;
pub mod filters;
pub mod policy;
pub mod state;
