//! Common state machine error types

use thiserror::Error;

/// Errors that can occur during state transitions
#[derive(Debug, Error, Clone, PartialEq)]
pub enum StateError {
    #[error("Invalid transition: cannot transition from {from} to {to} via {event}")]
    InvalidTransition {
        from: String,
        to: String,
        event: String,
    },

    #[error("Guard condition failed: {0}")]
    GuardFailed(String),
}

impl From<StateError> for crate::Error {
    fn from(err: StateError) -> Self {
        match err {
            StateError::InvalidTransition { from, to, .. } => crate::Error::Validation(format!(
                "Invalid status transition from '{}' to '{}'",
                from, to
            )),
            StateError::GuardFailed(msg) => crate::Error::Validation(msg),
        }
    }
}
