//! Application review workflow
//!
//! Applications start `pending`. An employer decision moves them to one of
//! the decided states, and a decision can be revised to any other decided
//! state (or re-asserted). Nothing moves an application back to `pending`.

use jobboard_common::StateError;

use super::entities::ApplicationStatus;

/// Employer decisions that drive the workflow
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ApplicationEvent {
    MarkReviewed,
    Shortlist,
    Reject,
    Accept,
}

impl ApplicationEvent {
    /// Status the event leads to
    pub fn target(&self) -> ApplicationStatus {
        match self {
            Self::MarkReviewed => ApplicationStatus::Reviewed,
            Self::Shortlist => ApplicationStatus::Shortlisted,
            Self::Reject => ApplicationStatus::Rejected,
            Self::Accept => ApplicationStatus::Accepted,
        }
    }

    /// Event for a requested status; `pending` has none
    pub fn for_target(status: ApplicationStatus) -> Option<Self> {
        match status {
            ApplicationStatus::Pending => None,
            ApplicationStatus::Reviewed => Some(Self::MarkReviewed),
            ApplicationStatus::Shortlisted => Some(Self::Shortlist),
            ApplicationStatus::Rejected => Some(Self::Reject),
            ApplicationStatus::Accepted => Some(Self::Accept),
        }
    }
}

impl std::fmt::Display for ApplicationEvent {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::MarkReviewed => write!(f, "mark_reviewed"),
            Self::Shortlist => write!(f, "shortlist"),
            Self::Reject => write!(f, "reject"),
            Self::Accept => write!(f, "accept"),
        }
    }
}

const DECIDED: &[ApplicationStatus] = &[
    ApplicationStatus::Reviewed,
    ApplicationStatus::Shortlisted,
    ApplicationStatus::Rejected,
    ApplicationStatus::Accepted,
];

/// Application state machine
pub struct ApplicationStateMachine;

impl ApplicationStateMachine {
    /// All states reachable from `current`
    pub fn valid_transitions(_current: ApplicationStatus) -> &'static [ApplicationStatus] {
        DECIDED
    }

    /// Attempt a transition
    pub fn transition(
        current: ApplicationStatus,
        event: ApplicationEvent,
    ) -> Result<ApplicationStatus, StateError> {
        let next = event.target();
        if !Self::valid_transitions(current).contains(&next) {
            return Err(StateError::InvalidTransition {
                from: current.to_string(),
                to: next.to_string(),
                event: event.to_string(),
            });
        }
        Ok(next)
    }

    /// Move to a requested status
    pub fn apply_status(
        current: ApplicationStatus,
        target: ApplicationStatus,
    ) -> Result<ApplicationStatus, StateError> {
        let event =
            ApplicationEvent::for_target(target).ok_or_else(|| StateError::InvalidTransition {
                from: current.to_string(),
                to: target.to_string(),
                event: "status_update".to_string(),
            })?;
        Self::transition(current, event)
    }

    /// Check if a transition is valid without performing it
    pub fn can_transition(current: ApplicationStatus, event: &ApplicationEvent) -> bool {
        Self::transition(current, *event).is_ok()
    }
}
