//! Authorization rules
//!
//! Pure decisions over (actor, action, resource). Handlers load the
//! records, ask here, and only then touch storage.

use chrono::NaiveDate;
use jobboard_auth::AuthContext;
use jobboard_common::Error;

use super::entities::{ApplicationDetail, Job};

/// Operations on a posting
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum JobAction {
    List,
    Retrieve,
    Create,
    Update,
    Delete,
}

impl JobAction {
    pub fn is_read_only(&self) -> bool {
        matches!(self, Self::List | Self::Retrieve)
    }
}

/// Why an action was refused
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Denial {
    Unauthenticated,
    EmployerOnly,
    JobSeekerOnly,
    NotOwner,
    NotApplicant,
    AlreadyApplied,
    JobExpired,
    /// The record exists but the actor may not know that
    NotVisible,
}

impl From<Denial> for Error {
    fn from(denial: Denial) -> Self {
        match denial {
            Denial::Unauthenticated => {
                Error::Authentication("Authentication credentials were not provided.".to_string())
            }
            Denial::EmployerOnly => {
                Error::Authorization("Only employers can perform this action.".to_string())
            }
            Denial::JobSeekerOnly => {
                Error::Authorization("Only job seekers can apply for jobs.".to_string())
            }
            Denial::NotOwner => {
                Error::Authorization("Only the employer who posted this job can do that.".to_string())
            }
            Denial::NotApplicant => {
                Error::Authorization("Only the applicant can change the application.".to_string())
            }
            Denial::AlreadyApplied => {
                Error::Conflict("You have already applied for this job.".to_string())
            }
            Denial::JobExpired => {
                Error::BusinessRule("This job posting has expired.".to_string())
            }
            Denial::NotVisible => Error::NotFound("Not found.".to_string()),
        }
    }
}

/// Reads are open to anyone. Mutations need an employer, and updates or
/// deletes need the employer who owns `job`.
pub fn can_manage_job(
    actor: Option<&AuthContext>,
    action: JobAction,
    job: Option<&Job>,
) -> Result<(), Denial> {
    if action.is_read_only() {
        return Ok(());
    }
    let actor = actor.ok_or(Denial::Unauthenticated)?;
    if !actor.is_employer() {
        return Err(Denial::EmployerOnly);
    }
    match (action, job) {
        (JobAction::Update | JobAction::Delete, Some(job)) if !job.is_owned_by(actor.user_id()) => {
            Err(Denial::NotOwner)
        }
        _ => Ok(()),
    }
}

/// Authenticated job seeker, first application, posting still open
pub fn can_apply(
    actor: Option<&AuthContext>,
    job: &Job,
    already_applied: bool,
    today: NaiveDate,
) -> Result<(), Denial> {
    let actor = actor.ok_or(Denial::Unauthenticated)?;
    if !actor.is_job_seeker() {
        return Err(Denial::JobSeekerOnly);
    }
    if already_applied {
        return Err(Denial::AlreadyApplied);
    }
    if job.is_expired_on(today) {
        return Err(Denial::JobExpired);
    }
    Ok(())
}

/// Any signed-in user may bookmark
pub fn can_toggle_save(actor: Option<&AuthContext>) -> Result<(), Denial> {
    actor.map(|_| ()).ok_or(Denial::Unauthenticated)
}

/// The applicant and the posting's employer
pub fn can_view_application(actor: &AuthContext, application: &ApplicationDetail) -> Result<(), Denial> {
    if actor.is_user(application.application.applicant_id) || actor.is_user(application.employer_id)
    {
        Ok(())
    } else {
        Err(Denial::NotVisible)
    }
}

/// Status changes belong to the posting's employer
pub fn can_review_application(
    actor: &AuthContext,
    application: &ApplicationDetail,
) -> Result<(), Denial> {
    can_view_application(actor, application)?;
    if actor.is_user(application.employer_id) {
        Ok(())
    } else {
        Err(Denial::NotOwner)
    }
}

/// Cover letter and resume belong to the applicant
pub fn can_amend_application(
    actor: &AuthContext,
    application: &ApplicationDetail,
) -> Result<(), Denial> {
    can_view_application(actor, application)?;
    if actor.is_user(application.application.applicant_id) {
        Ok(())
    } else {
        Err(Denial::NotApplicant)
    }
}
