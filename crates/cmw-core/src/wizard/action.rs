use std::fmt;

use serde::{Deserialize, Serialize};

use crate::contact::ContactInfo;
use crate::credentials::Credentials;

/// Identifies one verification attempt within a session.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct AttemptId(pub u64);

impl fmt::Display for AttemptId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Snapshot handed to the verification client for one attempt.
#[derive(Debug)]
pub struct VerificationRequest {
    pub attempt: AttemptId,
    pub contact: ContactInfo,
    pub credentials: Credentials,
}

/// Side-effects produced by state transitions.
#[derive(Debug)]
pub enum WizardAction {
    /// Ask the host page for contact data.
    RequestContactData,
    /// Run the verification client; its result comes back as `VerificationSettled`.
    Verify(VerificationRequest),
    /// Start the delayed funnel advance after the success screen appears.
    ScheduleAutoAdvance,
    /// Drop any pending delayed funnel advance.
    CancelAutoAdvance,
    /// Post "go to next step" to the host.
    NotifyFunnelAdvance,
}

impl WizardAction {
    /// Stable name for logs; never includes the request payload.
    pub fn name(&self) -> &'static str {
        match self {
            WizardAction::RequestContactData => "RequestContactData",
            WizardAction::Verify(_) => "Verify",
            WizardAction::ScheduleAutoAdvance => "ScheduleAutoAdvance",
            WizardAction::CancelAutoAdvance => "CancelAutoAdvance",
            WizardAction::NotifyFunnelAdvance => "NotifyFunnelAdvance",
        }
    }
}
