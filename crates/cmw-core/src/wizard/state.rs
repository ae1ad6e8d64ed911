use std::collections::BTreeSet;

use serde::Serialize;

use crate::config::WizardConfig;
use crate::contact::{ContactField, ContactInfo};
use crate::credentials::{CredentialField, Credentials, Provider};
use crate::verification::{ReportData, VerificationError, VerificationOutcome};
use crate::wizard::view::{render, WizardView};
use crate::wizard::AttemptId;

/// The three screens of the wizard, numbered 1..=3.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum WizardStep {
    ContactEntry,
    CredentialEntry,
    Result,
}

impl WizardStep {
    pub fn number(&self) -> u8 {
        match self {
            WizardStep::ContactEntry => 1,
            WizardStep::CredentialEntry => 2,
            WizardStep::Result => 3,
        }
    }
}

/// Outcomes that end the flow on step 3.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TerminalOutcome {
    Success { report: ReportData, message: String },
    AccountNotFound { error: VerificationError },
}

impl TerminalOutcome {
    pub fn to_outcome(&self) -> VerificationOutcome {
        match self {
            TerminalOutcome::Success { report, message } => VerificationOutcome::Success {
                report: report.clone(),
                message: message.clone(),
            },
            TerminalOutcome::AccountNotFound { error } => VerificationOutcome::AccountNotFound {
                error: error.clone(),
            },
        }
    }
}

/// Where the wizard is. Step 3 always carries its outcome; step 2 carries the
/// transient inline error and the in-flight attempt, if any.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum Phase {
    #[default]
    ContactEntry,
    CredentialEntry {
        inline_error: Option<VerificationError>,
        in_flight: Option<AttemptId>,
    },
    Result(TerminalOutcome),
}

impl Phase {
    pub(crate) fn credential_entry() -> Self {
        Phase::CredentialEntry {
            inline_error: None,
            in_flight: None,
        }
    }
}

/// Wizard state. Fields are only changed by [`crate::wizard::WizardStateMachine`].
#[derive(Debug, Default)]
pub struct WizardState {
    pub(crate) phase: Phase,
    pub(crate) contact: ContactInfo,
    pub(crate) credentials: Credentials,
    pub(crate) contact_touched: BTreeSet<ContactField>,
    pub(crate) credentials_touched: BTreeSet<CredentialField>,
    pub(crate) show_password: bool,
    pub(crate) funnel_advanced: bool,
    pub(crate) attempts: u64,
}

impl WizardState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn phase(&self) -> &Phase {
        &self.phase
    }

    pub fn step(&self) -> WizardStep {
        match self.phase {
            Phase::ContactEntry => WizardStep::ContactEntry,
            Phase::CredentialEntry { .. } => WizardStep::CredentialEntry,
            Phase::Result(_) => WizardStep::Result,
        }
    }

    pub fn contact(&self) -> &ContactInfo {
        &self.contact
    }

    pub fn credentials(&self) -> &Credentials {
        &self.credentials
    }

    pub fn contact_touched(&self) -> &BTreeSet<ContactField> {
        &self.contact_touched
    }

    pub fn credentials_touched(&self) -> &BTreeSet<CredentialField> {
        &self.credentials_touched
    }

    pub fn show_password(&self) -> bool {
        self.show_password
    }

    pub fn funnel_advanced(&self) -> bool {
        self.funnel_advanced
    }

    pub fn in_flight_attempt(&self) -> Option<AttemptId> {
        match self.phase {
            Phase::CredentialEntry { in_flight, .. } => in_flight,
            _ => None,
        }
    }

    pub fn is_verifying(&self) -> bool {
        self.in_flight_attempt().is_some()
    }

    /// Latest outcome: terminal on step 3, or the inline error on step 2.
    pub fn outcome(&self) -> Option<VerificationOutcome> {
        match &self.phase {
            Phase::ContactEntry => None,
            Phase::CredentialEntry { inline_error, .. } => inline_error
                .clone()
                .map(|error| VerificationOutcome::Error { error }),
            Phase::Result(terminal) => Some(terminal.to_outcome()),
        }
    }

    /// Serializable projection for the UI. Never contains the password.
    pub fn snapshot(&self, config: &WizardConfig) -> WizardSnapshot {
        WizardSnapshot {
            current_step: self.step().number(),
            contact_info: self.contact.clone(),
            provider: self.credentials.provider,
            username: self.credentials.username.clone(),
            has_password: !self.credentials.password.is_empty(),
            show_password: self.show_password,
            is_verifying: self.is_verifying(),
            outcome: self.outcome(),
            funnel_advanced: self.funnel_advanced,
            view: render(self, config),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct WizardSnapshot {
    pub current_step: u8,
    pub contact_info: ContactInfo,
    pub provider: Provider,
    pub username: String,
    pub has_password: bool,
    pub show_password: bool,
    pub is_verifying: bool,
    pub outcome: Option<VerificationOutcome>,
    pub funnel_advanced: bool,
    /// Sent next to the snapshot by transports, not inside it.
    #[serde(skip_serializing)]
    pub view: WizardView,
}
