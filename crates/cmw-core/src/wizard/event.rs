use crate::contact::{ContactField, ContactPatch};
use crate::credentials::{CredentialField, Provider};
use crate::ports::VerificationFault;
use crate::security::SecretString;
use crate::verification::VerificationOutcome;
use crate::wizard::AttemptId;

/// Events that drive the wizard.
#[derive(Debug)]
pub enum WizardEvent {
    /// Widget mounted in the host page.
    Mounted,
    /// Seed contact fields (host data or initial props).
    PrefillContact(ContactPatch),

    // Step 1
    UpdateContactField { field: ContactField, value: String },
    BlurContactField(ContactField),
    SubmitContact,

    // Step 2
    SelectProvider(Provider),
    UpdateUsername(String),
    UpdatePassword(SecretString),
    BlurCredentialField(CredentialField),
    TogglePasswordVisibility,
    SubmitCredentials,

    /// Verification client settled (from the session).
    VerificationSettled {
        attempt: AttemptId,
        result: Result<VerificationOutcome, VerificationFault>,
    },

    // Navigation
    Back,
    Retry,
    AdvanceFunnel,
    Reset,
}

impl WizardEvent {
    /// Stable name for logs; never includes field values.
    pub fn name(&self) -> &'static str {
        match self {
            WizardEvent::Mounted => "Mounted",
            WizardEvent::PrefillContact(_) => "PrefillContact",
            WizardEvent::UpdateContactField { .. } => "UpdateContactField",
            WizardEvent::BlurContactField(_) => "BlurContactField",
            WizardEvent::SubmitContact => "SubmitContact",
            WizardEvent::SelectProvider(_) => "SelectProvider",
            WizardEvent::UpdateUsername(_) => "UpdateUsername",
            WizardEvent::UpdatePassword(_) => "UpdatePassword",
            WizardEvent::BlurCredentialField(_) => "BlurCredentialField",
            WizardEvent::TogglePasswordVisibility => "TogglePasswordVisibility",
            WizardEvent::SubmitCredentials => "SubmitCredentials",
            WizardEvent::VerificationSettled { .. } => "VerificationSettled",
            WizardEvent::Back => "Back",
            WizardEvent::Retry => "Retry",
            WizardEvent::AdvanceFunnel => "AdvanceFunnel",
            WizardEvent::Reset => "Reset",
        }
    }
}
