//! Render model.
//!
//! Describes what each screen shows, derived from the wizard state and the
//! configuration. Presentation layers only draw it.

use serde::Serialize;

use crate::config::WizardConfig;
use crate::contact::{ContactField, ContactInfo};
use crate::credentials::{CredentialField, Provider};
use crate::validation::{validate_contact, validate_credentials, FieldErrors};
use crate::verification::{ErrorCode, VerificationError};
use crate::wizard::{Phase, TerminalOutcome, WizardState};

pub const TOTAL_STEPS: u8 = 3;

const DEFAULT_SUCCESS_MESSAGE: &str =
    "Your credit report has been retrieved and uploaded to your file. You're all set!";
const DEFAULT_FAILURE_MESSAGE: &str = "We couldn't find an active credit monitoring account. \
     You'll need to activate monitoring to proceed.";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct StepIndicator {
    pub current: u8,
    pub total: u8,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ProviderOption {
    pub value: Provider,
    pub label: &'static str,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum AlertVariant {
    Warning,
    Error,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Alert {
    pub variant: AlertVariant,
    pub title: &'static str,
    pub message: String,
}

impl Alert {
    fn for_error(error: &VerificationError) -> Self {
        let (variant, title) = match error.code {
            ErrorCode::InvalidCredentials => (AlertVariant::Warning, "Invalid Credentials"),
            _ => (AlertVariant::Error, "Verification Failed"),
        };
        Self {
            variant,
            title,
            message: error.user_message.clone(),
        }
    }
}

/// One screen of the wizard.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "screen", rename_all = "camelCase")]
pub enum WizardView {
    #[serde(rename_all = "camelCase")]
    ContactForm {
        step: StepIndicator,
        contact: ContactInfo,
        errors: FieldErrors<ContactField>,
        can_submit: bool,
    },
    #[serde(rename_all = "camelCase")]
    CredentialForm {
        step: StepIndicator,
        providers: Vec<ProviderOption>,
        provider: Provider,
        username: String,
        show_password: bool,
        errors: FieldErrors<CredentialField>,
        alert: Option<Alert>,
        is_verifying: bool,
        submit_enabled: bool,
        back_enabled: bool,
        /// Simulated verification; hosts may show the test passwords.
        mock_mode: bool,
    },
    #[serde(rename_all = "camelCase")]
    SuccessScreen {
        step: StepIndicator,
        title: &'static str,
        message: String,
        report_date: String,
        score_line: Option<String>,
        calendar_id: Option<String>,
    },
    #[serde(rename_all = "camelCase")]
    FailureScreen {
        step: StepIndicator,
        title: &'static str,
        message: String,
        detail: String,
        affiliate_link: String,
        support_email: Option<String>,
    },
}

impl WizardView {
    pub fn step(&self) -> StepIndicator {
        match self {
            WizardView::ContactForm { step, .. }
            | WizardView::CredentialForm { step, .. }
            | WizardView::SuccessScreen { step, .. }
            | WizardView::FailureScreen { step, .. } => *step,
        }
    }
}

pub fn render(state: &WizardState, config: &WizardConfig) -> WizardView {
    let step = StepIndicator {
        current: state.step().number(),
        total: TOTAL_STEPS,
    };

    match state.phase() {
        Phase::ContactEntry => {
            let validation = validate_contact(state.contact());
            WizardView::ContactForm {
                step,
                contact: state.contact().clone(),
                can_submit: validation.is_valid(),
                errors: validation.errors.visible_for(state.contact_touched()),
            }
        }
        Phase::CredentialEntry {
            inline_error,
            in_flight,
        } => {
            let verifying = in_flight.is_some();
            let validation = validate_credentials(state.credentials());
            let valid = validation.is_valid();
            let errors = validation.errors.visible_for(state.credentials_touched());
            WizardView::CredentialForm {
                step,
                providers: Provider::ALL
                    .iter()
                    .map(|p| ProviderOption {
                        value: *p,
                        label: p.label(),
                    })
                    .collect(),
                provider: state.credentials().provider,
                username: state.credentials().username.clone(),
                show_password: state.show_password(),
                errors,
                alert: inline_error.as_ref().map(Alert::for_error),
                is_verifying: verifying,
                submit_enabled: !verifying && valid,
                back_enabled: !verifying,
                mock_mode: config.enable_mock_mode,
            }
        }
        Phase::Result(TerminalOutcome::Success { report, .. }) => WizardView::SuccessScreen {
            step,
            title: "Success!",
            message: config
                .custom_success_message()
                .unwrap_or(DEFAULT_SUCCESS_MESSAGE)
                .to_string(),
            report_date: report.report_date.clone(),
            score_line: report.credit_score.map(|s| s.summary()),
            calendar_id: config.calendar_id().map(str::to_string),
        },
        Phase::Result(TerminalOutcome::AccountNotFound { error }) => WizardView::FailureScreen {
            step,
            title: match error.code {
                ErrorCode::AccountNotFound => "No Active Monitoring Found",
                _ => "Verification Failed",
            },
            message: config
                .custom_failure_message()
                .unwrap_or(DEFAULT_FAILURE_MESSAGE)
                .to_string(),
            detail: error.user_message.clone(),
            affiliate_link: config.affiliate_link.clone(),
            support_email: config.support_email().map(str::to_string),
        },
    }
}
