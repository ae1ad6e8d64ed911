//! Wizard state machine.
//!
//! Defines a pure state transition function for the contact → credentials →
//! result flow. Side effects are returned as [`WizardAction`]s for the session
//! to execute.

use crate::contact::ContactField;
use crate::credentials::CredentialField;
use crate::validation::{format_phone_as_typed, validate_contact, validate_credentials};
use crate::verification::{VerificationError, VerificationOutcome};
use crate::ports::VerificationFault;
use crate::wizard::{
    AttemptId, Phase, TerminalOutcome, VerificationRequest, WizardAction, WizardEvent, WizardState,
    WizardStep,
};

/// Pure wizard state machine: no I/O, no clocks.
pub struct WizardStateMachine;

impl WizardStateMachine {
    pub fn transition(mut state: WizardState, event: WizardEvent) -> (WizardState, Vec<WizardAction>) {
        let step = state.step();
        let verifying = state.is_verifying();
        let in_flight = state.in_flight_attempt();
        let succeeded = matches!(state.phase, Phase::Result(TerminalOutcome::Success { .. }));
        let event_name = event.name();

        match (step, event) {
            (_, WizardEvent::Mounted) => (fresh(state), vec![WizardAction::RequestContactData]),
            (_, WizardEvent::Reset) => (fresh(state), vec![WizardAction::CancelAutoAdvance]),
            (_, WizardEvent::PrefillContact(patch)) => {
                state.contact.apply_patch(&patch);
                (state, Vec::new())
            }

            (WizardStep::ContactEntry, WizardEvent::UpdateContactField { field, value }) => {
                let value = match field {
                    ContactField::Phone => format_phone_as_typed(&value),
                    _ => value,
                };
                state.contact.set(field, value);
                (state, Vec::new())
            }
            (WizardStep::ContactEntry, WizardEvent::BlurContactField(field)) => {
                state.contact_touched.insert(field);
                (state, Vec::new())
            }
            (WizardStep::ContactEntry, WizardEvent::SubmitContact) => {
                if validate_contact(&state.contact).is_valid() {
                    state.phase = Phase::credential_entry();
                } else {
                    state.contact_touched.extend(ContactField::ALL);
                }
                (state, Vec::new())
            }

            (WizardStep::CredentialEntry, WizardEvent::SelectProvider(provider)) if !verifying => {
                state.credentials.provider = provider;
                (state, Vec::new())
            }
            (WizardStep::CredentialEntry, WizardEvent::UpdateUsername(username)) if !verifying => {
                state.credentials.username = username;
                (state, Vec::new())
            }
            (WizardStep::CredentialEntry, WizardEvent::UpdatePassword(password)) if !verifying => {
                state.credentials.password = password;
                (state, Vec::new())
            }
            (WizardStep::CredentialEntry, WizardEvent::BlurCredentialField(field)) => {
                state.credentials_touched.insert(field);
                (state, Vec::new())
            }
            (WizardStep::CredentialEntry, WizardEvent::TogglePasswordVisibility) => {
                state.show_password = !state.show_password;
                (state, Vec::new())
            }
            (WizardStep::CredentialEntry, WizardEvent::SubmitCredentials) if !verifying => {
                if !validate_credentials(&state.credentials).is_valid() {
                    state
                        .credentials_touched
                        .extend([CredentialField::Username, CredentialField::Password]);
                    return (state, Vec::new());
                }

                state.attempts += 1;
                let attempt = AttemptId(state.attempts);
                state.phase = Phase::CredentialEntry {
                    inline_error: None,
                    in_flight: Some(attempt),
                };
                let request = VerificationRequest {
                    attempt,
                    contact: state.contact.clone(),
                    credentials: state.credentials.duplicate(),
                };
                (state, vec![WizardAction::Verify(request)])
            }
            (WizardStep::CredentialEntry, WizardEvent::VerificationSettled { attempt, result })
                if in_flight == Some(attempt) =>
            {
                Self::settle(state, result)
            }
            (WizardStep::CredentialEntry, WizardEvent::Back) if !verifying => {
                state.phase = Phase::ContactEntry;
                (state, Vec::new())
            }

            (WizardStep::Result, WizardEvent::Retry) if !succeeded => {
                state.phase = Phase::credential_entry();
                (state, Vec::new())
            }
            (WizardStep::Result, WizardEvent::AdvanceFunnel) if succeeded => {
                state.funnel_advanced = true;
                (state, vec![WizardAction::NotifyFunnelAdvance])
            }

            _ => {
                #[cfg(feature = "tracing")]
                tracing::debug!(event = event_name, step = step.number(), "event ignored in current state");
                #[cfg(not(feature = "tracing"))]
                let _ = event_name;
                (state, Vec::new())
            }
        }
    }

    fn settle(
        mut state: WizardState,
        result: Result<VerificationOutcome, VerificationFault>,
    ) -> (WizardState, Vec<WizardAction>) {
        let outcome = result.unwrap_or_else(|fault| VerificationOutcome::Error {
            error: VerificationError::unknown(fault.to_string()),
        });

        match outcome {
            VerificationOutcome::Success { report, message } => {
                state.phase = Phase::Result(TerminalOutcome::Success { report, message });
                (state, vec![WizardAction::ScheduleAutoAdvance])
            }
            VerificationOutcome::AccountNotFound { error } => {
                state.phase = Phase::Result(TerminalOutcome::AccountNotFound { error });
                (state, Vec::new())
            }
            VerificationOutcome::Error { error } => {
                state.phase = Phase::CredentialEntry {
                    inline_error: Some(error),
                    in_flight: None,
                };
                (state, Vec::new())
            }
        }
    }
}

/// New wizard that keeps the attempt counter, so late results from before
/// the reset can never match a new attempt.
fn fresh(state: WizardState) -> WizardState {
    WizardState {
        attempts: state.attempts,
        ..WizardState::new()
    }
}
