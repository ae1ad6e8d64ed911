//! Wizard domain module.
//!
//! The three-step contact → credentials → result flow as a pure state machine,
//! plus the snapshot and render model derived from it.

mod action;
mod event;
mod state;
pub mod state_machine;
pub mod view;

pub use action::{AttemptId, VerificationRequest, WizardAction};
pub use event::WizardEvent;
pub use state::{Phase, TerminalOutcome, WizardSnapshot, WizardState, WizardStep};
pub use state_machine::WizardStateMachine;
pub use view::{render, WizardView};
