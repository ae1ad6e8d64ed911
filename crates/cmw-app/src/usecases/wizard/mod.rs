//! Wizard session use cases.

mod auto_advance;
mod context;
mod orchestrator;

pub use auto_advance::{AutoAdvance, AUTO_ADVANCE_DELAY};
pub use context::WizardContext;
pub use orchestrator::{WizardSession, WizardSessionError};
