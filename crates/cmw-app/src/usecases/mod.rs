//! Business logic use cases

pub mod host;
pub mod wizard;

pub use host::{HandleHostMessage, ReportContentHeight};
pub use wizard::{WizardContext, WizardSession, WizardSessionError};
