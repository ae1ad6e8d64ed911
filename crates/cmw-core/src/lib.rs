//! # cmw-core
//!
//! Core domain models and business logic for the credit monitoring wizard.
//!
//! This crate contains pure business logic without any infrastructure dependencies.

// Public module exports
pub mod config;
pub mod contact;
pub mod credentials;
pub mod host;
pub mod ports;
pub mod security;
pub mod validation;
pub mod verification;
pub mod wizard;

// Re-export commonly used types at the crate root
pub use config::{BillingModel, WizardConfig};
pub use contact::{ContactField, ContactInfo, ContactPatch};
pub use credentials::{CredentialField, Credentials, Provider};
pub use host::{InboundHostMessage, OutboundHostMessage};
pub use security::SecretString;
pub use verification::{
    CreditScore, ErrorCode, ReportData, VerificationError, VerificationOutcome,
};
pub use wizard::{
    WizardAction, WizardEvent, WizardSnapshot, WizardState, WizardStateMachine, WizardStep,
    WizardView,
};
