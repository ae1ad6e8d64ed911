//! Credit monitoring wizard application layer
//!
//! Drives the core state machine: runs its actions against the ports and
//! keeps one wizard session per mounted widget.

pub mod usecases;

pub use usecases::{WizardSession, WizardSessionError};
