//! Widget configuration supplied by the embedding host.

mod wizard_config;

pub use wizard_config::{BillingModel, WizardConfig};
