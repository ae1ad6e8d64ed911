//! Port interfaces for the application layer
//!
//! Ports define the contract between the wizard session (use cases) and the
//! adapters that talk to the outside world: the verification webhook, the
//! host page and the embedding UI. The core never depends on an adapter.

mod clock;
mod host_bridge;
mod verification;
mod wizard_event;

pub use clock::ClockPort;
pub use host_bridge::HostBridgePort;
pub use verification::{VerificationFault, VerificationPort};
pub use wizard_event::WizardEventPort;
