//! Port adapters backed by in-process channels.

mod host_bridge;
mod wizard_events;

pub use host_bridge::ChannelHostBridge;
pub use wizard_events::ChannelWizardEvents;
