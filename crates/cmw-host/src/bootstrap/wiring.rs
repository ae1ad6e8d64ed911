//! Dependency wiring: builds one wizard session and the channels that carry
//! its output.

use std::sync::Arc;

use tokio::sync::mpsc;

use cmw_app::WizardSession;
use cmw_core::ports::VerificationPort;
use cmw_core::WizardConfig;
use cmw_infra::{build_verifier, SystemClock};

use crate::adapters::{ChannelHostBridge, ChannelWizardEvents};
use crate::events::OutboundFrame;

pub struct WidgetWiring {
    pub session: WizardSession,
    pub host_bridge: Arc<ChannelHostBridge>,
    pub outbound_tx: mpsc::UnboundedSender<OutboundFrame>,
    pub outbound_rx: mpsc::UnboundedReceiver<OutboundFrame>,
}

/// Wire a session with the verifier the config selects.
pub fn wire_widget(config: WizardConfig) -> anyhow::Result<WidgetWiring> {
    let verifier = build_verifier(&config, Arc::new(SystemClock))?;
    Ok(wire_widget_with(config, verifier))
}

pub fn wire_widget_with(
    config: WizardConfig,
    verifier: Arc<dyn VerificationPort>,
) -> WidgetWiring {
    let (outbound_tx, outbound_rx) = mpsc::unbounded_channel();
    let host_bridge = Arc::new(ChannelHostBridge::new(outbound_tx.clone()));
    let events = Arc::new(ChannelWizardEvents::new(outbound_tx.clone()));

    let session = WizardSession::new(config, verifier, host_bridge.clone(), events);

    WidgetWiring {
        session,
        host_bridge,
        outbound_tx,
        outbound_rx,
    }
}
