use anyhow::Result;
use tokio::sync::{broadcast, mpsc};
use tracing::debug;

use cmw_core::ports::HostBridgePort;
use cmw_core::OutboundHostMessage;

use crate::events::OutboundFrame;

const LOCAL_CHANNEL_CAPACITY: usize = 16;

/// Posts host messages onto the outbound transport.
///
/// Funnel-advance messages are also broadcast to in-process listeners.
pub struct ChannelHostBridge {
    outbound: mpsc::UnboundedSender<OutboundFrame>,
    local: broadcast::Sender<OutboundHostMessage>,
}

impl ChannelHostBridge {
    pub fn new(outbound: mpsc::UnboundedSender<OutboundFrame>) -> Self {
        let (local, _) = broadcast::channel(LOCAL_CHANNEL_CAPACITY);
        Self { outbound, local }
    }

    pub fn subscribe_local(&self) -> broadcast::Receiver<OutboundHostMessage> {
        self.local.subscribe()
    }
}

#[async_trait::async_trait]
impl HostBridgePort for ChannelHostBridge {
    async fn post(&self, message: OutboundHostMessage) -> Result<()> {
        if message == OutboundHostMessage::GoToNextStep {
            // No listeners is fine.
            let listeners = self.local.send(message.clone()).unwrap_or(0);
            debug!(listeners, "funnel advance broadcast locally");
        }

        self.outbound
            .send(OutboundFrame::Host(message))
            .map_err(|_| anyhow::anyhow!("host transport closed"))
    }
}
