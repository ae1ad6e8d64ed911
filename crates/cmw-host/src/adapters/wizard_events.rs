use tokio::sync::mpsc;
use tracing::debug;

use cmw_core::ports::WizardEventPort;
use cmw_core::WizardSnapshot;

use crate::events::{OutboundFrame, WidgetEvent};

/// Forwards wizard snapshots to the embedding UI.
pub struct ChannelWizardEvents {
    outbound: mpsc::UnboundedSender<OutboundFrame>,
}

impl ChannelWizardEvents {
    pub fn new(outbound: mpsc::UnboundedSender<OutboundFrame>) -> Self {
        Self { outbound }
    }
}

#[async_trait::async_trait]
impl WizardEventPort for ChannelWizardEvents {
    async fn emit_state_changed(&self, snapshot: WizardSnapshot) {
        let step = snapshot.current_step;
        if self
            .outbound
            .send(OutboundFrame::Widget(WidgetEvent::wizard_state(snapshot)))
            .is_err()
        {
            debug!(step, "ui transport closed, wizard state dropped");
        }
    }
}
