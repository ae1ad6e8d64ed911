use tokio::sync::broadcast::error::RecvError;
use tracing::{debug, info};

use cmw_core::{OutboundHostMessage, WizardConfig};

use crate::bootstrap::wiring::wire_widget;
use crate::runtime::run_transport;

/// Serve the wizard over stdin/stdout until stdin closes.
pub async fn run_stdio(config: WizardConfig) -> anyhow::Result<()> {
    let wiring = wire_widget(config)?;

    let mut local = wiring.host_bridge.subscribe_local();
    tokio::spawn(async move {
        loop {
            match local.recv().await {
                Ok(OutboundHostMessage::GoToNextStep) => info!("funnel advance (local event)"),
                Ok(_) => {}
                Err(RecvError::Lagged(skipped)) => debug!(skipped, "local listener lagged"),
                Err(RecvError::Closed) => break,
            }
        }
    });

    info!("credit wizard listening on stdin");
    run_transport(
        wiring.session,
        wiring.outbound_tx,
        wiring.outbound_rx,
        tokio::io::stdin(),
        tokio::io::stdout(),
    )
    .await
}
