use std::sync::Arc;

use anyhow::Result;
use tokio::sync::Mutex;
use tracing::debug;

use cmw_core::host::RESIZE_BUFFER_PX;
use cmw_core::ports::HostBridgePort;
use cmw_core::OutboundHostMessage;

/// Tell the host page how tall the widget is, so it can size its frame.
///
/// The reported height carries a fixed buffer. Repeats of the last reported
/// height are not sent again.
pub struct ReportContentHeight {
    host: Arc<dyn HostBridgePort>,
    last_reported: Mutex<Option<u32>>,
}

impl ReportContentHeight {
    pub fn new(host: Arc<dyn HostBridgePort>) -> Self {
        Self {
            host,
            last_reported: Mutex::new(None),
        }
    }

    /// Returns `true` when a resize message was posted.
    pub async fn execute(&self, content_height: u32) -> Result<bool> {
        let height = content_height.saturating_add(RESIZE_BUFFER_PX);

        let mut last = self.last_reported.lock().await;
        if *last == Some(height) {
            debug!(height, "content height unchanged, skipping resize");
            return Ok(false);
        }

        self.host
            .post(OutboundHostMessage::Resize { height })
            .await?;
        *last = Some(height);
        debug!(height, "resize posted to host");
        Ok(true)
    }

    /// Forget the last reported height, so the next report is always sent.
    pub async fn clear(&self) {
        *self.last_reported.lock().await = None;
    }
}
