use anyhow::Result;

use crate::host::OutboundHostMessage;

/// Outbound channel to the embedding host page.
///
/// Delivery is best effort: callers log a failed post and carry on.
#[async_trait::async_trait]
pub trait HostBridgePort: Send + Sync {
    async fn post(&self, message: OutboundHostMessage) -> Result<()>;
}
