use std::future::Future;
use std::time::Duration;

use tokio::sync::Mutex;
use tokio::task::AbortHandle;
use tokio::time::{sleep_until, Instant};
use tracing::debug;

/// Delay between showing the success screen and advancing the funnel.
pub const AUTO_ADVANCE_DELAY: Duration = Duration::from_secs(2);

/// At most one pending delayed funnel advance.
///
/// Scheduling again replaces the pending one; cancelling aborts it.
pub struct AutoAdvance {
    delay: Duration,
    pending: Mutex<Option<AbortHandle>>,
}

impl AutoAdvance {
    pub fn new(delay: Duration) -> Self {
        Self {
            delay,
            pending: Mutex::new(None),
        }
    }

    pub async fn schedule<F>(&self, on_fire: F)
    where
        F: Future<Output = ()> + Send + 'static,
    {
        let delay = self.delay;
        let deadline = Instant::now() + delay;
        let mut pending = self.pending.lock().await;
        if let Some(existing) = pending.take() {
            existing.abort();
        }

        let handle = tokio::spawn(async move {
            sleep_until(deadline).await;
            on_fire.await;
        });

        *pending = Some(handle.abort_handle());
        debug!(delay_ms = delay.as_millis() as u64, "auto-advance scheduled");
    }

    /// Returns `true` if a pending advance was aborted.
    pub async fn cancel(&self) -> bool {
        match self.pending.lock().await.take() {
            Some(handle) if !handle.is_finished() => {
                handle.abort();
                debug!("auto-advance cancelled");
                true
            }
            _ => false,
        }
    }

    pub async fn is_pending(&self) -> bool {
        self.pending
            .lock()
            .await
            .as_ref()
            .is_some_and(|handle| !handle.is_finished())
    }
}

impl Default for AutoAdvance {
    fn default() -> Self {
        Self::new(AUTO_ADVANCE_DELAY)
    }
}
