use std::sync::Arc;

use tokio::sync::Mutex;

use cmw_core::{WizardConfig, WizardSnapshot, WizardState};

/// Shared wizard context containing state and dispatch lock.
///
/// ## Lock Ordering
/// When acquiring both locks, acquire `dispatch_lock` first, then `state`.
/// - `dispatch_lock`: serializes transitions, held across transition + store + emit.
/// - `state`: held only while a transition runs or a snapshot is taken.
pub struct WizardContext {
    state: Mutex<WizardState>,
    dispatch_lock: Mutex<()>,
}

impl WizardContext {
    pub fn new(initial_state: WizardState) -> Self {
        Self {
            state: Mutex::new(initial_state),
            dispatch_lock: Mutex::new(()),
        }
    }

    pub fn arc(self) -> Arc<Self> {
        Arc::new(self)
    }

    /// Does NOT acquire `dispatch_lock`.
    pub async fn snapshot(&self, config: &WizardConfig) -> WizardSnapshot {
        self.state.lock().await.snapshot(config)
    }

    pub async fn acquire_dispatch_lock(&self) -> tokio::sync::MutexGuard<'_, ()> {
        self.dispatch_lock.lock().await
    }

    /// Replace the state with the result of `f`, which owns the current state
    /// for the duration of the call.
    ///
    /// This should only be called after acquiring `dispatch_lock`.
    pub async fn update<R>(&self, f: impl FnOnce(WizardState) -> (WizardState, R)) -> R {
        let mut guard = self.state.lock().await;
        let current = std::mem::take(&mut *guard);
        let (next, output) = f(current);
        *guard = next;
        output
    }
}

impl Default for WizardContext {
    fn default() -> Self {
        Self::new(WizardState::new())
    }
}
