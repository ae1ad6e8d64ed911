use crate::wizard::WizardSnapshot;

/// Notifies the embedding UI that wizard state changed.
#[async_trait::async_trait]
pub trait WizardEventPort: Send + Sync {
    async fn emit_state_changed(&self, snapshot: WizardSnapshot);
}
