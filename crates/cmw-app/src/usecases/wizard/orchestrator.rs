//! Wizard session orchestrator.
//!
//! This module coordinates the wizard state machine and its side effects:
//! host messages, the verification call and the delayed funnel advance.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::Duration;

use serde_json::Value;
use tokio::sync::Mutex;
use tokio::task::JoinHandle;
use tracing::{debug, info, info_span, warn, Instrument};

use cmw_core::ports::{HostBridgePort, VerificationFault, VerificationPort, WizardEventPort};
use cmw_core::wizard::{AttemptId, VerificationRequest};
use cmw_core::{
    ContactField, ContactPatch, CredentialField, OutboundHostMessage, Provider, SecretString,
    VerificationOutcome, WizardAction, WizardConfig, WizardEvent, WizardSnapshot,
    WizardStateMachine,
};

use crate::usecases::host::{HandleHostMessage, ReportContentHeight};
use crate::usecases::wizard::auto_advance::AutoAdvance;
use crate::usecases::wizard::context::WizardContext;

/// Errors produced by the wizard session.
#[derive(Debug, thiserror::Error)]
pub enum WizardSessionError {
    #[error("wizard session is not mounted")]
    Unmounted,
}

/// One wizard instance, from mount to unmount.
///
/// Cheap to clone; clones share the same session.
#[derive(Clone)]
pub struct WizardSession {
    context: Arc<WizardContext>,
    config: Arc<WizardConfig>,
    verifier: Arc<dyn VerificationPort>,
    host: Arc<dyn HostBridgePort>,
    events: Arc<dyn WizardEventPort>,
    report_height: Arc<ReportContentHeight>,
    auto_advance: Arc<AutoAdvance>,
    mounted: Arc<AtomicBool>,
    verification_task: Arc<Mutex<Option<JoinHandle<()>>>>,
}

impl WizardSession {
    /// The rendered mock-mode flag follows the verifier actually in use.
    pub fn new(
        mut config: WizardConfig,
        verifier: Arc<dyn VerificationPort>,
        host: Arc<dyn HostBridgePort>,
        events: Arc<dyn WizardEventPort>,
    ) -> Self {
        if config.enable_mock_mode != verifier.is_simulated() {
            warn!(
                configured = config.enable_mock_mode,
                simulated = verifier.is_simulated(),
                "mock mode does not match the verifier, following the verifier"
            );
            config.enable_mock_mode = verifier.is_simulated();
        }

        Self {
            context: WizardContext::default().arc(),
            config: Arc::new(config),
            verifier,
            report_height: Arc::new(ReportContentHeight::new(Arc::clone(&host))),
            host,
            events,
            auto_advance: Arc::new(AutoAdvance::default()),
            mounted: Arc::new(AtomicBool::new(false)),
            verification_task: Arc::new(Mutex::new(None)),
        }
    }

    pub fn with_auto_advance_delay(mut self, delay: Duration) -> Self {
        self.auto_advance = Arc::new(AutoAdvance::new(delay));
        self
    }

    pub fn config(&self) -> &WizardConfig {
        &self.config
    }

    pub fn is_mounted(&self) -> bool {
        self.mounted.load(Ordering::SeqCst)
    }

    /// Start (or restart) the wizard on step 1, asking the host for contact data.
    pub async fn mount(
        &self,
        initial_contact: Option<ContactPatch>,
    ) -> Result<WizardSnapshot, WizardSessionError> {
        self.mounted.store(true, Ordering::SeqCst);
        self.report_height.clear().await;
        info!(
            mock_mode = self.config.enable_mock_mode,
            billing_model = ?self.config.billing_model,
            "wizard session mounted"
        );

        let snapshot = self.dispatch(WizardEvent::Mounted).await?;
        match initial_contact {
            Some(patch) => self.dispatch(WizardEvent::PrefillContact(patch)).await,
            None => Ok(snapshot),
        }
    }

    /// Stop the session. A verification still in flight is not cancelled, but
    /// its result is discarded.
    pub async fn unmount(&self) {
        if self.mounted.swap(false, Ordering::SeqCst) {
            self.auto_advance.cancel().await;
            info!("wizard session unmounted");
        }
    }

    pub async fn snapshot(&self) -> WizardSnapshot {
        self.context.snapshot(&self.config).await
    }

    pub async fn dispatch(&self, event: WizardEvent) -> Result<WizardSnapshot, WizardSessionError> {
        if !self.is_mounted() {
            return Err(WizardSessionError::Unmounted);
        }

        let span = info_span!("usecase.wizard_session.dispatch", event = event.name());
        async {
            let (snapshot, actions) = self
                .apply(event)
                .await
                .ok_or(WizardSessionError::Unmounted)?;
            for action in actions {
                if let Some(request) = self.perform(action).await {
                    self.spawn_verification(request).await;
                }
            }
            Ok(snapshot)
        }
        .instrument(span)
        .await
    }

    /// Handle a raw message posted by the host page.
    ///
    /// Returns the new snapshot when the message changed the wizard.
    pub async fn receive_host_message(
        &self,
        raw: &Value,
    ) -> Result<Option<WizardSnapshot>, WizardSessionError> {
        match HandleHostMessage::execute(raw) {
            Some(event) => self.dispatch(event).await.map(Some),
            None => Ok(None),
        }
    }

    pub async fn report_content_height(&self, height: u32) -> Result<(), WizardSessionError> {
        if !self.is_mounted() {
            return Err(WizardSessionError::Unmounted);
        }
        if let Err(err) = self.report_height.execute(height).await {
            warn!(error = %err, height, "failed to post resize to host");
        }
        Ok(())
    }

    /// Wait for the most recently started verification to settle.
    pub async fn wait_for_verification(&self) {
        let handle = self.verification_task.lock().await.take();
        if let Some(handle) = handle {
            if let Err(err) = handle.await {
                warn!(error = %err, "verification task did not complete");
            }
        }
    }

    pub async fn update_contact_field(
        &self,
        field: ContactField,
        value: impl Into<String>,
    ) -> Result<WizardSnapshot, WizardSessionError> {
        self.dispatch(WizardEvent::UpdateContactField {
            field,
            value: value.into(),
        })
        .await
    }

    pub async fn blur_contact_field(
        &self,
        field: ContactField,
    ) -> Result<WizardSnapshot, WizardSessionError> {
        self.dispatch(WizardEvent::BlurContactField(field)).await
    }

    pub async fn submit_contact(&self) -> Result<WizardSnapshot, WizardSessionError> {
        self.dispatch(WizardEvent::SubmitContact).await
    }

    pub async fn select_provider(
        &self,
        provider: Provider,
    ) -> Result<WizardSnapshot, WizardSessionError> {
        self.dispatch(WizardEvent::SelectProvider(provider)).await
    }

    pub async fn update_username(
        &self,
        username: impl Into<String>,
    ) -> Result<WizardSnapshot, WizardSessionError> {
        self.dispatch(WizardEvent::UpdateUsername(username.into()))
            .await
    }

    pub async fn update_password(
        &self,
        password: SecretString,
    ) -> Result<WizardSnapshot, WizardSessionError> {
        self.dispatch(WizardEvent::UpdatePassword(password)).await
    }

    pub async fn blur_credential_field(
        &self,
        field: CredentialField,
    ) -> Result<WizardSnapshot, WizardSessionError> {
        self.dispatch(WizardEvent::BlurCredentialField(field)).await
    }

    pub async fn toggle_password_visibility(&self) -> Result<WizardSnapshot, WizardSessionError> {
        self.dispatch(WizardEvent::TogglePasswordVisibility).await
    }

    pub async fn submit_credentials(&self) -> Result<WizardSnapshot, WizardSessionError> {
        self.dispatch(WizardEvent::SubmitCredentials).await
    }

    pub async fn back(&self) -> Result<WizardSnapshot, WizardSessionError> {
        self.dispatch(WizardEvent::Back).await
    }

    pub async fn retry(&self) -> Result<WizardSnapshot, WizardSessionError> {
        self.dispatch(WizardEvent::Retry).await
    }

    /// Manual "continue" from the success screen.
    pub async fn continue_to_next_step(&self) -> Result<WizardSnapshot, WizardSessionError> {
        self.dispatch(WizardEvent::AdvanceFunnel).await
    }

    pub async fn reset(&self) -> Result<WizardSnapshot, WizardSessionError> {
        self.dispatch(WizardEvent::Reset).await
    }

    /// Run one transition: state machine, store, notify the UI.
    ///
    /// Returns `None` without touching state once the session is unmounted.
    async fn apply(&self, event: WizardEvent) -> Option<(WizardSnapshot, Vec<WizardAction>)> {
        let _dispatch_guard = self.context.acquire_dispatch_lock().await;
        if !self.is_mounted() {
            return None;
        }

        let event_name = event.name();
        let (from, to, snapshot, actions) = self
            .context
            .update(|state| {
                let from = state.step();
                let (next, actions) = WizardStateMachine::transition(state, event);
                let to = next.step();
                let snapshot = next.snapshot(&self.config);
                (next, (from, to, snapshot, actions))
            })
            .await;

        info!(
            from = from.number(),
            to = to.number(),
            event = event_name,
            verifying = snapshot.is_verifying,
            "wizard state transition"
        );
        self.events.emit_state_changed(snapshot.clone()).await;
        Some((snapshot, actions))
    }

    /// Execute one action. A verification request is handed back to the caller.
    async fn perform(&self, action: WizardAction) -> Option<VerificationRequest> {
        debug!(action = action.name(), "wizard executing action");
        match action {
            WizardAction::RequestContactData => {
                self.post(OutboundHostMessage::RequestContactData).await;
                None
            }
            WizardAction::Verify(request) => Some(request),
            WizardAction::ScheduleAutoAdvance => {
                let session = self.clone();
                self.auto_advance
                    .schedule(async move { session.fire_auto_advance().await })
                    .await;
                None
            }
            WizardAction::CancelAutoAdvance => {
                self.auto_advance.cancel().await;
                None
            }
            WizardAction::NotifyFunnelAdvance => {
                self.post(OutboundHostMessage::GoToNextStep).await;
                None
            }
        }
    }

    /// Run the verification without holding any lock; the result comes back
    /// through [`Self::settle`].
    async fn spawn_verification(&self, request: VerificationRequest) {
        let VerificationRequest {
            attempt,
            contact,
            credentials,
        } = request;
        info!(
            attempt = %attempt,
            provider = %credentials.provider,
            "verification started"
        );

        let session = self.clone();
        let span = info_span!("usecase.wizard_session.verify", attempt = %attempt);
        let handle = tokio::spawn(
            async move {
                let result = session.verifier.verify(&contact, &credentials).await;
                session.settle(attempt, result).await;
            }
            .instrument(span),
        );

        if let Some(previous) = self.verification_task.lock().await.replace(handle) {
            // Only reachable after a reset while a call was in flight.
            debug!(finished = previous.is_finished(), "previous verification left running");
        }
    }

    async fn settle(&self, attempt: AttemptId, result: Result<VerificationOutcome, VerificationFault>) {
        match &result {
            Ok(outcome) => info!(
                attempt = %attempt,
                success = outcome.is_success(),
                code = outcome.code().map(|c| c.as_str()).unwrap_or("none"),
                "verification settled"
            ),
            Err(fault) => warn!(attempt = %attempt, error = %fault, "verification fault"),
        }

        if !self.is_mounted() {
            debug!(attempt = %attempt, "session unmounted, discarding verification result");
            return;
        }

        let Some((_, actions)) = self
            .apply(WizardEvent::VerificationSettled { attempt, result })
            .await
        else {
            debug!(attempt = %attempt, "session unmounted while settling, result discarded");
            return;
        };
        for action in actions {
            if self.perform(action).await.is_some() {
                warn!("verification requested while settling, ignored");
            }
        }
    }

    async fn fire_auto_advance(&self) {
        if !self.is_mounted() {
            return;
        }
        let Some((_, actions)) = self.apply(WizardEvent::AdvanceFunnel).await else {
            return;
        };
        for action in actions {
            match action {
                WizardAction::NotifyFunnelAdvance => {
                    info!("auto-advancing funnel");
                    self.post(OutboundHostMessage::GoToNextStep).await;
                }
                other => debug!(action = other.name(), "auto-advance ignored action"),
            }
        }
    }

    async fn post(&self, message: OutboundHostMessage) {
        let name = message.name();
        if let Err(err) = self.host.post(message).await {
            warn!(message = name, error = %err, "failed to post message to host");
        }
    }
}
