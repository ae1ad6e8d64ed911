use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use reqwest::{Client, Response};
use tracing::{debug, info, warn};

use cmw_core::ports::{ClockPort, VerificationFault, VerificationPort};
use cmw_core::verification::VerificationResponse;
use cmw_core::{ContactInfo, Credentials, VerificationError, VerificationOutcome};

use super::payload::{ErrorEnvelope, VerificationPayload, USER_AGENT};

/// Time allowed for the first attempt to get a response.
pub const REQUEST_TIMEOUT: Duration = Duration::from_secs(10);

/// Posts credentials to the configured webhook.
///
/// The first attempt is bounded by [`REQUEST_TIMEOUT`]. A transport failure
/// is retried exactly once, without a timeout.
pub struct WebhookVerifier {
    client: Client,
    url: String,
    support_email: String,
    timeout: Duration,
    clock: Arc<dyn ClockPort>,
}

impl WebhookVerifier {
    pub fn new(
        url: impl Into<String>,
        support_email: impl Into<String>,
        clock: Arc<dyn ClockPort>,
    ) -> anyhow::Result<Self> {
        let client = Client::builder().user_agent(USER_AGENT).build()?;
        Ok(Self {
            client,
            url: url.into(),
            support_email: support_email.into(),
            timeout: REQUEST_TIMEOUT,
            clock,
        })
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    async fn send(&self, payload: &VerificationPayload<'_>) -> reqwest::Result<Response> {
        self.client.post(&self.url).json(payload).send().await
    }

    async fn classify(&self, response: Response) -> Result<VerificationOutcome, VerificationFault> {
        let status = response.status();
        if !status.is_success() {
            let detail = response
                .json::<ErrorEnvelope>()
                .await
                .ok()
                .and_then(|envelope| envelope.error)
                .unwrap_or_default();
            let error = VerificationError::api(
                non_empty(detail.code),
                non_empty(detail.message),
                non_empty(detail.user_message),
            );
            warn!(status = status.as_u16(), code = %error.code, "verification webhook returned an error status");
            return Ok(VerificationOutcome::from_error(error));
        }

        let body = response
            .json::<VerificationResponse>()
            .await
            .map_err(|err| VerificationFault::MalformedResponse(err.to_string()))?;
        debug!(success = body.success, "verification webhook responded");
        body.into_outcome()
    }

    async fn retry(
        &self,
        payload: &VerificationPayload<'_>,
    ) -> Result<VerificationOutcome, VerificationFault> {
        match self.send(payload).await {
            Ok(response) if response.status().is_success() => {
                match response.json::<VerificationResponse>().await {
                    Ok(body) => {
                        info!("verification webhook retry succeeded");
                        body.into_outcome()
                    }
                    Err(err) => {
                        warn!(error = %err, "verification webhook retry returned an unreadable body");
                        Ok(self.network_error())
                    }
                }
            }
            Ok(response) => {
                warn!(status = response.status().as_u16(), "verification webhook retry failed");
                Ok(self.network_error())
            }
            Err(err) => {
                warn!(error = %err, "verification webhook retry failed");
                Ok(self.network_error())
            }
        }
    }

    fn network_error(&self) -> VerificationOutcome {
        VerificationOutcome::from_error(VerificationError::network(&self.support_email))
    }
}

#[async_trait]
impl VerificationPort for WebhookVerifier {
    async fn verify(
        &self,
        contact: &ContactInfo,
        credentials: &Credentials,
    ) -> Result<VerificationOutcome, VerificationFault> {
        let payload = VerificationPayload::new(contact, credentials, self.clock.now_ms());

        match tokio::time::timeout(self.timeout, self.send(&payload)).await {
            Err(_elapsed) => {
                warn!(
                    timeout_ms = self.timeout.as_millis() as u64,
                    "verification webhook timed out"
                );
                Ok(VerificationOutcome::from_error(VerificationError::timeout()))
            }
            Ok(Ok(response)) => self.classify(response).await,
            Ok(Err(err)) => {
                warn!(error = %err, "verification webhook unreachable, retrying once");
                self.retry(&payload).await
            }
        }
    }
}

fn non_empty(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.is_empty())
}
