use async_trait::async_trait;

use crate::contact::ContactInfo;
use crate::credentials::Credentials;
use crate::verification::VerificationOutcome;

/// Failure that escaped classification. The wizard reports it as `UNKNOWN_ERROR`.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum VerificationFault {
    #[error("malformed verification response: {0}")]
    MalformedResponse(String),
    #[error("verification failed unexpectedly: {0}")]
    Unexpected(String),
}

/// Checks provider credentials, either against the webhook or locally.
///
/// Classified failures (timeout, network, API, bad credentials) come back as
/// `Ok(VerificationOutcome::Error { .. })`; `Err` is reserved for faults.
#[async_trait]
pub trait VerificationPort: Send + Sync {
    async fn verify(
        &self,
        contact: &ContactInfo,
        credentials: &Credentials,
    ) -> Result<VerificationOutcome, VerificationFault>;

    /// Answers locally instead of calling the webhook.
    fn is_simulated(&self) -> bool {
        false
    }
}
