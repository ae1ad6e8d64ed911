//! Verification clients.
//!
//! Simulated mode answers locally from the password; live mode posts to the
//! configured webhook.

mod payload;
mod simulated;
mod webhook;

use std::sync::Arc;

use tracing::{info, warn};

use cmw_core::ports::{ClockPort, VerificationPort};
use cmw_core::WizardConfig;

pub use payload::{ErrorEnvelope, VerificationPayload, USER_AGENT};
pub use simulated::SimulatedVerifier;
pub use webhook::WebhookVerifier;

/// Pick the verification client for this configuration.
pub fn build_verifier(
    config: &WizardConfig,
    clock: Arc<dyn ClockPort>,
) -> anyhow::Result<Arc<dyn VerificationPort>> {
    if config.enable_mock_mode {
        info!("verification running in simulated mode");
        return Ok(Arc::new(SimulatedVerifier::new(clock)));
    }

    if config.webhook_url.trim().is_empty() {
        warn!("live verification has no webhook url; every attempt will fail");
    }
    let verifier = WebhookVerifier::new(&config.webhook_url, &config.support_email, clock)?;
    info!("verification running against webhook");
    Ok(Arc::new(verifier))
}

#[cfg(test)]
mod tests {
    use super::*;

    struct FixedClock;

    impl ClockPort for FixedClock {
        fn now_ms(&self) -> i64 {
            0
        }
    }

    #[test]
    fn mock_mode_builds_simulated_verifier() {
        let verifier = build_verifier(&WizardConfig::default(), Arc::new(FixedClock)).unwrap();
        assert!(verifier.is_simulated());
    }

    #[test]
    fn live_mode_builds_webhook_verifier() {
        let live = WizardConfig {
            enable_mock_mode: false,
            webhook_url: "https://hooks.example.com/verify".into(),
            ..WizardConfig::default()
        };
        let verifier = build_verifier(&live, Arc::new(FixedClock)).unwrap();
        assert!(!verifier.is_simulated());
    }
}
