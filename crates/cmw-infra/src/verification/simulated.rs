use std::ops::RangeInclusive;
use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use rand::Rng;
use tracing::debug;

use cmw_core::ports::{ClockPort, VerificationFault, VerificationPort};
use cmw_core::{
    ContactInfo, CreditScore, Credentials, ReportData, VerificationError, VerificationOutcome,
};

use super::payload::calendar_date;

const SUCCESS_PASSWORD: &str = "12345";
const INACTIVE_PASSWORD: &str = "67890";
const SAMPLE_REPORT_URL: &str = "https://storage.example.com/reports/sample.pdf";
const SAMPLE_SUBSCRIPTION_EXPIRES: &str = "2027-01-13";

/// Local stand-in for the webhook, keyed on the password.
///
/// `12345` succeeds, `67890` has no active account, anything else is rejected.
pub struct SimulatedVerifier {
    clock: Arc<dyn ClockPort>,
    delay_ms: RangeInclusive<u64>,
}

impl SimulatedVerifier {
    pub fn new(clock: Arc<dyn ClockPort>) -> Self {
        Self {
            clock,
            delay_ms: 1000..=2000,
        }
    }

    pub fn with_delay_ms(mut self, delay_ms: RangeInclusive<u64>) -> Self {
        self.delay_ms = delay_ms;
        self
    }

    fn sample_report(&self) -> ReportData {
        ReportData {
            account_active: true,
            report_retrieved: true,
            report_url: SAMPLE_REPORT_URL.to_string(),
            report_date: calendar_date(self.clock.now_ms()),
            credit_score: Some(CreditScore {
                transunion: 720,
                experian: 715,
                equifax: 718,
            }),
            subscription_expires: Some(SAMPLE_SUBSCRIPTION_EXPIRES.to_string()),
        }
    }
}

#[async_trait]
impl VerificationPort for SimulatedVerifier {
    async fn verify(
        &self,
        _contact: &ContactInfo,
        credentials: &Credentials,
    ) -> Result<VerificationOutcome, VerificationFault> {
        let delay = Duration::from_millis(rand::rng().random_range(self.delay_ms.clone()));
        debug!(delay_ms = delay.as_millis() as u64, "simulating verification delay");
        tokio::time::sleep(delay).await;

        let outcome = match credentials.password.expose() {
            SUCCESS_PASSWORD => VerificationOutcome::Success {
                report: self.sample_report(),
                message: "Credit report successfully retrieved and uploaded.".to_string(),
            },
            INACTIVE_PASSWORD => {
                VerificationOutcome::from_error(VerificationError::account_not_found())
            }
            _ => VerificationOutcome::from_error(VerificationError::invalid_credentials()),
        };
        Ok(outcome)
    }

    fn is_simulated(&self) -> bool {
        true
    }
}
