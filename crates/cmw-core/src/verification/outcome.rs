use serde::{Deserialize, Serialize};

use super::{ErrorCode, VerificationError};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct CreditScore {
    pub transunion: u16,
    pub experian: u16,
    pub equifax: u16,
}

impl CreditScore {
    /// `"720 / 715 / 718"` (TransUnion / Experian / Equifax).
    pub fn summary(&self) -> String {
        format!("{} / {} / {}", self.transunion, self.experian, self.equifax)
    }
}

/// Report details returned on a successful verification. Display-only.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReportData {
    pub account_active: bool,
    pub report_retrieved: bool,
    pub report_url: String,
    pub report_date: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub credit_score: Option<CreditScore>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub subscription_expires: Option<String>,
}

/// Result of exactly one verification attempt.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "camelCase")]
pub enum VerificationOutcome {
    Success { report: ReportData, message: String },
    AccountNotFound { error: VerificationError },
    Error { error: VerificationError },
}

impl VerificationOutcome {
    /// Classify a failure. `ACCOUNT_NOT_FOUND` is the only code with its own variant.
    pub fn from_error(error: VerificationError) -> Self {
        if error.code == ErrorCode::AccountNotFound {
            VerificationOutcome::AccountNotFound { error }
        } else {
            VerificationOutcome::Error { error }
        }
    }

    pub fn error(&self) -> Option<&VerificationError> {
        match self {
            VerificationOutcome::Success { .. } => None,
            VerificationOutcome::AccountNotFound { error }
            | VerificationOutcome::Error { error } => Some(error),
        }
    }

    pub fn code(&self) -> Option<&ErrorCode> {
        self.error().map(|e| &e.code)
    }

    pub fn is_success(&self) -> bool {
        matches!(self, VerificationOutcome::Success { .. })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn only_account_not_found_gets_its_own_variant() {
        let outcome = VerificationOutcome::from_error(VerificationError::account_not_found());
        assert!(matches!(outcome, VerificationOutcome::AccountNotFound { .. }));

        for error in [
            VerificationError::invalid_credentials(),
            VerificationError::timeout(),
            VerificationError::network("s@example.com"),
            VerificationError::api(Some("ACCOUNT_SUSPENDED".into()), None, None),
        ] {
            let outcome = VerificationOutcome::from_error(error);
            assert!(matches!(outcome, VerificationOutcome::Error { .. }));
        }
    }

    #[test]
    fn score_summary_uses_bureau_order() {
        let score = CreditScore {
            transunion: 720,
            experian: 715,
            equifax: 718,
        };
        assert_eq!(score.summary(), "720 / 715 / 718");
    }

    #[test]
    fn outcome_serializes_with_kind_tag() {
        let value =
            serde_json::to_value(VerificationOutcome::from_error(VerificationError::timeout()))
                .unwrap();
        assert_eq!(value["kind"], "error");
        assert_eq!(value["error"]["code"], "TIMEOUT");
    }
}
