use serde::{Deserialize, Serialize};

use super::{ReportData, VerificationError, VerificationOutcome};
use crate::ports::VerificationFault;

/// Body of a 2xx webhook response.
///
/// `{success: true, data, message}` or `{success: false, error}`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct VerificationResponse {
    pub success: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub data: Option<ReportData>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<VerificationError>,
}

impl VerificationResponse {
    pub fn into_outcome(self) -> Result<VerificationOutcome, VerificationFault> {
        match (self.success, self.data, self.error) {
            (true, Some(report), _) => Ok(VerificationOutcome::Success {
                report,
                message: self.message.unwrap_or_default(),
            }),
            (true, None, _) => Err(VerificationFault::MalformedResponse(
                "success response without data".to_string(),
            )),
            (false, _, Some(error)) => Ok(VerificationOutcome::from_error(error.or_defaults())),
            (false, _, None) => Err(VerificationFault::MalformedResponse(
                "failure response without error".to_string(),
            )),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::verification::ErrorCode;

    #[test]
    fn success_body_becomes_success_outcome() {
        let body: VerificationResponse = serde_json::from_value(serde_json::json!({
            "success": true,
            "data": {
                "accountActive": true,
                "reportRetrieved": true,
                "reportUrl": "https://example.com/r.pdf",
                "reportDate": "2026-01-01",
                "creditScore": {"transunion": 700, "experian": 701, "equifax": 702}
            },
            "message": "ok"
        }))
        .unwrap();

        match body.into_outcome().unwrap() {
            VerificationOutcome::Success { report, message } => {
                assert_eq!(report.credit_score.unwrap().experian, 701);
                assert!(report.subscription_expires.is_none());
                assert_eq!(message, "ok");
            }
            other => panic!("unexpected outcome: {other:?}"),
        }
    }

    #[test]
    fn failure_body_is_classified() {
        let body: VerificationResponse = serde_json::from_value(serde_json::json!({
            "success": false,
            "error": {
                "code": "ACCOUNT_NOT_FOUND",
                "message": "none",
                "userMessage": "No account",
                "retryable": true
            }
        }))
        .unwrap();

        let outcome = body.into_outcome().unwrap();
        assert_eq!(outcome.code(), Some(&ErrorCode::AccountNotFound));
    }

    #[test]
    fn failure_body_without_message_still_promotes_account_not_found() {
        let body: VerificationResponse = serde_json::from_str(
            r#"{"success":false,"error":{"code":"ACCOUNT_NOT_FOUND","userMessage":"No account"}}"#,
        )
        .unwrap();

        match body.into_outcome().unwrap() {
            VerificationOutcome::AccountNotFound { error } => {
                assert_eq!(error.user_message, "No account");
                assert!(!error.message.is_empty());
            }
            other => panic!("unexpected outcome: {other:?}"),
        }
    }

    #[test]
    fn success_without_data_is_malformed() {
        let body = VerificationResponse {
            success: true,
            data: None,
            message: None,
            error: None,
        };
        assert!(matches!(
            body.into_outcome(),
            Err(VerificationFault::MalformedResponse(_))
        ));
    }
}
