use std::fmt;

use serde::{Deserialize, Serialize};

/// Classification code of a failed verification.
///
/// Servers may send codes the wizard does not know; those are kept verbatim in `Other`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum ErrorCode {
    AccountNotFound,
    InvalidCredentials,
    Timeout,
    NetworkError,
    ApiError,
    UnknownError,
    Other(String),
}

impl ErrorCode {
    pub fn as_str(&self) -> &str {
        match self {
            ErrorCode::AccountNotFound => "ACCOUNT_NOT_FOUND",
            ErrorCode::InvalidCredentials => "INVALID_CREDENTIALS",
            ErrorCode::Timeout => "TIMEOUT",
            ErrorCode::NetworkError => "NETWORK_ERROR",
            ErrorCode::ApiError => "API_ERROR",
            ErrorCode::UnknownError => "UNKNOWN_ERROR",
            ErrorCode::Other(code) => code,
        }
    }
}

impl From<String> for ErrorCode {
    fn from(code: String) -> Self {
        match code.as_str() {
            "ACCOUNT_NOT_FOUND" => ErrorCode::AccountNotFound,
            "INVALID_CREDENTIALS" => ErrorCode::InvalidCredentials,
            "TIMEOUT" => ErrorCode::Timeout,
            "NETWORK_ERROR" => ErrorCode::NetworkError,
            "API_ERROR" => ErrorCode::ApiError,
            "UNKNOWN_ERROR" => ErrorCode::UnknownError,
            _ => ErrorCode::Other(code),
        }
    }
}

impl From<&str> for ErrorCode {
    fn from(code: &str) -> Self {
        ErrorCode::from(code.to_string())
    }
}

impl From<ErrorCode> for String {
    fn from(code: ErrorCode) -> Self {
        code.as_str().to_string()
    }
}

impl fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A classified verification failure.
///
/// `code` and `message` drive control flow and logs; only `user_message` is shown.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VerificationError {
    pub code: ErrorCode,
    #[serde(default)]
    pub message: String,
    #[serde(default)]
    pub user_message: String,
    #[serde(default = "default_retryable")]
    pub retryable: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub support_email: Option<String>,
}

fn default_retryable() -> bool {
    true
}

impl VerificationError {
    pub fn new(
        code: ErrorCode,
        message: impl Into<String>,
        user_message: impl Into<String>,
    ) -> Self {
        Self {
            code,
            message: message.into(),
            user_message: user_message.into(),
            retryable: true,
            support_email: None,
        }
    }

    pub fn with_support_email(mut self, email: impl Into<String>) -> Self {
        self.support_email = Some(email.into());
        self
    }

    pub fn account_not_found() -> Self {
        Self::new(
            ErrorCode::AccountNotFound,
            "No active credit monitoring account found with these credentials.",
            "We couldn't find an active account. Please check your credentials or sign up for monitoring.",
        )
    }

    pub fn invalid_credentials() -> Self {
        Self::new(
            ErrorCode::InvalidCredentials,
            "Username or password is incorrect.",
            "The credentials you entered are incorrect. Please try again.",
        )
    }

    pub fn timeout() -> Self {
        Self::new(
            ErrorCode::Timeout,
            "Request timed out",
            "The request took too long. Please try again.",
        )
    }

    pub fn network(support_email: impl Into<String>) -> Self {
        Self::new(
            ErrorCode::NetworkError,
            "Network request failed",
            "We're experiencing technical difficulties. Please check your connection and try again.",
        )
        .with_support_email(support_email)
    }

    /// Non-2xx webhook response; each part falls back to a generic value when the body omits it.
    pub fn api(code: Option<String>, message: Option<String>, user_message: Option<String>) -> Self {
        Self::new(
            code.map(ErrorCode::from).unwrap_or(ErrorCode::ApiError),
            message.unwrap_or_else(|| "API request failed".to_string()),
            user_message.unwrap_or_else(|| "Something went wrong. Please try again.".to_string()),
        )
    }

    /// Fill an empty `message` or `user_message` with the stock text for `code`.
    pub fn or_defaults(mut self) -> Self {
        if !self.message.is_empty() && !self.user_message.is_empty() {
            return self;
        }
        let stock = match self.code {
            ErrorCode::AccountNotFound => Self::account_not_found(),
            ErrorCode::InvalidCredentials => Self::invalid_credentials(),
            ErrorCode::Timeout => Self::timeout(),
            ErrorCode::UnknownError => Self::unknown("Unexpected error"),
            _ => Self::api(None, None, None),
        };
        if self.message.is_empty() {
            self.message = stock.message;
        }
        if self.user_message.is_empty() {
            self.user_message = stock.user_message;
        }
        self
    }

    pub fn unknown(detail: impl Into<String>) -> Self {
        Self::new(
            ErrorCode::UnknownError,
            detail,
            "An unexpected error occurred. Please try again.",
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn known_codes_parse_to_variants() {
        assert_eq!(ErrorCode::from("TIMEOUT"), ErrorCode::Timeout);
        assert_eq!(
            ErrorCode::from("ACCOUNT_NOT_FOUND"),
            ErrorCode::AccountNotFound
        );
        assert_eq!(
            ErrorCode::from("ACCOUNT_LOCKED"),
            ErrorCode::Other("ACCOUNT_LOCKED".into())
        );
    }

    #[test]
    fn error_serializes_in_wire_shape() {
        let value = serde_json::to_value(VerificationError::network("help@example.com")).unwrap();
        assert_eq!(value["code"], "NETWORK_ERROR");
        assert_eq!(value["supportEmail"], "help@example.com");
        assert_eq!(value["retryable"], true);
        assert!(value["userMessage"].as_str().unwrap().contains("technical difficulties"));
    }

    #[test]
    fn api_error_falls_back_to_generic_values() {
        let err = VerificationError::api(None, None, None);
        assert_eq!(err.code, ErrorCode::ApiError);
        assert_eq!(err.message, "API request failed");
        assert_eq!(err.user_message, "Something went wrong. Please try again.");

        let err = VerificationError::api(Some("RATE_LIMITED".into()), None, Some("Slow down".into()));
        assert_eq!(err.code.as_str(), "RATE_LIMITED");
        assert_eq!(err.user_message, "Slow down");
    }

    #[test]
    fn missing_texts_take_stock_values_for_the_code() {
        let err: VerificationError = serde_json::from_value(serde_json::json!({
            "code": "ACCOUNT_NOT_FOUND",
            "userMessage": "No active account"
        }))
        .unwrap();
        assert!(err.message.is_empty());

        let err = err.or_defaults();
        assert_eq!(err.message, VerificationError::account_not_found().message);
        assert_eq!(err.user_message, "No active account");

        let err: VerificationError =
            serde_json::from_value(serde_json::json!({"code": "ACCOUNT_LOCKED"})).unwrap();
        let err = err.or_defaults();
        assert_eq!(err.code.as_str(), "ACCOUNT_LOCKED");
        assert_eq!(err.user_message, "Something went wrong. Please try again.");
    }

    #[test]
    fn missing_retryable_defaults_to_true() {
        let err: VerificationError = serde_json::from_value(serde_json::json!({
            "code": "INVALID_CREDENTIALS",
            "message": "bad",
            "userMessage": "Bad login"
        }))
        .unwrap();
        assert!(err.retryable);
        assert!(err.support_email.is_none());
    }
}
