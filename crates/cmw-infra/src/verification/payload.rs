use chrono::{DateTime, SecondsFormat, Utc};
use serde::{Deserialize, Serialize};

use cmw_core::{ContactInfo, Credentials, Provider};

/// Client identifier sent as `metadata.userAgent`.
pub const USER_AGENT: &str = concat!("credit-wizard/", env!("CARGO_PKG_VERSION"));

/// Body posted to the verification webhook.
///
/// Borrows the password for the duration of the request only. No `Debug`
/// impl, so it cannot end up in logs.
#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct VerificationPayload<'a> {
    pub contact_info: &'a ContactInfo,
    pub credentials: WireCredentials<'a>,
    pub metadata: Metadata,
}

#[derive(Serialize)]
pub struct WireCredentials<'a> {
    pub provider: Provider,
    pub username: &'a str,
    pub password: &'a str,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Metadata {
    pub user_agent: &'static str,
    pub timestamp: String,
}

impl<'a> VerificationPayload<'a> {
    pub fn new(contact: &'a ContactInfo, credentials: &'a Credentials, now_ms: i64) -> Self {
        Self {
            contact_info: contact,
            credentials: WireCredentials {
                provider: credentials.provider,
                username: &credentials.username,
                password: credentials.password.expose(),
            },
            metadata: Metadata {
                user_agent: USER_AGENT,
                timestamp: rfc3339_utc(now_ms),
            },
        }
    }
}

/// `2026-10-18T09:30:00.000Z`
pub(crate) fn rfc3339_utc(ms: i64) -> String {
    DateTime::<Utc>::from_timestamp_millis(ms)
        .unwrap_or_default()
        .to_rfc3339_opts(SecondsFormat::Millis, true)
}

/// `2026-10-18`
pub(crate) fn calendar_date(ms: i64) -> String {
    DateTime::<Utc>::from_timestamp_millis(ms)
        .unwrap_or_default()
        .format("%Y-%m-%d")
        .to_string()
}

/// Body of a non-2xx webhook response. Every part is optional.
#[derive(Debug, Default, Deserialize)]
pub struct ErrorEnvelope {
    #[serde(default)]
    pub error: Option<ErrorDetail>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ErrorDetail {
    pub code: Option<String>,
    pub message: Option<String>,
    pub user_message: Option<String>,
}
