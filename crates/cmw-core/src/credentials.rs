//! Provider credentials collected on the second wizard step.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::security::SecretString;

/// Credit monitoring providers the wizard can verify against.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Provider {
    #[default]
    SmartCredit,
    PrivacyGuard,
    IdentityIq,
    MyScoreIq,
}

impl Provider {
    pub const ALL: [Provider; 4] = [
        Provider::SmartCredit,
        Provider::PrivacyGuard,
        Provider::IdentityIq,
        Provider::MyScoreIq,
    ];

    /// Wire value, as sent to the webhook.
    pub fn as_str(&self) -> &'static str {
        match self {
            Provider::SmartCredit => "smartcredit",
            Provider::PrivacyGuard => "privacyguard",
            Provider::IdentityIq => "identityiq",
            Provider::MyScoreIq => "myscoreiq",
        }
    }

    /// Human readable name for the provider picker.
    pub fn label(&self) -> &'static str {
        match self {
            Provider::SmartCredit => "SmartCredit",
            Provider::PrivacyGuard => "PrivacyGuard",
            Provider::IdentityIq => "IdentityIQ",
            Provider::MyScoreIq => "MyScoreIQ",
        }
    }
}

impl fmt::Display for Provider {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown provider: {0}")]
pub struct UnknownProvider(pub String);

impl FromStr for Provider {
    type Err = UnknownProvider;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Provider::ALL
            .into_iter()
            .find(|p| p.as_str() == s)
            .ok_or_else(|| UnknownProvider(s.to_string()))
    }
}

/// Addressable credential form fields.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum CredentialField {
    Username,
    Password,
}

/// Provider login. Not `Clone`: the password only leaves through
/// [`Credentials::duplicate`] when a verification request is built.
#[derive(Debug, Default)]
pub struct Credentials {
    pub provider: Provider,
    pub username: String,
    pub password: SecretString,
}

impl Credentials {
    pub fn new(provider: Provider, username: impl Into<String>, password: SecretString) -> Self {
        Self {
            provider,
            username: username.into(),
            password,
        }
    }

    pub fn duplicate(&self) -> Self {
        Self {
            provider: self.provider,
            username: self.username.clone(),
            password: self.password.duplicate(),
        }
    }
}
