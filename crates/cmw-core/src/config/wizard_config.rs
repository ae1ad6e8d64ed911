//! Wizard configuration (pure data).
//!
//! Every field has a default, so a host may pass any subset of keys and the
//! rest fall back. Nothing here is persisted.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BillingModel {
    #[default]
    ClientPay,
    AgencyPay,
    Hybrid,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct WizardConfig {
    /// Verification webhook, used when mock mode is off.
    pub webhook_url: String,
    pub ghl_api_key: String,

    /// "Activate monitoring" target on the failure screen.
    pub affiliate_link: String,
    pub calendar_id: String,
    pub billing_model: BillingModel,
    pub enable_mock_mode: bool,
    pub custom_success_message: String,
    pub custom_failure_message: String,
    pub brand_color: String,
    pub support_email: String,
}

impl Default for WizardConfig {
    fn default() -> Self {
        Self {
            webhook_url: String::new(),
            ghl_api_key: String::new(),
            affiliate_link: "https://www.smartcredit.com/join".to_string(),
            calendar_id: String::new(),
            billing_model: BillingModel::ClientPay,
            enable_mock_mode: true,
            custom_success_message: String::new(),
            custom_failure_message: String::new(),
            brand_color: "#2563EB".to_string(),
            support_email: "support@youragency.com".to_string(),
        }
    }
}

impl WizardConfig {
    pub fn calendar_id(&self) -> Option<&str> {
        non_empty(&self.calendar_id)
    }

    pub fn support_email(&self) -> Option<&str> {
        non_empty(&self.support_email)
    }

    pub fn custom_success_message(&self) -> Option<&str> {
        non_empty(&self.custom_success_message)
    }

    pub fn custom_failure_message(&self) -> Option<&str> {
        non_empty(&self.custom_failure_message)
    }
}

fn non_empty(value: &str) -> Option<&str> {
    if value.is_empty() {
        None
    } else {
        Some(value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn partial_overrides_merge_with_defaults() {
        let config: WizardConfig = serde_json::from_value(json!({
            "enableMockMode": false,
            "webhookUrl": "https://hooks.example.com/verify",
            "billingModel": "agency_pay"
        }))
        .unwrap();

        assert!(!config.enable_mock_mode);
        assert_eq!(config.webhook_url, "https://hooks.example.com/verify");
        assert_eq!(config.billing_model, BillingModel::AgencyPay);
        assert_eq!(config.affiliate_link, "https://www.smartcredit.com/join");
        assert_eq!(config.support_email, "support@youragency.com");
    }

    #[test]
    fn defaults_enable_mock_mode() {
        let config = WizardConfig::default();
        assert!(config.enable_mock_mode);
        assert_eq!(config.brand_color, "#2563EB");
        assert!(config.calendar_id().is_none());
        assert_eq!(config.support_email(), Some("support@youragency.com"));
    }
}
