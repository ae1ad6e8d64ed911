//! # Configuration Loader
//!
//! Reads `WizardConfig` from a TOML file. Keys use the same camelCase names
//! as the host page config; every missing key takes its default.

use std::path::{Path, PathBuf};

use cmw_core::WizardConfig;

/// Environment variable naming the TOML config file.
pub const CONFIG_ENV: &str = "CREDIT_WIZARD_CONFIG";

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("failed to read config file {}: {source}", path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("failed to parse config file {}: {source}", path.display())]
    Parse {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },
}

/// Load configuration from a TOML file.
pub fn load_config(config_path: &Path) -> Result<WizardConfig, ConfigError> {
    let content = std::fs::read_to_string(config_path).map_err(|source| ConfigError::Read {
        path: config_path.to_path_buf(),
        source,
    })?;
    toml::from_str(&content).map_err(|source| ConfigError::Parse {
        path: config_path.to_path_buf(),
        source,
    })
}

/// Load from [`CONFIG_ENV`] when set, otherwise use defaults.
pub fn resolve_config() -> Result<WizardConfig, ConfigError> {
    match std::env::var_os(CONFIG_ENV) {
        Some(path) => load_config(Path::new(&path)),
        None => Ok(WizardConfig::default()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use cmw_core::BillingModel;
    use std::io::Write;
    use tempfile::NamedTempFile;

    fn write_config(content: &str) -> NamedTempFile {
        let mut file = NamedTempFile::new().unwrap();
        file.write_all(content.as_bytes()).unwrap();
        file
    }

    #[test]
    fn reads_valid_toml() {
        let file = write_config(
            r##"
            webhookUrl = "https://hooks.example.com/verify"
            enableMockMode = false
            billingModel = "agency_pay"
            brandColor = "#111111"
            supportEmail = "help@agency.test"
            "##,
        );

        let config = load_config(file.path()).unwrap();
        assert_eq!(config.webhook_url, "https://hooks.example.com/verify");
        assert!(!config.enable_mock_mode);
        assert_eq!(config.billing_model, BillingModel::AgencyPay);
        assert_eq!(config.brand_color, "#111111");
        assert_eq!(config.support_email, "help@agency.test");
    }

    #[test]
    fn missing_keys_take_defaults() {
        let file = write_config("calendarId = \"cal-9\"\n");

        let config = load_config(file.path()).unwrap();
        assert_eq!(config.calendar_id, "cal-9");
        assert!(config.enable_mock_mode);
        assert_eq!(config.affiliate_link, "https://www.smartcredit.com/join");
        assert_eq!(config.support_email, "support@youragency.com");
    }

    #[test]
    fn missing_file_is_a_read_error() {
        let err = load_config(Path::new("/definitely/not/here.toml")).unwrap_err();
        assert!(matches!(err, ConfigError::Read { .. }));
    }

    #[test]
    fn invalid_toml_is_a_parse_error() {
        let file = write_config("enableMockMode = \"maybe\"\n");
        let err = load_config(file.path()).unwrap_err();
        assert!(matches!(err, ConfigError::Parse { .. }));
    }
}
