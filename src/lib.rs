//! Credit Wizard Library
//!
//! Process entry for the embeddable credit monitoring wizard.

use tracing::{error, info};

// 重新导出常用类型
pub use cmw_core::{WizardConfig, WizardSnapshot};
pub use cmw_host::bootstrap::{load_config, resolve_config};

/// Initialize tracing, load configuration and serve the wizard over stdio.
pub async fn run() -> anyhow::Result<()> {
    cmw_host::bootstrap::tracing::init_tracing_subscriber()?;

    let config = match resolve_config() {
        Ok(config) => config,
        Err(err) => {
            error!(error = %err, "failed to load configuration");
            return Err(err.into());
        }
    };
    info!(
        version = env!("CARGO_PKG_VERSION"),
        mock_mode = config.enable_mock_mode,
        "starting credit wizard"
    );

    cmw_host::bootstrap::run_stdio(config).await
}
