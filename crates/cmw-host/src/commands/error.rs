use cmw_app::WizardSessionError;

/// Centralized error mapping for commands.
pub fn map_err(err: WizardSessionError) -> String {
    err.to_string()
}
