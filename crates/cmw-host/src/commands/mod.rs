//! Widget commands
//!
//! Commands sent by the embedding UI, one per user interaction. Each is
//! applied to the wizard session inside its own span.

mod error;

use serde::Deserialize;
use tracing::{info_span, Instrument};

use cmw_app::{WizardSession, WizardSessionError};
use cmw_core::{ContactField, ContactPatch, CredentialField, Provider, SecretString};

pub use error::map_err;

#[derive(Debug, Deserialize)]
#[serde(tag = "command", rename_all = "snake_case")]
pub enum WidgetCommand {
    Mount {
        #[serde(default, rename = "initialContact")]
        initial_contact: Option<ContactPatch>,
    },
    UpdateContactField {
        field: ContactField,
        value: String,
    },
    BlurContactField {
        field: ContactField,
    },
    SubmitContact,
    SelectProvider {
        provider: Provider,
    },
    UpdateUsername {
        value: String,
    },
    UpdatePassword {
        value: SecretString,
    },
    BlurCredentialField {
        field: CredentialField,
    },
    TogglePasswordVisibility,
    SubmitCredentials,
    Back,
    Retry,
    Continue,
    ContentResized {
        height: u32,
    },
    Reset,
    Unmount,
}

impl WidgetCommand {
    pub fn name(&self) -> &'static str {
        match self {
            WidgetCommand::Mount { .. } => "mount",
            WidgetCommand::UpdateContactField { .. } => "update_contact_field",
            WidgetCommand::BlurContactField { .. } => "blur_contact_field",
            WidgetCommand::SubmitContact => "submit_contact",
            WidgetCommand::SelectProvider { .. } => "select_provider",
            WidgetCommand::UpdateUsername { .. } => "update_username",
            WidgetCommand::UpdatePassword { .. } => "update_password",
            WidgetCommand::BlurCredentialField { .. } => "blur_credential_field",
            WidgetCommand::TogglePasswordVisibility => "toggle_password_visibility",
            WidgetCommand::SubmitCredentials => "submit_credentials",
            WidgetCommand::Back => "back",
            WidgetCommand::Retry => "retry",
            WidgetCommand::Continue => "continue",
            WidgetCommand::ContentResized { .. } => "content_resized",
            WidgetCommand::Reset => "reset",
            WidgetCommand::Unmount => "unmount",
        }
    }
}

/// Apply one command to the session.
pub async fn execute(session: &WizardSession, command: WidgetCommand) -> Result<(), String> {
    let span = info_span!("command.widget.execute", command = command.name());
    async {
        let result: Result<(), WizardSessionError> = match command {
            WidgetCommand::Mount { initial_contact } => {
                session.mount(initial_contact).await.map(drop)
            }
            WidgetCommand::UpdateContactField { field, value } => {
                session.update_contact_field(field, value).await.map(drop)
            }
            WidgetCommand::BlurContactField { field } => {
                session.blur_contact_field(field).await.map(drop)
            }
            WidgetCommand::SubmitContact => session.submit_contact().await.map(drop),
            WidgetCommand::SelectProvider { provider } => {
                session.select_provider(provider).await.map(drop)
            }
            WidgetCommand::UpdateUsername { value } => {
                session.update_username(value).await.map(drop)
            }
            WidgetCommand::UpdatePassword { value } => {
                session.update_password(value).await.map(drop)
            }
            WidgetCommand::BlurCredentialField { field } => {
                session.blur_credential_field(field).await.map(drop)
            }
            WidgetCommand::TogglePasswordVisibility => {
                session.toggle_password_visibility().await.map(drop)
            }
            WidgetCommand::SubmitCredentials => session.submit_credentials().await.map(drop),
            WidgetCommand::Back => session.back().await.map(drop),
            WidgetCommand::Retry => session.retry().await.map(drop),
            WidgetCommand::Continue => session.continue_to_next_step().await.map(drop),
            WidgetCommand::ContentResized { height } => {
                session.report_content_height(height).await
            }
            WidgetCommand::Reset => session.reset().await.map(drop),
            WidgetCommand::Unmount => {
                session.unmount().await;
                Ok(())
            }
        };
        result.map_err(map_err)
    }
    .instrument(span)
    .await
}
