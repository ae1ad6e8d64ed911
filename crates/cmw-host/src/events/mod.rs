//! Events emitted to the embedding UI and host page.

use serde::Serialize;

use cmw_core::{OutboundHostMessage, WizardSnapshot, WizardView};

/// Events for the embedding UI.
#[derive(Debug, Clone, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum WidgetEvent {
    /// Emitted after every wizard transition.
    WizardState {
        state: WizardSnapshot,
        view: WizardView,
    },
    /// A command could not be parsed or applied.
    CommandError { command: String, message: String },
}

impl WidgetEvent {
    pub fn wizard_state(snapshot: WizardSnapshot) -> Self {
        WidgetEvent::WizardState {
            view: snapshot.view.clone(),
            state: snapshot,
        }
    }
}

/// One outbound line on the transport.
#[derive(Debug, Clone, Serialize)]
#[serde(untagged)]
pub enum OutboundFrame {
    Host(OutboundHostMessage),
    Widget(WidgetEvent),
}
