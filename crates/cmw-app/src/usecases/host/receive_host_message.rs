use serde_json::Value;
use tracing::{debug, info};

use cmw_core::{InboundHostMessage, WizardEvent};

/// Turn a message posted by the host page into a wizard event.
///
/// Contact data becomes a prefill. Config is only logged. Anything else is
/// ignored.
pub struct HandleHostMessage;

impl HandleHostMessage {
    pub fn execute(raw: &Value) -> Option<WizardEvent> {
        let Some(message) = InboundHostMessage::parse(raw) else {
            debug!("ignoring unrecognized host message");
            return None;
        };

        match message {
            InboundHostMessage::ContactData {
                contact: Some(patch),
            } => {
                info!("host sent contact data");
                Some(WizardEvent::PrefillContact(patch))
            }
            InboundHostMessage::ContactData { contact: None } => {
                debug!("host contact data had no contact");
                None
            }
            InboundHostMessage::Config { config } => {
                let keys: Vec<&str> = config
                    .as_object()
                    .map(|map| map.keys().map(String::as_str).collect())
                    .unwrap_or_default();
                info!(?keys, "host sent config");
                None
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn contact_data_becomes_prefill() {
        let event = HandleHostMessage::execute(&json!({
            "type": "ghl_contact_data",
            "contact": {"firstName": "Jane", "id": "c-1", "tags": ["a"]}
        }));
        match event {
            Some(WizardEvent::PrefillContact(patch)) => {
                assert_eq!(patch.first_name.as_deref(), Some("Jane"));
            }
            other => panic!("unexpected event: {other:?}"),
        }
    }

    #[test]
    fn config_and_unknown_messages_produce_nothing() {
        assert!(HandleHostMessage::execute(&json!({"type": "ghl_config", "config": {"x": 1}})).is_none());
        assert!(HandleHostMessage::execute(&json!({"type": "ghl_contact_data"})).is_none());
        assert!(HandleHostMessage::execute(&json!({"type": "other"})).is_none());
        assert!(HandleHostMessage::execute(&json!(42)).is_none());
    }
}
