use serde::{Deserialize, Serialize};

use crate::contact::ContactPatch;

/// Extra pixels added to every reported content height.
pub const RESIZE_BUFFER_PX: u32 = 20;

/// Messages the widget posts to the host page. Fire-and-forget, no acknowledgement.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum OutboundHostMessage {
    /// Ask the funnel builder for the current contact so step 1 can be prefilled.
    #[serde(rename = "request_contact_data")]
    RequestContactData,
    /// Tell the funnel to move on to its next step.
    #[serde(rename = "customWidgetGoToNextStep")]
    GoToNextStep,
    /// Content height changed; the host resizes the iframe.
    #[serde(rename = "resize")]
    Resize { height: u32 },
}

impl OutboundHostMessage {
    pub fn name(&self) -> &'static str {
        match self {
            OutboundHostMessage::RequestContactData => "request_contact_data",
            OutboundHostMessage::GoToNextStep => "customWidgetGoToNextStep",
            OutboundHostMessage::Resize { .. } => "resize",
        }
    }
}

/// Messages the host page posts to the widget.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum InboundHostMessage {
    #[serde(rename = "ghl_contact_data")]
    ContactData {
        #[serde(default)]
        contact: Option<ContactPatch>,
    },
    #[serde(rename = "ghl_config")]
    Config {
        #[serde(default)]
        config: serde_json::Value,
    },
}

impl InboundHostMessage {
    pub const KNOWN_TYPES: [&'static str; 2] = ["ghl_contact_data", "ghl_config"];

    /// Parse an untyped message. Non-objects and unknown `type`s yield `None`.
    pub fn parse(value: &serde_json::Value) -> Option<Self> {
        let kind = value.as_object()?.get("type")?.as_str()?;
        if !Self::KNOWN_TYPES.contains(&kind) {
            return None;
        }
        serde_json::from_value(value.clone()).ok()
    }
}
