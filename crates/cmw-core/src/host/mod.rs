//! Typed messages exchanged with the embedding host page.

mod message;

pub use message::{InboundHostMessage, OutboundHostMessage, RESIZE_BUFFER_PX};
