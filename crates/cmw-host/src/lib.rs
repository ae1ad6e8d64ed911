//! Host side of the credit monitoring wizard
//!
//! Adapters for the host page bridge and the embedding UI, the JSON-lines
//! transport that carries both, and process bootstrap.

pub mod adapters;
pub mod bootstrap;
pub mod commands;
pub mod events;
pub mod runtime;
