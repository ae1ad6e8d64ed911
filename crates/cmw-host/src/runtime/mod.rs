//! JSON-lines transport between the wizard session and the outside world.

mod transport;

pub use transport::run_transport;
