pub mod time;
pub mod verification;

pub use time::SystemClock;
pub use verification::{build_verifier, SimulatedVerifier, WebhookVerifier};
