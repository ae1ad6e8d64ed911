//! Verification outcomes and the wire shapes the webhook speaks.

mod error;
mod outcome;
mod response;

pub use error::{ErrorCode, VerificationError};
pub use outcome::{CreditScore, ReportData, VerificationOutcome};
pub use response::VerificationResponse;
