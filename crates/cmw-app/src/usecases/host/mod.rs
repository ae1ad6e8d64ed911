//! Use cases for the host page side of the bridge.

mod receive_host_message;
mod report_height;

pub use receive_host_message::HandleHostMessage;
pub use report_height::ReportContentHeight;
