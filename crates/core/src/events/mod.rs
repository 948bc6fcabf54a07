//! Notifications module.
//!
//! Provides the outcome notification type and the sink trait the ledger
//! service reports through. Front-ends implement the sink to render toasts,
//! print lines, or forward to a log.

mod messages;
mod notification;
mod sink;

pub use messages::*;
pub use notification::*;
pub use sink::*;
