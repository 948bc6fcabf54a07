//! Notification sink for the terminal front-end.

use std::sync::{Arc, Mutex};

use planledger_core::events::{Notification, NotificationKind, NotificationSink};

/// Buffers notifications until the REPL prints them after each command, and
/// mirrors each one to the log.
#[derive(Clone, Default)]
pub struct TerminalNotificationSink {
    pending: Arc<Mutex<Vec<Notification>>>,
}

impl TerminalNotificationSink {
    pub fn new() -> Self {
        Self::default()
    }

    /// Takes every buffered notification, oldest first.
    pub fn drain(&self) -> Vec<Notification> {
        self.pending
            .lock()
            .map(|mut pending| std::mem::take(&mut *pending))
            .unwrap_or_default()
    }
}

impl NotificationSink for TerminalNotificationSink {
    fn emit(&self, notification: Notification) {
        match notification.kind {
            NotificationKind::Success => tracing::info!(text = %notification.message, "notification"),
            NotificationKind::Error => tracing::warn!(text = %notification.message, "notification"),
        }
        if let Ok(mut pending) = self.pending.lock() {
            pending.push(notification);
        }
    }
}
