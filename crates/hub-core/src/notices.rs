//! Transient user-visible notifications
//!
//! Mutations publish a notice when they settle: info on success, error on
//! rollback. Delivery is fire-and-forget over a broadcast channel; with
//! no subscriber the notice is dropped, which matches a toast that nobody
//! is looking at.

use tokio::sync::broadcast;

const CHANNEL_CAPACITY: usize = 32;

/// Notice severity
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NoticeLevel {
    /// Mutation confirmed
    Info,
    /// Mutation rolled back
    Error,
}

/// A transient notification for the user
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notice {
    /// Severity
    pub level: NoticeLevel,
    /// Human-readable message (server messages pass through verbatim)
    pub message: String,
}

/// Broadcast bus for notices
#[derive(Debug, Clone)]
pub struct NoticeBus {
    tx: broadcast::Sender<Notice>,
}

impl NoticeBus {
    /// Create a bus
    #[must_use]
    pub fn new() -> Self {
        let (tx, _rx) = broadcast::channel(CHANNEL_CAPACITY);
        Self { tx }
    }

    /// Subscribe to notices published from now on
    #[must_use]
    pub fn subscribe(&self) -> broadcast::Receiver<Notice> {
        self.tx.subscribe()
    }

    /// Publish a success notice
    pub fn info(&self, message: impl Into<String>) {
        self.publish(NoticeLevel::Info, message.into());
    }

    /// Publish an error notice
    pub fn error(&self, message: impl Into<String>) {
        self.publish(NoticeLevel::Error, message.into());
    }

    fn publish(&self, level: NoticeLevel, message: String) {
        // No subscriber means nobody to show the toast to; that's fine.
        let _ = self.tx.send(Notice { level, message });
    }
}

impl Default for NoticeBus {
    fn default() -> Self {
        Self::new()
    }
}
