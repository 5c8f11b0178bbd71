//! Notification sink - advisory UI feedback for store mutations.
//!
//! Stores emit exactly one notification per successful mutating operation
//! and none for reads. Delivery is fire-and-forget: the sink is never
//! awaited and gives no delivery guarantee.

use std::sync::{Arc, RwLock};

/// A transient, purely advisory message (toast/banner content).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notification {
    /// Short headline, e.g. "Added to cart"
    pub title: String,
    /// One-line detail, e.g. the artwork title affected
    pub description: String,
}

impl Notification {
    /// Build a notification from any displayable pair.
    pub fn new(title: impl Into<String>, description: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            description: description.into(),
        }
    }
}

/// Consumer of store notifications.
pub trait NotificationSink: Send + Sync {
    /// Deliver a notification. Must not block.
    fn notify(&self, notification: Notification);
}

/// Sink that discards everything.
#[derive(Debug, Clone, Copy, Default)]
pub struct NullSink;

impl NotificationSink for NullSink {
    fn notify(&self, _notification: Notification) {}
}

/// Sink that appends notifications to a shared buffer.
///
/// Clone-friendly via Arc; one clone goes to the stores, another to whatever
/// drains the buffer (a toast renderer, or a test assertion).
#[derive(Debug, Clone, Default)]
pub struct RecordingSink {
    buffer: Arc<RwLock<Vec<Notification>>>,
}

impl RecordingSink {
    /// Create an empty recording sink.
    pub fn new() -> Self {
        Self::default()
    }

    /// Snapshot of all notifications delivered so far.
    pub fn notifications(&self) -> Vec<Notification> {
        self.buffer.read().map(|b| b.clone()).unwrap_or_default()
    }

    /// Remove and return all buffered notifications.
    pub fn drain(&self) -> Vec<Notification> {
        self.buffer
            .write()
            .map(|mut b| std::mem::take(&mut *b))
            .unwrap_or_default()
    }

    /// Number of notifications delivered so far.
    pub fn len(&self) -> usize {
        self.buffer.read().map(|b| b.len()).unwrap_or(0)
    }

    /// True when nothing has been delivered yet.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl NotificationSink for RecordingSink {
    fn notify(&self, notification: Notification) {
        if let Ok(mut buffer) = self.buffer.write() {
            buffer.push(notification);
        }
    }
}
