//! Per-instrument publish throttling.

use tessera_core::types::Timestamp;

/// Suppresses snapshots that follow the last published one too closely.
///
/// The window is measured in event time. Only published snapshots move the
/// window; suppressed updates leave it where it is.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PublishThrottle {
    min_interval_ms: i64,
    last_published: Option<Timestamp>,
}

impl PublishThrottle {
    /// Creates a throttle with the given window.
    pub fn new(min_interval_ms: i64) -> Self {
        Self {
            min_interval_ms,
            last_published: None,
        }
    }

    /// Whether a snapshot for an event at `timestamp` may be published.
    pub fn allows(&self, timestamp: Timestamp) -> bool {
        match self.last_published {
            None => true,
            Some(last) => timestamp.millis_since(last) >= self.min_interval_ms,
        }
    }

    /// Records a published snapshot.
    pub fn record(&mut self, timestamp: Timestamp) {
        self.last_published = Some(timestamp);
    }

    /// Event time of the last published snapshot.
    pub fn last_published(&self) -> Option<Timestamp> {
        self.last_published
    }

    /// Window length in milliseconds.
    pub fn min_interval_ms(&self) -> i64 {
        self.min_interval_ms
    }
}
