//! Stream completion tracking.
//!
//! A consumer expects one `DONE` marker per partition it reads. The barrier
//! counts distinct partitions down to zero and fires its callback exactly
//! once when the last one reports.

use std::collections::HashSet;
use std::sync::atomic::{AtomicUsize, Ordering};

use parking_lot::Mutex;
use tokio::sync::Notify;
use tracing::{debug, info};

use tessera_traits::PartitionKey;

type Callback = Box<dyn FnOnce() + Send>;

/// Countdown over the partitions of one stream.
pub struct StreamCompletionBarrier {
    name: String,
    expected: usize,
    remaining: AtomicUsize,
    done: Mutex<HashSet<PartitionKey>>,
    on_complete: Mutex<Option<Callback>>,
    notify: Notify,
}

impl std::fmt::Debug for StreamCompletionBarrier {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("StreamCompletionBarrier")
            .field("name", &self.name)
            .field("expected", &self.expected)
            .field("remaining", &self.remaining())
            .finish()
    }
}

impl StreamCompletionBarrier {
    /// Creates a barrier over `expected` partitions with no callback.
    pub fn new(name: impl Into<String>, expected: usize) -> Self {
        Self {
            name: name.into(),
            expected,
            remaining: AtomicUsize::new(expected),
            done: Mutex::new(HashSet::new()),
            on_complete: Mutex::new(None),
            notify: Notify::new(),
        }
    }

    /// Creates a barrier that runs `on_complete` once all partitions are done.
    ///
    /// With zero expected partitions the callback runs immediately.
    pub fn with_callback(
        name: impl Into<String>,
        expected: usize,
        on_complete: impl FnOnce() + Send + 'static,
    ) -> Self {
        let barrier = Self::new(name, expected);
        if expected == 0 {
            on_complete();
        } else {
            *barrier.on_complete.lock() = Some(Box::new(on_complete));
        }
        barrier
    }

    /// Stream name.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Partitions still to report.
    pub fn remaining(&self) -> usize {
        self.remaining.load(Ordering::Acquire)
    }

    /// Returns true once every partition has reported.
    pub fn is_complete(&self) -> bool {
        self.remaining() == 0
    }

    /// Records a `DONE` marker from `partition`.
    ///
    /// Repeated markers from the same partition count once, as do markers
    /// arriving after completion. Returns true for the call that completed
    /// the barrier.
    pub fn partition_done(&self, partition: &PartitionKey) -> bool {
        if !self.done.lock().insert(partition.clone()) {
            debug!("{}: duplicate DONE from {}", self.name, partition);
            return false;
        }

        let previous = self
            .remaining
            .fetch_update(Ordering::AcqRel, Ordering::Acquire, |n| n.checked_sub(1));

        match previous {
            Ok(1) => {
                info!("{}: all {} partitions done", self.name, self.expected);
                if let Some(callback) = self.on_complete.lock().take() {
                    callback();
                }
                self.notify.notify_waiters();
                true
            }
            Ok(left) => {
                debug!("{}: partition {} done, {} left", self.name, partition, left - 1);
                false
            }
            Err(_) => {
                debug!("{}: DONE from {} after completion", self.name, partition);
                false
            }
        }
    }

    /// Waits until every partition has reported.
    pub async fn wait(&self) {
        let notified = self.notify.notified();
        if self.is_complete() {
            return;
        }
        notified.await;
    }
}
