//! Snapshot publishers.
//!
//! - [`BroadcastPublisher`]: in-process fan-out over a tokio broadcast channel
//! - [`ChannelPublisher`]: single consumer over a bounded mpsc channel, lossless
//! - [`LoggingPublisher`]: writes each snapshot to the trace log

use async_trait::async_trait;
use tokio::sync::{broadcast, mpsc};
use tracing::{info, trace};

use tessera_traits::{MarketDataPrice, SnapshotPublisher, SnapshotReceiver, TraitError};

/// Fans snapshots out to any number of in-process subscribers.
///
/// Publishing with no subscriber attached is not an error; the snapshot
/// is simply not delivered.
#[derive(Debug, Clone)]
pub struct BroadcastPublisher {
    tx: broadcast::Sender<MarketDataPrice>,
}

impl BroadcastPublisher {
    /// Creates a publisher buffering up to `capacity` snapshots per subscriber.
    pub fn new(capacity: usize) -> Self {
        let (tx, _) = broadcast::channel(capacity.max(1));
        Self { tx }
    }

    /// Subscribe to snapshots published from now on.
    pub fn subscribe(&self) -> SnapshotReceiver {
        SnapshotReceiver::new(self.tx.subscribe())
    }

    /// Number of active subscribers.
    pub fn subscriber_count(&self) -> usize {
        self.tx.receiver_count()
    }
}

#[async_trait]
impl SnapshotPublisher for BroadcastPublisher {
    async fn publish(&self, snapshot: &MarketDataPrice) -> Result<(), TraitError> {
        if self.tx.send(snapshot.clone()).is_err() {
            trace!("No subscribers for snapshot of {}", snapshot.instrument_id);
        }
        Ok(())
    }
}

/// Delivers every snapshot to one consumer.
///
/// `publish` waits while the channel is full, so a slow consumer slows the
/// lanes down instead of losing snapshots.
#[derive(Debug, Clone)]
pub struct ChannelPublisher {
    tx: mpsc::Sender<MarketDataPrice>,
}

impl ChannelPublisher {
    /// Creates a publisher and the receiving end of its channel.
    pub fn new(capacity: usize) -> (Self, mpsc::Receiver<MarketDataPrice>) {
        let (tx, rx) = mpsc::channel(capacity.max(1));
        (Self { tx }, rx)
    }
}

#[async_trait]
impl SnapshotPublisher for ChannelPublisher {
    async fn publish(&self, snapshot: &MarketDataPrice) -> Result<(), TraitError> {
        self.tx
            .send(snapshot.clone())
            .await
            .map_err(|_| TraitError::ChannelClosed(format!("snapshot of {}", snapshot.instrument_id)))
    }
}

/// Logs snapshots at info level.
#[derive(Debug, Clone, Copy, Default)]
pub struct LoggingPublisher;

#[async_trait]
impl SnapshotPublisher for LoggingPublisher {
    async fn publish(&self, snapshot: &MarketDataPrice) -> Result<(), TraitError> {
        info!(
            instrument_id = %snapshot.instrument_id,
            price = %snapshot.price,
            price_type = %snapshot.price_type,
            timestamp = snapshot.timestamp.as_millis(),
            "snapshot"
        );
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;
    use tessera_core::types::{Price, Timestamp};
    use tessera_traits::{InstrumentId, PriceType};

    fn snapshot() -> MarketDataPrice {
        MarketDataPrice {
            instrument_id: InstrumentId::new("EQ-1"),
            price: Price::new(dec!(10)),
            price_type: PriceType::LastPrice,
            timestamp: Timestamp::from_millis(1),
        }
    }

    #[tokio::test]
    async fn test_broadcast_delivers_to_subscribers() {
        let publisher = BroadcastPublisher::new(8);
        let mut first = publisher.subscribe();
        let mut second = publisher.subscribe();
        assert_eq!(publisher.subscriber_count(), 2);

        publisher.publish(&snapshot()).await.unwrap();
        assert_eq!(first.recv().await, Some(snapshot()));
        assert_eq!(second.recv().await, Some(snapshot()));
    }

    #[tokio::test]
    async fn test_broadcast_without_subscribers_is_ok() {
        let publisher = BroadcastPublisher::new(8);
        assert!(publisher.publish(&snapshot()).await.is_ok());
    }

    #[tokio::test]
    async fn test_channel_publisher_keeps_every_snapshot() {
        let (publisher, mut rx) = ChannelPublisher::new(2);
        let consumer = tokio::spawn(async move {
            let mut received = Vec::new();
            while let Some(snapshot) = rx.recv().await {
                received.push(snapshot.timestamp.as_millis());
            }
            received
        });

        for ms in 0..10 {
            let mut snapshot = snapshot();
            snapshot.timestamp = Timestamp::from_millis(ms);
            publisher.publish(&snapshot).await.unwrap();
        }
        drop(publisher);

        assert_eq!(consumer.await.unwrap(), (0..10).collect::<Vec<i64>>());
    }

    #[tokio::test]
    async fn test_channel_publisher_closed() {
        let (publisher, rx) = ChannelPublisher::new(2);
        drop(rx);
        let err = publisher.publish(&snapshot()).await.unwrap_err();
        assert!(matches!(err, TraitError::ChannelClosed(_)));
    }

    #[tokio::test]
    async fn test_logging_publisher() {
        assert!(LoggingPublisher.publish(&snapshot()).await.is_ok());
    }
}
