//! Snapshot output.
//!
//! The engine emits at most one [`MarketDataPrice`] per inbound event and
//! hands each one to a [`SnapshotPublisher`].

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::fmt;
use tokio::sync::broadcast::error::{RecvError, TryRecvError};
use tracing::warn;
use tessera_core::types::{Price, Timestamp};

use crate::error::TraitError;
use crate::ids::InstrumentId;

/// Source a published price was resolved from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
#[non_exhaustive]
pub enum PriceType {
    /// Price of the most recent trade
    LastPrice,
    /// Volume-weighted average of all trades
    Vwap,
    /// Most recent best bid
    BidPrice,
    /// Most recent best ask
    AskPrice,
    /// Average of the most recent bid and ask
    MidBidAskPrice,
    /// Model price
    Theoretical,
}

impl PriceType {
    /// Returns the wire name.
    pub fn name(&self) -> &'static str {
        match self {
            PriceType::LastPrice => "LAST_PRICE",
            PriceType::Vwap => "VWAP",
            PriceType::BidPrice => "BID_PRICE",
            PriceType::AskPrice => "ASK_PRICE",
            PriceType::MidBidAskPrice => "MID_BID_ASK_PRICE",
            PriceType::Theoretical => "THEORETICAL",
        }
    }
}

impl fmt::Display for PriceType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// A published price snapshot.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MarketDataPrice {
    /// Instrument identifier
    pub instrument_id: InstrumentId,
    /// Resolved price
    pub price: Price,
    /// Source the price was resolved from
    pub price_type: PriceType,
    /// Time of the event that produced the snapshot
    pub timestamp: Timestamp,
}

/// Trait for snapshot publishing.
#[async_trait]
pub trait SnapshotPublisher: Send + Sync {
    /// Publish one snapshot.
    async fn publish(&self, snapshot: &MarketDataPrice) -> Result<(), TraitError>;

    /// Publish multiple snapshots.
    async fn publish_batch(&self, snapshots: &[MarketDataPrice]) -> Result<(), TraitError> {
        for snapshot in snapshots {
            self.publish(snapshot).await?;
        }
        Ok(())
    }
}

/// Receiver for published snapshots.
///
/// A receiver that falls more than the channel capacity behind loses the
/// oldest snapshots. Each loss is logged and added to [`skipped`](Self::skipped).
pub struct SnapshotReceiver {
    rx: tokio::sync::broadcast::Receiver<MarketDataPrice>,
    skipped: u64,
}

impl SnapshotReceiver {
    /// Create a new snapshot receiver.
    pub fn new(rx: tokio::sync::broadcast::Receiver<MarketDataPrice>) -> Self {
        Self { rx, skipped: 0 }
    }

    /// Receive the next snapshot.
    ///
    /// Returns `None` once the sender side is gone.
    pub async fn recv(&mut self) -> Option<MarketDataPrice> {
        loop {
            match self.rx.recv().await {
                Ok(snapshot) => return Some(snapshot),
                Err(RecvError::Lagged(n)) => self.record_lag(n),
                Err(RecvError::Closed) => return None,
            }
        }
    }

    /// Receive a snapshot if one is already queued.
    pub fn try_recv(&mut self) -> Option<MarketDataPrice> {
        loop {
            match self.rx.try_recv() {
                Ok(snapshot) => return Some(snapshot),
                Err(TryRecvError::Lagged(n)) => self.record_lag(n),
                Err(_) => return None,
            }
        }
    }

    /// Snapshots lost so far because this receiver lagged.
    pub fn skipped(&self) -> u64 {
        self.skipped
    }

    fn record_lag(&mut self, n: u64) {
        self.skipped += n;
        warn!("Snapshot receiver lagged, {} snapshots lost ({} total)", n, self.skipped);
    }
}
