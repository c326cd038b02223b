//! Inbound stream consumers.
//!
//! Each consumer reads [`PartitionedMessage`]s for one stream, forwards
//! payloads and counts `DONE` markers on a [`StreamCompletionBarrier`]
//! sized to the number of partitions it subscribed to.
//!
//! - [`TradeDataConsumer`]: trades into the lanes
//! - [`TopOfBookConsumer`]: book updates into the lanes
//! - [`ReferenceDataConsumer`]: instruments and curves into the engine
//!
//! The first two are a [`MarketDataConsumer`] over their payload type.

use std::marker::PhantomData;
use std::sync::Arc;

use serde::{Deserialize, Serialize};
use tokio::sync::mpsc;
use tracing::{info, warn};

use tessera_curves::YieldRefData;
use tessera_traits::{
    DataStreamState, MarketEvent, PartitionKey, PartitionedMessage, StreamMessage, TopOfBook, Trade,
};

use crate::completion::StreamCompletionBarrier;
use crate::engine::PricingEngine;
use crate::error::EngineResult;
use crate::lanes::LaneDispatcher;
use crate::reference_data::Instrument;

/// A reference data record.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ReferenceDataMessage {
    /// Instrument registration or replacement
    Instrument(Instrument),
    /// Yield curve points
    YieldCurve(YieldRefData),
}

fn on_state(barrier: &StreamCompletionBarrier, partition: &PartitionKey, state: DataStreamState) {
    match state {
        DataStreamState::Start => info!("Started consuming {} ({})", barrier.name(), partition),
        DataStreamState::Done => {
            barrier.partition_done(partition);
        }
    }
}

// =============================================================================
// MARKET DATA CONSUMERS
// =============================================================================

/// A market data payload and the name of the stream it arrives on.
pub trait MarketStream: Into<MarketEvent> + Send {
    /// Stream name used for the completion barrier and logs.
    const NAME: &'static str;
}

impl MarketStream for Trade {
    const NAME: &'static str = "trade data";
}

impl MarketStream for TopOfBook {
    const NAME: &'static str = "top of book";
}

/// Consumes one market data stream into the lanes.
pub struct MarketDataConsumer<T> {
    lanes: Arc<LaneDispatcher>,
    barrier: Arc<StreamCompletionBarrier>,
    _payload: PhantomData<fn(T)>,
}

/// Consumes the trade stream.
pub type TradeDataConsumer = MarketDataConsumer<Trade>;

/// Consumes the top-of-book stream.
pub type TopOfBookConsumer = MarketDataConsumer<TopOfBook>;

impl<T> std::fmt::Debug for MarketDataConsumer<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("MarketDataConsumer")
            .field("lanes", &self.lanes)
            .field("barrier", &self.barrier)
            .finish()
    }
}

impl<T: MarketStream> MarketDataConsumer<T> {
    /// Create a consumer expecting `partitions` DONE markers.
    pub fn new(lanes: Arc<LaneDispatcher>, partitions: usize) -> Self {
        Self::with_barrier(
            lanes,
            Arc::new(StreamCompletionBarrier::new(T::NAME, partitions)),
        )
    }

    /// Create a consumer reporting to an existing barrier.
    pub fn with_barrier(lanes: Arc<LaneDispatcher>, barrier: Arc<StreamCompletionBarrier>) -> Self {
        Self {
            lanes,
            barrier,
            _payload: PhantomData,
        }
    }

    /// Completion barrier of this stream.
    pub fn barrier(&self) -> &Arc<StreamCompletionBarrier> {
        &self.barrier
    }

    /// Handle one message.
    pub async fn on_message(&self, message: PartitionedMessage<T>) -> EngineResult<()> {
        match message.message {
            StreamMessage::Data(payload) => self.lanes.dispatch(payload.into()).await,
            StreamMessage::State(state) => {
                on_state(&self.barrier, &message.partition, state);
                Ok(())
            }
        }
    }

    /// Handle messages until the channel closes.
    pub async fn run(&self, mut rx: mpsc::Receiver<PartitionedMessage<T>>) -> EngineResult<()> {
        while let Some(message) = rx.recv().await {
            self.on_message(message).await?;
        }
        Ok(())
    }
}

// =============================================================================
// REFERENCE DATA CONSUMER
// =============================================================================

/// Consumes instrument and curve reference data.
///
/// Invalid records are logged and skipped; they never stop the stream.
#[derive(Debug)]
pub struct ReferenceDataConsumer {
    engine: Arc<PricingEngine>,
    barrier: Arc<StreamCompletionBarrier>,
}

impl ReferenceDataConsumer {
    /// Create a consumer expecting `partitions` DONE markers.
    pub fn new(engine: Arc<PricingEngine>, partitions: usize) -> Self {
        Self::with_barrier(
            engine,
            Arc::new(StreamCompletionBarrier::new("reference data", partitions)),
        )
    }

    /// Create a consumer reporting to an existing barrier.
    pub fn with_barrier(engine: Arc<PricingEngine>, barrier: Arc<StreamCompletionBarrier>) -> Self {
        Self { engine, barrier }
    }

    /// Completion barrier of this stream.
    pub fn barrier(&self) -> &Arc<StreamCompletionBarrier> {
        &self.barrier
    }

    /// Handle one message.
    pub fn on_message(&self, message: PartitionedMessage<ReferenceDataMessage>) {
        match message.message {
            StreamMessage::Data(ReferenceDataMessage::Instrument(instrument)) => {
                let instrument_id = instrument.instrument_id.clone();
                if let Err(e) = self.engine.register_instrument(instrument) {
                    warn!("Skipping instrument {}: {}", instrument_id, e);
                }
            }
            StreamMessage::Data(ReferenceDataMessage::YieldCurve(data)) => {
                if let Err(e) = self.engine.update_curve(&data) {
                    warn!("Skipping curve {}: {}", data.curve_id, e);
                }
            }
            StreamMessage::State(state) => on_state(&self.barrier, &message.partition, state),
        }
    }

    /// Handle messages until the channel closes.
    pub async fn run(&self, mut rx: mpsc::Receiver<PartitionedMessage<ReferenceDataMessage>>) {
        while let Some(message) = rx.recv().await {
            self.on_message(message);
        }
    }
}
