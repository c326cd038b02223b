//! # Tessera Engine
//!
//! Real-time price snapshots for instruments fed by trade and top-of-book
//! streams.
//!
//! This crate provides:
//! - [`PriceSnapshotCalculator`]: per-instrument state, priority resolution and throttling
//! - [`TheoreticalPriceCalculator`]: model prices by product category
//! - [`PricingEngine`]: owns the calculators and publishes snapshots
//! - [`LaneDispatcher`]: in-order, per-instrument event processing
//! - [`StreamCompletionBarrier`]: waits for every partition of a stream to finish
//!
//! ## Architecture
//!
//! ```text
//! Reference data ─> ReferenceDataConsumer ─┬─> ReferenceDataRegistry
//!                                          └─> MarketDataService (curves)
//!
//! Trades ─────────> TradeDataConsumer ──┐
//!                                       ├─> LaneDispatcher ─> PricingEngine ─> SnapshotPublisher
//! Top of book ────> TopOfBookConsumer ──┘                        │
//!                                                                └─> PriceSnapshotCalculator
//!                                                                      └─> TheoreticalPriceCalculator
//! ```
//!
//! ## Usage
//!
//! ```ignore
//! let publisher = Arc::new(BroadcastPublisher::new(1024));
//! let engine = Arc::new(
//!     PricingEngineBuilder::new()
//!         .with_config(EngineConfig::from_file("tessera.toml")?)
//!         .with_publisher(publisher.clone())
//!         .build()?,
//! );
//!
//! let lanes = LaneDispatcher::spawn(engine.clone());
//! lanes.dispatch(MarketEvent::Trade(trade)).await?;
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod builder;
pub mod completion;
pub mod config;
pub mod consumers;
pub mod engine;
pub mod error;
pub mod lanes;
pub mod market_data;
pub mod publisher;
pub mod reference_data;
pub mod snapshot;
pub mod telemetry;
pub mod theoretical;

// Re-exports
pub use builder::PricingEngineBuilder;
pub use completion::StreamCompletionBarrier;
pub use config::EngineConfig;
pub use consumers::{
    MarketDataConsumer, MarketStream, ReferenceDataConsumer, ReferenceDataMessage,
    TopOfBookConsumer, TradeDataConsumer,
};
pub use engine::PricingEngine;
pub use error::{EngineError, EngineResult};
pub use lanes::LaneDispatcher;
pub use market_data::MarketDataService;
pub use publisher::{BroadcastPublisher, ChannelPublisher, LoggingPublisher};
pub use reference_data::{Instrument, InstrumentKind, ReferenceDataRegistry};
pub use snapshot::PriceSnapshotCalculator;
pub use telemetry::init_tracing;
pub use theoretical::{PriceModel, TheoreticalPriceCalculator};
