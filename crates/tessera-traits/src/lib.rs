//! # Tessera Traits
//!
//! Shared vocabulary of the pricing engine: identifiers, market data
//! events, stream lifecycle markers and the snapshot output boundary.
//!
//! ## Module Structure
//!
//! - [`ids`]: instrument and partition identifiers
//! - [`market_data`]: trades, quotes and top-of-book events
//! - [`stream`]: `START`/`DONE` markers and partitioned stream messages
//! - [`output`]: published price snapshots and the publisher trait

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod error;
pub mod ids;
pub mod market_data;
pub mod output;
pub mod stream;

// Re-export commonly used types
pub use error::TraitError;
pub use ids::*;
pub use market_data::{MarketEvent, PriceQuote, QuoteSide, TopOfBook, Trade};
pub use output::{MarketDataPrice, PriceType, SnapshotPublisher, SnapshotReceiver};
pub use stream::{DataStreamState, PartitionedMessage, StreamMessage};
