//! Market data events consumed by the pricing engine.
//!
//! - [`Trade`]: an executed trade
//! - [`TopOfBook`]: best bid and/or ask after an order book change
//! - [`MarketEvent`]: either of the above, as routed to a snapshot calculator

use serde::{Deserialize, Serialize};
use tessera_core::types::{Price, Timestamp, Volume};

use crate::ids::InstrumentId;

// =============================================================================
// TRADES
// =============================================================================

/// An executed trade.
///
/// Participant ids and the aggressor flag are carried as metadata; only
/// price, volume and timestamp feed the snapshot.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Trade {
    /// Traded instrument
    pub instrument_id: InstrumentId,
    /// Exchange trade identifier
    #[serde(default)]
    pub trade_id: String,
    /// Execution price
    pub price: Price,
    /// Executed quantity
    pub volume: Volume,
    /// Event time
    pub timestamp: Timestamp,
    /// Participant on the bid side
    #[serde(default)]
    pub bid_participant: Option<String>,
    /// Participant on the ask side
    #[serde(default)]
    pub ask_participant: Option<String>,
    /// True if the buyer crossed the spread
    #[serde(default)]
    pub is_bid_side_aggressor: bool,
}

impl Trade {
    /// Creates a trade with no participant metadata.
    pub fn new(
        instrument_id: impl Into<InstrumentId>,
        price: Price,
        volume: Volume,
        timestamp: Timestamp,
    ) -> Self {
        Self {
            instrument_id: instrument_id.into(),
            trade_id: String::new(),
            price,
            volume,
            timestamp,
            bid_participant: None,
            ask_participant: None,
            is_bid_side_aggressor: false,
        }
    }

    /// Sets the exchange trade identifier.
    #[must_use]
    pub fn with_trade_id(mut self, trade_id: impl Into<String>) -> Self {
        self.trade_id = trade_id.into();
        self
    }
}

// =============================================================================
// QUOTES
// =============================================================================

/// Side of a quote.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum QuoteSide {
    /// Best buy price
    Bid,
    /// Best sell price
    Ask,
}

/// A price on one side of the book.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PriceQuote {
    /// Side of the book
    pub side: QuoteSide,
    /// Quoted price
    pub price: Price,
    /// Event time
    pub timestamp: Timestamp,
}

impl PriceQuote {
    /// Creates a quote.
    pub fn new(side: QuoteSide, price: Price, timestamp: Timestamp) -> Self {
        Self {
            side,
            price,
            timestamp,
        }
    }
}

/// Best bid and ask after a book update. Either side may be absent.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TopOfBook {
    /// Quoted instrument
    pub instrument_id: InstrumentId,
    /// Event time
    pub timestamp: Timestamp,
    /// Best bid, if it changed
    #[serde(default)]
    pub bid_quote: Option<PriceQuote>,
    /// Best ask, if it changed
    #[serde(default)]
    pub ask_quote: Option<PriceQuote>,
}

impl TopOfBook {
    /// A book update with both sides.
    pub fn new(
        instrument_id: impl Into<InstrumentId>,
        timestamp: Timestamp,
        bid: Option<Price>,
        ask: Option<Price>,
    ) -> Self {
        Self {
            instrument_id: instrument_id.into(),
            timestamp,
            bid_quote: bid.map(|p| PriceQuote::new(QuoteSide::Bid, p, timestamp)),
            ask_quote: ask.map(|p| PriceQuote::new(QuoteSide::Ask, p, timestamp)),
        }
    }
}

// =============================================================================
// ROUTED EVENTS
// =============================================================================

/// An event routed to an instrument's snapshot calculator.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum MarketEvent {
    /// Trade event
    Trade(Trade),
    /// Quote event
    TopOfBook(TopOfBook),
}

impl MarketEvent {
    /// Instrument the event belongs to.
    pub fn instrument_id(&self) -> &InstrumentId {
        match self {
            MarketEvent::Trade(trade) => &trade.instrument_id,
            MarketEvent::TopOfBook(book) => &book.instrument_id,
        }
    }

    /// Event time.
    pub fn timestamp(&self) -> Timestamp {
        match self {
            MarketEvent::Trade(trade) => trade.timestamp,
            MarketEvent::TopOfBook(book) => book.timestamp,
        }
    }
}

impl From<Trade> for MarketEvent {
    fn from(trade: Trade) -> Self {
        MarketEvent::Trade(trade)
    }
}

impl From<TopOfBook> for MarketEvent {
    fn from(book: TopOfBook) -> Self {
        MarketEvent::TopOfBook(book)
    }
}
