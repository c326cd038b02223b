//! Per-instrument price snapshots.
//!
//! A [`PriceSnapshotCalculator`] owns the running state of one instrument:
//! last trade price, best bid and ask, cumulative VWAP. On every event it
//! updates that state, walks the instrument's price priority list and
//! returns the first price that is available, unless the throttle window
//! suppresses it.
//!
//! A calculator is not internally synchronised. The engine guarantees a
//! single writer per instrument.

mod throttle;
mod vwap;

pub use throttle::PublishThrottle;
pub use vwap::VwapAccumulator;

use std::sync::Arc;

use tracing::{debug, trace};

use tessera_core::types::{Price, Timestamp};
use tessera_traits::{MarketDataPrice, MarketEvent, PriceQuote, PriceType, TopOfBook, Trade};

use crate::reference_data::Instrument;
use crate::theoretical::TheoreticalPriceCalculator;

/// Running snapshot state of one instrument.
#[derive(Debug)]
pub struct PriceSnapshotCalculator {
    instrument: Arc<Instrument>,
    theoretical: Arc<TheoreticalPriceCalculator>,
    throttle: PublishThrottle,
    last_trade: Option<Trade>,
    last_bid: Option<PriceQuote>,
    last_ask: Option<PriceQuote>,
    vwap: VwapAccumulator,
}

impl PriceSnapshotCalculator {
    /// Creates the state for `instrument` with an empty history.
    pub fn new(
        instrument: Arc<Instrument>,
        theoretical: Arc<TheoreticalPriceCalculator>,
        min_publish_interval_ms: i64,
    ) -> Self {
        Self {
            instrument,
            theoretical,
            throttle: PublishThrottle::new(min_publish_interval_ms),
            last_trade: None,
            last_bid: None,
            last_ask: None,
            vwap: VwapAccumulator::new(),
        }
    }

    /// Applies an event and returns the snapshot to publish, if any.
    ///
    /// Returns `None` when no source in the priority list is available or
    /// when the throttle window suppresses the update. State changes from
    /// the event are kept either way.
    pub fn update_and_get(&mut self, event: &MarketEvent) -> Option<MarketDataPrice> {
        match event {
            MarketEvent::Trade(trade) => self.on_trade(trade),
            MarketEvent::TopOfBook(book) => self.on_top_of_book(book),
        }

        let timestamp = event.timestamp();
        let (price_type, price) = self.resolve(timestamp)?;

        if !self.throttle.allows(timestamp) {
            trace!(
                "Throttled {} snapshot for {} at {}",
                price_type,
                self.instrument.instrument_id,
                timestamp
            );
            return None;
        }
        self.throttle.record(timestamp);

        Some(MarketDataPrice {
            instrument_id: self.instrument.instrument_id.clone(),
            price,
            price_type,
            timestamp,
        })
    }

    /// Replaces the instrument record, keeping the running state.
    pub fn set_instrument(&mut self, instrument: Arc<Instrument>) {
        self.instrument = instrument;
    }

    /// Instrument this state belongs to.
    pub fn instrument(&self) -> &Arc<Instrument> {
        &self.instrument
    }

    /// Price of the most recent trade.
    pub fn last_price(&self) -> Option<Price> {
        self.last_trade.as_ref().map(|t| t.price)
    }

    /// Most recent best bid.
    pub fn bid(&self) -> Option<Price> {
        self.last_bid.map(|q| q.price)
    }

    /// Most recent best ask.
    pub fn ask(&self) -> Option<Price> {
        self.last_ask.map(|q| q.price)
    }

    /// Average of the most recent bid and ask.
    ///
    /// Unavailable until both sides are known, or if the sum overflows.
    pub fn mid(&self) -> Option<Price> {
        Price::mid(self.bid()?, self.ask()?)
    }

    /// Cumulative VWAP.
    pub fn vwap(&self) -> Option<Price> {
        self.vwap.vwap()
    }

    /// Event time of the last published snapshot.
    pub fn last_published(&self) -> Option<Timestamp> {
        self.throttle.last_published()
    }

    fn on_trade(&mut self, trade: &Trade) {
        self.vwap.add(trade.price, trade.volume);
        self.last_trade = Some(trade.clone());
    }

    fn on_top_of_book(&mut self, book: &TopOfBook) {
        if let Some(bid) = book.bid_quote {
            self.last_bid = Some(bid);
        }
        if let Some(ask) = book.ask_quote {
            self.last_ask = Some(ask);
        }
    }

    fn resolve(&self, timestamp: Timestamp) -> Option<(PriceType, Price)> {
        self.instrument
            .intraday_price_priority
            .iter()
            .find_map(|price_type| {
                self.price_for(*price_type, timestamp)
                    .map(|price| (*price_type, price))
            })
    }

    fn price_for(&self, price_type: PriceType, timestamp: Timestamp) -> Option<Price> {
        match price_type {
            PriceType::LastPrice => self.last_price(),
            PriceType::Vwap => self.vwap(),
            PriceType::BidPrice => self.bid(),
            PriceType::AskPrice => self.ask(),
            PriceType::MidBidAskPrice => self.mid(),
            PriceType::Theoretical => self.theoretical_price(timestamp),
            _ => None,
        }
    }

    fn theoretical_price(&self, timestamp: Timestamp) -> Option<Price> {
        let as_of = match timestamp.to_date() {
            Ok(date) => date,
            Err(e) => {
                debug!("No valuation date for {}: {}", self.instrument.instrument_id, e);
                return None;
            }
        };

        match self.theoretical.calculate(&self.instrument, as_of) {
            Ok(price) => Some(price),
            Err(e) => {
                debug!(
                    "Theoretical price unavailable for {}: {}",
                    self.instrument.instrument_id, e
                );
                None
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;
    use tessera_bonds::{BondDiscountingPriceModel, BondInstrument, BondPricingParameters};
    use tessera_core::types::{Date, Volume};

    fn theoretical() -> Arc<TheoreticalPriceCalculator> {
        Arc::new(TheoreticalPriceCalculator::new(Arc::new(
            BondDiscountingPriceModel::default(),
        )))
    }

    fn equity(priority: Vec<PriceType>) -> PriceSnapshotCalculator {
        PriceSnapshotCalculator::new(
            Arc::new(Instrument::equity("EQ-1", priority)),
            theoretical(),
            1000,
        )
    }

    fn trade(price: Price, ms: i64) -> MarketEvent {
        Trade::new("EQ-1", price, Volume::new(dec!(1)), Timestamp::from_millis(ms)).into()
    }

    fn quote(bid: Option<Price>, ask: Option<Price>, ms: i64) -> MarketEvent {
        TopOfBook::new("EQ-1", Timestamp::from_millis(ms), bid, ask).into()
    }

    fn px(value: rust_decimal::Decimal) -> Price {
        Price::new(value)
    }

    #[test]
    fn test_last_price() {
        let mut calc = equity(vec![PriceType::LastPrice]);
        let snapshot = calc.update_and_get(&trade(px(dec!(10)), 1)).unwrap();
        assert_eq!(snapshot.price, px(dec!(10)));
        assert_eq!(snapshot.price_type, PriceType::LastPrice);
        assert_eq!(snapshot.timestamp, Timestamp::from_millis(1));
    }

    #[test]
    fn test_vwap() {
        let mut calc = equity(vec![PriceType::Vwap]);
        calc.update_and_get(&trade(px(dec!(10)), 1));
        let snapshot = calc.update_and_get(&trade(px(dec!(12)), 5000)).unwrap();
        assert_eq!(snapshot.price, px(dec!(11)));
        assert_eq!(snapshot.price_type, PriceType::Vwap);
    }

    #[test]
    fn test_mid() {
        let mut calc = equity(vec![PriceType::MidBidAskPrice]);
        let snapshot = calc
            .update_and_get(&quote(Some(px(dec!(10))), Some(px(dec!(12))), 1))
            .unwrap();
        assert_eq!(snapshot.price, px(dec!(11)));
    }

    #[test]
    fn test_mid_needs_both_sides() {
        let mut calc = equity(vec![PriceType::MidBidAskPrice]);
        assert!(calc.update_and_get(&quote(Some(px(dec!(10))), None, 1)).is_none());
        let snapshot = calc
            .update_and_get(&quote(None, Some(px(dec!(12))), 2))
            .unwrap();
        assert_eq!(snapshot.price, px(dec!(11)));
    }

    #[test]
    fn test_mid_overflow_falls_through() {
        let mut calc = equity(vec![PriceType::MidBidAskPrice, PriceType::BidPrice]);
        let max = px(rust_decimal::Decimal::MAX);
        let snapshot = calc.update_and_get(&quote(Some(max), Some(max), 1)).unwrap();
        assert_eq!(snapshot.price_type, PriceType::BidPrice);
        assert_eq!(snapshot.price, max);
        assert_eq!(calc.mid(), None);
    }

    #[test]
    fn test_nothing_resolves() {
        let mut calc = equity(vec![PriceType::AskPrice]);
        assert!(calc.update_and_get(&trade(px(dec!(10)), 1)).is_none());
        assert_eq!(calc.last_published(), None);
    }

    #[test]
    fn test_throttled_update_keeps_state() {
        let mut calc = equity(vec![PriceType::LastPrice]);
        assert!(calc.update_and_get(&trade(px(dec!(9)), 1)).is_some());
        assert!(calc.update_and_get(&trade(px(dec!(10)), 2)).is_none());

        assert_eq!(calc.last_price(), Some(px(dec!(10))));
        assert_eq!(calc.vwap(), Some(px(dec!(9.5))));
        assert_eq!(calc.last_published(), Some(Timestamp::from_millis(1)));
    }

    #[test]
    fn test_publishes_after_window() {
        let mut calc = equity(vec![PriceType::LastPrice]);
        assert!(calc.update_and_get(&trade(px(dec!(9)), 1)).is_some());
        let snapshot = calc.update_and_get(&trade(px(dec!(10)), 50_000)).unwrap();
        assert_eq!(snapshot.price, px(dec!(10)));
    }

    #[test]
    fn test_priority_fallback() {
        let mut calc = equity(vec![
            PriceType::BidPrice,
            PriceType::LastPrice,
            PriceType::MidBidAskPrice,
            PriceType::Theoretical,
            PriceType::BidPrice,
        ]);
        let first = calc.update_and_get(&trade(px(dec!(9)), 1)).unwrap();
        assert_eq!(first.price_type, PriceType::LastPrice);

        let second = calc
            .update_and_get(&quote(Some(px(dec!(10))), None, 10_000))
            .unwrap();
        assert_eq!(second.price_type, PriceType::BidPrice);
        assert_eq!(second.price, px(dec!(10)));
    }

    #[test]
    fn test_theoretical_unavailable_for_equity_falls_through() {
        let mut calc = equity(vec![PriceType::Theoretical, PriceType::LastPrice]);
        let snapshot = calc.update_and_get(&trade(px(dec!(7)), 1)).unwrap();
        assert_eq!(snapshot.price_type, PriceType::LastPrice);
    }

    #[test]
    fn test_theoretical_bond() {
        let bond = BondInstrument::builder()
            .start_date(Date::from_ymd(2020, 1, 1).unwrap())
            .maturity_date(Date::from_ymd(2040, 1, 1).unwrap())
            .coupon_annual_frequency(1)
            .coupon_rate(0.0)
            .nominal_value(1000.0)
            .pricing(BondPricingParameters::constant(0.05))
            .build()
            .unwrap();
        let instrument = Arc::new(Instrument::bond("ZC", vec![PriceType::Theoretical], bond));
        let mut calc = PriceSnapshotCalculator::new(instrument, theoretical(), 1000);

        // 2019-01-01T00:00:00Z
        let event: MarketEvent = Trade::new(
            "ZC",
            px(dec!(380)),
            Volume::new(dec!(1)),
            Timestamp::from_millis(1_546_300_800_000),
        )
        .into();
        let snapshot = calc.update_and_get(&event).unwrap();
        assert_eq!(snapshot.price_type, PriceType::Theoretical);
        assert_eq!(snapshot.price.round_dp(2), px(dec!(376.89)));
    }

    #[test]
    fn test_matured_bond_falls_through() {
        let bond = BondInstrument::builder()
            .start_date(Date::from_ymd(2020, 1, 1).unwrap())
            .maturity_date(Date::from_ymd(2040, 1, 1).unwrap())
            .coupon_annual_frequency(1)
            .coupon_rate(0.0)
            .nominal_value(1000.0)
            .pricing(BondPricingParameters::constant(0.05))
            .build()
            .unwrap();
        let instrument = Arc::new(Instrument::bond(
            "ZC",
            vec![PriceType::Theoretical, PriceType::LastPrice],
            bond,
        ));
        let mut calc = PriceSnapshotCalculator::new(instrument, theoretical(), 1000);

        // 2040-06-01T00:00:00Z
        let event: MarketEvent = Trade::new(
            "ZC",
            px(dec!(1000)),
            Volume::new(dec!(1)),
            Timestamp::from_millis(2_222_121_600_000),
        )
        .into();
        let snapshot = calc.update_and_get(&event).unwrap();
        assert_eq!(snapshot.price_type, PriceType::LastPrice);
        assert_eq!(snapshot.price, px(dec!(1000)));
    }

    #[test]
    fn test_theoretical_missing_curve_falls_through() {
        let bond = BondInstrument::builder()
            .start_date(Date::from_ymd(2020, 1, 1).unwrap())
            .maturity_date(Date::from_ymd(2040, 1, 1).unwrap())
            .coupon_annual_frequency(2)
            .coupon_rate(0.025)
            .nominal_value(1000.0)
            .pricing(BondPricingParameters::curve("GOVT"))
            .build()
            .unwrap();
        let instrument = Arc::new(Instrument::bond(
            "B",
            vec![PriceType::Theoretical, PriceType::LastPrice],
            bond,
        ));
        let mut calc = PriceSnapshotCalculator::new(instrument, theoretical(), 1000);

        let event: MarketEvent = Trade::new(
            "B",
            px(dec!(99)),
            Volume::new(dec!(1)),
            Timestamp::from_millis(1_577_836_800_000),
        )
        .into();
        let snapshot = calc.update_and_get(&event).unwrap();
        assert_eq!(snapshot.price_type, PriceType::LastPrice);
    }
}
