//! End-to-end tests: reference data, lanes and publishing.

use std::sync::Arc;

use approx::assert_relative_eq;
use rust_decimal_macros::dec;

use tessera_bonds::{BondInstrument, BondPricingParameters};
use tessera_core::types::{Date, Price, Timestamp, Volume};
use tessera_curves::{CurveId, YieldRefData};
use tessera_engine::{
    BroadcastPublisher, EngineConfig, EngineError, Instrument, LaneDispatcher, PricingEngine,
    PricingEngineBuilder,
};
use tessera_traits::{InstrumentId, MarketEvent, PriceType, TopOfBook, Trade};

// =============================================================================
// FIXTURES
// =============================================================================

fn date(y: i32, m: u32, d: u32) -> Date {
    Date::from_ymd(y, m, d).unwrap()
}

fn px(value: rust_decimal::Decimal) -> Price {
    Price::new(value)
}

fn govt_curve() -> YieldRefData {
    let anchor = date(2019, 1, 1);
    let maturities = [1, 2, 3, 4, 5, 10, 20, 30, 50]
        .iter()
        .map(|years| anchor.add_days(365 * years))
        .collect();
    let yields = vec![0.01, 0.015, 0.02, 0.03, 0.035, 0.035, 0.04, 0.04, 0.045];
    YieldRefData::new("GOVT", anchor, maturities, yields)
}

fn curve_bond() -> BondInstrument {
    BondInstrument::builder()
        .start_date(date(2020, 1, 1))
        .maturity_date(date(2040, 1, 1))
        .coupon_annual_frequency(2)
        .coupon_rate(0.025)
        .nominal_value(1000.0)
        .pricing(BondPricingParameters::curve("GOVT"))
        .build()
        .unwrap()
}

fn engine_with(config: EngineConfig) -> (PricingEngine, Arc<BroadcastPublisher>) {
    let publisher = Arc::new(BroadcastPublisher::new(256));
    let engine = PricingEngineBuilder::new()
        .with_config(config)
        .with_publisher(publisher.clone())
        .build()
        .unwrap();
    (engine, publisher)
}

fn trade(id: &str, price: Price, ts: i64) -> MarketEvent {
    Trade::new(id, price, Volume::new(dec!(1)), Timestamp::from_millis(ts)).into()
}

// 2020-01-01T00:00:00Z
const NEW_YEAR_2020: i64 = 1_577_836_800_000;

// =============================================================================
// ENGINE
// =============================================================================

#[test]
fn unregistered_instrument_is_rejected() {
    let (engine, _) = engine_with(EngineConfig::default());
    let err = engine.on_event(&trade("NOPE", px(dec!(1)), 0)).unwrap_err();
    assert!(matches!(err, EngineError::UnknownInstrument(ref id) if id.as_str() == "NOPE"));
    assert_eq!(engine.active_instruments(), 0);
}

#[test]
fn theoretical_price_follows_curve_updates() {
    let (engine, _) = engine_with(EngineConfig {
        min_publish_interval_ms: 0,
        ..EngineConfig::default()
    });
    engine
        .register_instrument(Instrument::bond(
            "BOND-1",
            vec![PriceType::Theoretical, PriceType::LastPrice],
            curve_bond(),
        ))
        .unwrap();

    // No curve yet: falls through to the trade price.
    let first = engine
        .on_event(&trade("BOND-1", px(dec!(99)), NEW_YEAR_2020))
        .unwrap()
        .unwrap();
    assert_eq!(first.price_type, PriceType::LastPrice);

    engine.update_curve(&govt_curve()).unwrap();
    let second = engine
        .on_event(&trade("BOND-1", px(dec!(99)), NEW_YEAR_2020 + 1))
        .unwrap()
        .unwrap();
    assert_eq!(second.price_type, PriceType::Theoretical);
    assert_relative_eq!(second.price.to_f64(), 805.06, epsilon = 0.01);
}

#[test]
fn invalid_curve_keeps_previous_version() {
    let (engine, _) = engine_with(EngineConfig::default());
    engine.update_curve(&govt_curve()).unwrap();

    let mut broken = govt_curve();
    broken.yields.pop();
    let err = engine.update_curve(&broken).unwrap_err();
    assert!(matches!(err, EngineError::Curve(ref e) if e.is_invalid_data()));

    let curve = engine.curve(&CurveId::new("GOVT")).unwrap();
    assert_eq!(curve.points().len(), 9);
}

#[test]
fn rejected_registration_keeps_engine_running() {
    let (engine, _) = engine_with(EngineConfig::default());
    let mut bond = curve_bond();
    bond.coupon_annual_frequency = 5;
    let err = engine
        .register_instrument(Instrument::bond("BAD", vec![PriceType::Theoretical], bond))
        .unwrap_err();
    assert!(matches!(err, EngineError::Bond(_) | EngineError::Configuration(_)));
    assert!(!engine.reference_data().contains(&InstrumentId::new("BAD")));

    engine
        .register_instrument(Instrument::equity("EQ", vec![PriceType::LastPrice]))
        .unwrap();
    assert!(engine.on_event(&trade("EQ", px(dec!(5)), 0)).unwrap().is_some());
}

#[test]
fn reregistration_changes_priority_but_keeps_state() {
    let (engine, _) = engine_with(EngineConfig {
        min_publish_interval_ms: 0,
        ..EngineConfig::default()
    });
    engine
        .register_instrument(Instrument::equity("EQ", vec![PriceType::LastPrice]))
        .unwrap();
    engine.on_event(&trade("EQ", px(dec!(10)), 0)).unwrap();
    engine.on_event(&trade("EQ", px(dec!(12)), 1)).unwrap();

    engine
        .register_instrument(Instrument::equity("EQ", vec![PriceType::Vwap]))
        .unwrap();
    let book: MarketEvent =
        TopOfBook::new("EQ", Timestamp::from_millis(2), Some(px(dec!(9))), None).into();
    let snapshot = engine.on_event(&book).unwrap().unwrap();
    assert_eq!(snapshot.price_type, PriceType::Vwap);
    assert_eq!(snapshot.price, px(dec!(11)));
}

#[test]
fn concurrent_reregistration_reaches_new_calculators() {
    let (engine, _) = engine_with(EngineConfig::default());
    let ids: Vec<String> = (0..500).map(|i| format!("EQ-{i}")).collect();
    for id in &ids {
        engine
            .register_instrument(Instrument::equity(id.as_str(), vec![PriceType::LastPrice]))
            .unwrap();
    }

    std::thread::scope(|scope| {
        scope.spawn(|| {
            for id in &ids {
                engine
                    .register_instrument(Instrument::equity(id.as_str(), vec![PriceType::Vwap]))
                    .unwrap();
            }
        });
        scope.spawn(|| {
            for id in &ids {
                engine.on_event(&trade(id, px(dec!(10)), 0)).unwrap();
            }
        });
    });

    for id in &ids {
        let priority = engine
            .with_calculator(&InstrumentId::new(id.as_str()), |calc| {
                calc.instrument().intraday_price_priority.clone()
            })
            .unwrap();
        assert_eq!(priority, vec![PriceType::Vwap], "stale record for {id}");
    }
}

// =============================================================================
// LANES
// =============================================================================

#[tokio::test]
async fn lanes_publish_in_order_per_instrument() {
    let (engine, publisher) = engine_with(EngineConfig {
        min_publish_interval_ms: 0,
        lanes: 3,
        ..EngineConfig::default()
    });
    for id in ["A", "B", "C", "D"] {
        engine
            .register_instrument(Instrument::equity(id, vec![PriceType::LastPrice]))
            .unwrap();
    }
    let mut rx = publisher.subscribe();
    let engine = Arc::new(engine);
    let lanes = LaneDispatcher::spawn(engine.clone());
    assert_eq!(lanes.lane_count(), 3);

    for i in 0..20_i64 {
        for id in ["A", "B", "C", "D"] {
            let price = Price::new(rust_decimal::Decimal::from(i));
            lanes.dispatch(trade(id, price, i)).await.unwrap();
        }
    }
    lanes.flush().await.unwrap();

    let mut last_seen = std::collections::HashMap::new();
    let mut received = 0;
    while let Some(snapshot) = rx.try_recv() {
        let ts = snapshot.timestamp.as_millis();
        if let Some(previous) = last_seen.insert(snapshot.instrument_id.clone(), ts) {
            assert!(previous < ts, "out of order for {}", snapshot.instrument_id);
        }
        received += 1;
    }
    assert_eq!(received, 80);

    let last = engine
        .with_calculator(&InstrumentId::new("C"), |calc| calc.last_price())
        .flatten();
    assert_eq!(last, Some(px(dec!(19))));

    lanes.shutdown().await;
}

#[tokio::test]
async fn throttle_applies_across_lane_processing() {
    let (engine, publisher) = engine_with(EngineConfig::default());
    engine
        .register_instrument(Instrument::equity("EQ", vec![PriceType::LastPrice]))
        .unwrap();
    let mut rx = publisher.subscribe();
    let lanes = LaneDispatcher::spawn(Arc::new(engine));

    for (price, ts) in [(dec!(10), 0), (dec!(11), 500), (dec!(12), 1_000)] {
        lanes.dispatch(trade("EQ", px(price), ts)).await.unwrap();
    }
    lanes.flush().await.unwrap();

    let prices: Vec<Price> = std::iter::from_fn(|| rx.try_recv()).map(|s| s.price).collect();
    assert_eq!(prices, vec![px(dec!(10)), px(dec!(12))]);

    lanes.shutdown().await;
}
