//! Pricing scenarios for the discounting model.

use std::collections::HashMap;
use std::sync::Arc;

use approx::assert_relative_eq;
use proptest::prelude::*;
use tessera_bonds::prelude::*;
use tessera_core::prelude::*;
use tessera_curves::{CurveId, YieldCurve, YieldCurveProvider, YieldRefData};

fn date(y: i32, m: u32, d: u32) -> Date {
    Date::from_ymd(y, m, d).unwrap()
}

fn bond(
    frequency: u32,
    maturity: Date,
    start: Date,
    coupon_rate: f64,
    day_count: DayCountConvention,
    compounding: CompoundingMethod,
) -> BondInstrument {
    BondInstrument::builder()
        .coupon_annual_frequency(frequency)
        .maturity_date(maturity)
        .start_date(start)
        .nominal_value(1000.0)
        .coupon_rate(coupon_rate)
        .day_count(day_count)
        .compounding(compounding)
        .build()
        .unwrap()
}

fn act365(frequency: u32, maturity: Date, start: Date, coupon_rate: f64) -> BondInstrument {
    bond(
        frequency,
        maturity,
        start,
        coupon_rate,
        DayCountConvention::Act365Fixed,
        CompoundingMethod::Compounding,
    )
}

fn govt_curve() -> YieldCurve {
    let anchor = date(2019, 1, 1);
    let maturities = [1, 2, 3, 4, 5, 10, 20, 30, 50]
        .iter()
        .map(|years| anchor.add_days(365 * years))
        .collect();
    let yields = vec![0.01, 0.015, 0.02, 0.03, 0.035, 0.035, 0.04, 0.04, 0.045];
    YieldCurve::new(&YieldRefData::new("GOVT", anchor, maturities, yields)).unwrap()
}

fn price(bond: &BondInstrument, source: YieldSource<'_>, as_of: Date) -> BondPriceResult {
    BondDiscountingPriceModel::default()
        .calculate_bond_price(bond, source, as_of)
        .unwrap()
}

#[test]
fn accrued_interest_late_in_first_period() {
    let bond = act365(2, date(2023, 1, 1), date(2021, 1, 1), 0.04);
    let result = price(&bond, YieldSource::Flat(0.0), date(2021, 6, 30));
    assert_relative_eq!(result.accrued_interest, 19.89, epsilon = 0.01);
}

#[test]
fn accrued_interest_with_constant_yield() {
    let bond = act365(2, date(2031, 1, 1), date(2011, 1, 1), 0.05);
    let result = price(&bond, YieldSource::Flat(0.04), date(2011, 4, 30));
    assert_relative_eq!(result.accrued_interest, 16.4365, epsilon = 0.001);
    assert_relative_eq!(
        result.dirty_price,
        result.clean_price + result.accrued_interest,
        epsilon = 1e-9
    );
}

#[test]
fn zero_coupon_before_start() {
    let bond = act365(1, date(2040, 1, 1), date(2020, 1, 1), 0.0);
    let result = price(&bond, YieldSource::Flat(0.05), date(2019, 1, 1));
    assert_relative_eq!(result.clean_price, 376.89, epsilon = 0.01);
    assert_eq!(result.clean_price, result.dirty_price);
    assert_eq!(result.accrued_interest, 0.0);
}

#[test]
fn zero_coupon_mid_period_has_no_accrual() {
    let bond = act365(1, date(2040, 1, 1), date(2020, 1, 1), 0.0);
    let result = price(&bond, YieldSource::Flat(0.05), date(2020, 7, 1));
    assert_eq!(result.accrued_interest, 0.0);
    assert_relative_eq!(result.clean_price, 386.1453, epsilon = 0.001);
}

#[test]
fn premium_bond_priced_before_start() {
    let bond = act365(2, date(2023, 1, 1), date(2021, 1, 1), 0.05);
    let result = price(&bond, YieldSource::Flat(0.03), date(2020, 1, 1));
    assert_relative_eq!(result.clean_price, 1038.54, epsilon = 0.01);
    assert_relative_eq!(result.clean_price, result.dirty_price, epsilon = 0.01);
    assert_eq!(result.accrued_interest, 0.0);
}

#[test]
fn annual_discount_bond_on_start_date() {
    let bond = act365(1, date(2040, 1, 1), date(2020, 1, 1), 0.025);
    let result = price(&bond, YieldSource::Flat(0.04), date(2020, 1, 1));
    assert_relative_eq!(result.clean_price, 796.14, epsilon = 0.01);
    assert_eq!(result.accrued_interest, 0.0);
}

#[test]
fn semi_annual_discount_bond_on_start_date() {
    let bond = act365(2, date(2040, 1, 1), date(2020, 1, 1), 0.025);
    let result = price(&bond, YieldSource::Flat(0.04), date(2020, 1, 1));
    assert_relative_eq!(result.clean_price, 794.83, epsilon = 0.01);
}

#[test]
fn thirty_360_bond_with_short_final_period() {
    let bond = bond(
        2,
        date(2028, 10, 1),
        date(2023, 1, 1),
        0.015,
        DayCountConvention::Thirty360BondBasis,
        CompoundingMethod::Compounding,
    );
    let result = price(&bond, YieldSource::Flat(0.1), date(2020, 1, 1));
    assert_relative_eq!(result.clean_price, 623.31, epsilon = 0.01);
    assert_eq!(result.accrued_interest, 0.0);
}

#[test]
fn thirty_360_mid_period() {
    let bond = bond(
        2,
        date(2026, 1, 15),
        date(2021, 1, 15),
        0.04,
        DayCountConvention::Thirty360BondBasis,
        CompoundingMethod::Compounding,
    );
    let result = price(&bond, YieldSource::Flat(0.05), date(2021, 4, 15));
    assert_relative_eq!(result.accrued_interest, 10.0, epsilon = 1e-9);
    assert_relative_eq!(result.dirty_price, 968.1189, epsilon = 0.001);
    assert_relative_eq!(result.clean_price, 958.1189, epsilon = 0.001);
}

#[test]
fn simple_interest_at_par() {
    let bond = bond(
        1,
        date(2025, 1, 1),
        date(2020, 1, 1),
        0.03,
        DayCountConvention::Act365Fixed,
        CompoundingMethod::Simple,
    );
    let result = price(&bond, YieldSource::Flat(0.03), date(2020, 1, 1));
    assert_relative_eq!(result.clean_price, 1007.3889, epsilon = 0.001);
}

#[test]
fn priced_with_curve() {
    let curve = govt_curve();
    let bond = act365(2, date(2040, 1, 1), date(2020, 1, 1), 0.025);
    let result = price(&bond, YieldSource::Curve(&curve), date(2020, 1, 1));
    assert_relative_eq!(result.clean_price, 805.06, epsilon = 0.01);
    assert_relative_eq!(result.clean_price, result.dirty_price, epsilon = 0.01);
    assert_eq!(result.accrued_interest, 0.0);
}

#[test]
fn calculate_resolves_curve_from_provider() {
    let mut curves: HashMap<CurveId, Arc<YieldCurve>> = HashMap::new();
    curves.insert(CurveId::new("GOVT"), Arc::new(govt_curve()));
    let provider: Arc<dyn YieldCurveProvider> = Arc::new(curves);
    let model = BondDiscountingPriceModel::new(provider);

    let mut bond = act365(2, date(2040, 1, 1), date(2020, 1, 1), 0.025);
    bond.pricing = BondPricingParameters::curve("GOVT");
    let result = model.calculate(&bond, date(2020, 1, 1)).unwrap();
    assert_relative_eq!(result.clean_price, 805.06, epsilon = 0.01);

    bond.pricing = BondPricingParameters::curve("MISSING");
    let err = model.calculate(&bond, date(2020, 1, 1)).unwrap_err();
    assert!(matches!(err, BondError::MissingReferenceData { .. }));

    bond.pricing = BondPricingParameters {
        yield_curve_id: None,
        constant_yield: Some(0.04),
        calculate_with_curve: true,
    };
    assert!(model.calculate(&bond, date(2020, 1, 1)).is_err());

    bond.pricing = BondPricingParameters::constant(0.04);
    let result = model.calculate(&bond, date(2020, 1, 1)).unwrap();
    assert_relative_eq!(result.clean_price, 794.83, epsilon = 0.01);
}

proptest! {
    #[test]
    fn flat_curve_matches_constant_yield(
        yield_rate in 0.0f64..0.15,
        coupon_rate in 0.0f64..0.1,
        days_after_start in 0i64..3000,
    ) {
        let bond = act365(2, date(2035, 1, 1), date(2020, 1, 1), coupon_rate);
        let as_of = date(2020, 1, 1).add_days(days_after_start);
        let curve = YieldCurve::flat("FLAT", date(2020, 1, 1), yield_rate);

        let flat = price(&bond, YieldSource::Flat(yield_rate), as_of);
        let curved = price(&bond, YieldSource::Curve(&curve), as_of);

        prop_assert!((flat.dirty_price - curved.dirty_price).abs() < 1e-9);
        prop_assert!((flat.accrued_interest - curved.accrued_interest).abs() < 1e-12);
    }

    #[test]
    fn dirty_is_clean_plus_accrued(
        coupon_rate in 0.0f64..0.1,
        days_after_start in -400i64..6000,
    ) {
        let bond = act365(4, date(2036, 3, 31), date(2020, 3, 31), coupon_rate);
        let as_of = date(2020, 3, 31).add_days(days_after_start);
        let result = price(&bond, YieldSource::Flat(0.03), as_of);

        prop_assert!((result.dirty_price - result.clean_price - result.accrued_interest).abs() < 1e-9);
        prop_assert!(result.accrued_interest >= 0.0);
        prop_assert!(result.accrued_interest <= bond.coupon_amount() + 1e-9);
    }
}
