//! Discounted cash flow bond pricing.
//!
//! The dirty price is the present value of every coupon and the principal
//! paid after the valuation date. Time to each flow is counted in coupon
//! periods: the day-count fraction of the current period still to run,
//! plus one for every full period after it. A valuation date before the
//! start date is measured from the start date.
//!
//! Accrued interest is the coupon prorated by the day-count fraction of the
//! current period already elapsed, and `clean = dirty - accrued`.

use std::collections::HashMap;
use std::sync::Arc;

use log::{debug, trace};
use serde::{Deserialize, Serialize};
use tessera_core::types::Date;
use tessera_curves::{YieldCurve, YieldCurveProvider};

use crate::error::{BondError, BondResult};
use crate::instrument::BondInstrument;
use crate::schedule::CouponSchedule;

/// Where discounting yields come from.
#[derive(Debug, Clone, Copy)]
pub enum YieldSource<'a> {
    /// The same annual yield for every cash flow.
    Flat(f64),
    /// The curve's yield at each cash flow date.
    Curve(&'a YieldCurve),
}

impl YieldSource<'_> {
    /// Yield for a flow paid on `date`.
    pub fn yield_at(&self, date: Date) -> f64 {
        match self {
            YieldSource::Flat(y) => *y,
            YieldSource::Curve(curve) => curve.yield_at(date),
        }
    }
}

/// Output of the bond model.
///
/// `dirty_price == clean_price + accrued_interest`.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct BondPriceResult {
    /// Price excluding accrued interest.
    pub clean_price: f64,
    /// Present value of remaining flows.
    pub dirty_price: f64,
    /// Coupon earned since the previous coupon date.
    pub accrued_interest: f64,
}

impl BondPriceResult {
    fn from_dirty(dirty_price: f64, accrued_interest: f64) -> Self {
        Self {
            clean_price: dirty_price - accrued_interest,
            dirty_price,
            accrued_interest,
        }
    }
}

/// Prices bonds by discounting their remaining cash flows.
///
/// Holds the curve source used by [`calculate`](Self::calculate) when a
/// bond is priced off a curve.
#[derive(Clone)]
pub struct BondDiscountingPriceModel {
    curves: Arc<dyn YieldCurveProvider>,
}

impl Default for BondDiscountingPriceModel {
    fn default() -> Self {
        Self::new(Arc::new(HashMap::new()))
    }
}

impl std::fmt::Debug for BondDiscountingPriceModel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("BondDiscountingPriceModel").finish_non_exhaustive()
    }
}

impl BondDiscountingPriceModel {
    /// Creates a model reading curves from `curves`.
    pub fn new(curves: Arc<dyn YieldCurveProvider>) -> Self {
        Self { curves }
    }

    /// Prices a bond with the yield source named by its pricing parameters.
    ///
    /// # Errors
    ///
    /// `BondError::MissingReferenceData` when curve pricing is selected and
    /// the curve id is absent or unknown, or when flat pricing is selected
    /// without a constant yield. `BondError::InvalidSpec` for invalid terms.
    pub fn calculate(&self, bond: &BondInstrument, as_of: Date) -> BondResult<BondPriceResult> {
        let params = &bond.pricing;

        if params.calculate_with_curve {
            let curve_id = params.yield_curve_id.as_ref().ok_or_else(|| {
                BondError::missing_reference_data("curve pricing selected without a curve id")
            })?;
            let curve = self.curves.curve(curve_id).ok_or_else(|| {
                BondError::missing_reference_data(format!("no yield curve '{curve_id}'"))
            })?;
            trace!("pricing with curve {curve_id} as of {as_of}");
            self.calculate_bond_price(bond, YieldSource::Curve(curve.as_ref()), as_of)
        } else {
            let yield_rate = params.constant_yield.ok_or_else(|| {
                BondError::missing_reference_data("flat pricing selected without a constant yield")
            })?;
            self.calculate_bond_price(bond, YieldSource::Flat(yield_rate), as_of)
        }
    }

    /// Prices a bond against an explicit yield source.
    ///
    /// # Errors
    ///
    /// `BondError::InvalidSpec` for invalid terms, or a core error if the
    /// schedule leaves the supported date range.
    pub fn calculate_bond_price(
        &self,
        bond: &BondInstrument,
        source: YieldSource<'_>,
        as_of: Date,
    ) -> BondResult<BondPriceResult> {
        if as_of >= bond.maturity_date {
            debug!("bond matured on {} before {as_of}", bond.maturity_date);
            return Ok(BondPriceResult::default());
        }

        let schedule = CouponSchedule::generate(bond)?;
        let dates = schedule.dates();

        // Index of the last boundary on or before as_of, and the part of the
        // following period still to run.
        let (anchor, remaining) = match schedule.period_index(as_of) {
            Some(j) => {
                let next = dates[j + 1];
                (j, period_fraction(bond, as_of, next, (dates[j], next)))
            }
            None => (0, 1.0),
        };

        let coupon = bond.coupon_amount();
        let frequency = bond.coupon_annual_frequency;

        let mut dirty = 0.0;
        for (k, date) in dates[anchor + 1..].iter().enumerate() {
            let mut amount = coupon;
            if *date == bond.maturity_date {
                amount += bond.nominal_value;
            }

            let periods = k as f64 + remaining;
            let df = bond
                .compounding
                .discount_factor(source.yield_at(*date), frequency, periods);
            dirty += amount * df;
        }

        let accrued = Self::accrued_interest_with(bond, &schedule, as_of);
        Ok(BondPriceResult::from_dirty(dirty, accrued))
    }

    /// Accrued interest on `as_of`.
    ///
    /// # Errors
    ///
    /// `BondError::InvalidSpec` for invalid terms.
    pub fn accrued_interest(bond: &BondInstrument, as_of: Date) -> BondResult<f64> {
        let schedule = CouponSchedule::generate(bond)?;
        Ok(Self::accrued_interest_with(bond, &schedule, as_of))
    }

    fn accrued_interest_with(bond: &BondInstrument, schedule: &CouponSchedule, as_of: Date) -> f64 {
        if bond.is_zero_coupon() {
            return 0.0;
        }
        match schedule.period_containing(as_of) {
            Some(period) => bond.coupon_amount() * period_fraction(bond, period.0, as_of, period),
            None => 0.0,
        }
    }
}

/// `yf(from, to) / yf(prev, next)` under the bond's day count.
fn period_fraction(bond: &BondInstrument, from: Date, to: Date, (prev, next): (Date, Date)) -> f64 {
    let period = bond.day_count.year_fraction(prev, next);
    if period <= 0.0 {
        return 0.0;
    }
    bond.day_count.year_fraction(from, to) / period
}
