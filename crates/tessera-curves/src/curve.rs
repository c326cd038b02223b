//! Interpolated yield curve.

use tessera_core::daycounts::{Act365Fixed, DayCount};
use tessera_core::types::Date;

use crate::error::CurveResult;
use crate::ids::CurveId;
use crate::ref_data::YieldRefData;

/// An immutable yield curve built from reference points.
///
/// Points are stored as `(tenor_years, yield)` with tenors measured
/// ACT/365 Fixed from the anchor date.
#[derive(Debug, Clone, PartialEq)]
pub struct YieldCurve {
    curve_id: CurveId,
    anchor_date: Date,
    points: Vec<(f64, f64)>,
}

impl YieldCurve {
    /// Builds a curve from reference data.
    ///
    /// # Errors
    ///
    /// Returns `CurveError::InvalidCurveData` (or `NonMonotonicMaturities`)
    /// if the data is empty, mismatched in length, or not strictly
    /// increasing in maturity.
    pub fn new(data: &YieldRefData) -> CurveResult<Self> {
        data.validate()?;

        let points = data
            .maturities
            .iter()
            .zip(&data.yields)
            .map(|(maturity, y)| (Act365Fixed.year_fraction(data.anchor_date, *maturity), *y))
            .collect();

        Ok(Self {
            curve_id: data.curve_id.clone(),
            anchor_date: data.anchor_date,
            points,
        })
    }

    /// A curve with the same yield at every maturity.
    pub fn flat(curve_id: impl Into<CurveId>, anchor_date: Date, yield_rate: f64) -> Self {
        Self {
            curve_id: curve_id.into(),
            anchor_date,
            points: vec![(0.0, yield_rate)],
        }
    }

    /// Curve identifier.
    pub fn curve_id(&self) -> &CurveId {
        &self.curve_id
    }

    /// Date from which tenors are measured.
    pub fn anchor_date(&self) -> Date {
        self.anchor_date
    }

    /// `(tenor_years, yield)` pairs in increasing tenor order.
    pub fn points(&self) -> &[(f64, f64)] {
        &self.points
    }

    /// Tenor of the last point in years.
    pub fn max_tenor(&self) -> f64 {
        self.points.last().map_or(0.0, |(t, _)| *t)
    }

    /// Yield for a cash flow paid on `date`.
    pub fn yield_at(&self, date: Date) -> f64 {
        self.yield_at_tenor(Act365Fixed.year_fraction(self.anchor_date, date))
    }

    /// Yield at a tenor in years from the anchor date.
    ///
    /// Linear between the bracketing points, flat outside the range.
    pub fn yield_at_tenor(&self, tenor_years: f64) -> f64 {
        let (first, last) = match (self.points.first(), self.points.last()) {
            (Some(first), Some(last)) => (*first, *last),
            _ => return 0.0,
        };

        if tenor_years <= first.0 {
            return first.1;
        }
        if tenor_years >= last.0 {
            return last.1;
        }

        // First point with tenor >= the requested one; index >= 1 here.
        let upper = self.points.partition_point(|(t, _)| *t < tenor_years);
        let (t0, r0) = self.points[upper - 1];
        let (t1, r1) = self.points[upper];
        let weight = (tenor_years - t0) / (t1 - t0);
        r0 + weight * (r1 - r0)
    }
}
