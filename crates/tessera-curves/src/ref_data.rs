//! Yield curve reference data.

use serde::{Deserialize, Serialize};
use tessera_core::types::Date;

use crate::error::{CurveError, CurveResult};
use crate::ids::CurveId;

/// Discrete yield points as delivered by reference data.
///
/// `maturities` and `yields` are parallel sequences. Yields are annual
/// decimals (0.035 = 3.5%).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct YieldRefData {
    /// Curve identifier.
    pub curve_id: CurveId,
    /// Date from which time to maturity is measured.
    pub anchor_date: Date,
    /// Point maturities, strictly increasing.
    pub maturities: Vec<Date>,
    /// Yield at each maturity.
    pub yields: Vec<f64>,
}

impl YieldRefData {
    /// Creates reference data without validating it.
    pub fn new(
        curve_id: impl Into<CurveId>,
        anchor_date: Date,
        maturities: Vec<Date>,
        yields: Vec<f64>,
    ) -> Self {
        Self {
            curve_id: curve_id.into(),
            anchor_date,
            maturities,
            yields,
        }
    }

    /// Number of points.
    pub fn len(&self) -> usize {
        self.maturities.len()
    }

    /// Returns true if there are no maturities.
    pub fn is_empty(&self) -> bool {
        self.maturities.is_empty()
    }

    /// Checks the points can form a curve.
    pub fn validate(&self) -> CurveResult<()> {
        let id = self.curve_id.as_str();

        if self.maturities.is_empty() || self.yields.is_empty() {
            return Err(CurveError::invalid_curve_data(id, "no reference points"));
        }

        if self.maturities.len() != self.yields.len() {
            return Err(CurveError::invalid_curve_data(
                id,
                format!(
                    "{} maturities but {} yields",
                    self.maturities.len(),
                    self.yields.len()
                ),
            ));
        }

        if let Some(index) = self.yields.iter().position(|y| !y.is_finite()) {
            return Err(CurveError::invalid_curve_data(
                id,
                format!("yield at index {index} is not finite"),
            ));
        }

        for (index, pair) in self.maturities.windows(2).enumerate() {
            if pair[1] <= pair[0] {
                return Err(CurveError::NonMonotonicMaturities {
                    curve_id: id.to_string(),
                    index: index + 1,
                    prev: pair[0].to_string(),
                    current: pair[1].to_string(),
                });
            }
        }

        Ok(())
    }
}
