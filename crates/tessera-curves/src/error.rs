//! Error types for curve operations.

use thiserror::Error;

/// A specialized Result type for curve operations.
pub type CurveResult<T> = Result<T, CurveError>;

/// Error types for curve operations.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum CurveError {
    /// Reference points cannot form a curve.
    #[error("Invalid curve data for '{curve_id}': {reason}")]
    InvalidCurveData {
        /// Identifier of the rejected curve.
        curve_id: String,
        /// What is wrong with the data.
        reason: String,
    },

    /// Maturities are not strictly increasing.
    #[error("Non-monotonic maturities in '{curve_id}' at index {index}: {prev} >= {current}")]
    NonMonotonicMaturities {
        /// Identifier of the rejected curve.
        curve_id: String,
        /// Index where monotonicity violation occurred.
        index: usize,
        /// Previous maturity date.
        prev: String,
        /// Offending maturity date.
        current: String,
    },
}

impl CurveError {
    /// Creates an invalid curve data error.
    #[must_use]
    pub fn invalid_curve_data(curve_id: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::InvalidCurveData {
            curve_id: curve_id.into(),
            reason: reason.into(),
        }
    }

    /// Returns true for every variant raised while validating reference points.
    #[must_use]
    pub fn is_invalid_data(&self) -> bool {
        matches!(
            self,
            CurveError::InvalidCurveData { .. } | CurveError::NonMonotonicMaturities { .. }
        )
    }
}
