//! Day count conventions for accrual and discounting.
//!
//! A day count convention turns a date span into a year fraction. Bond
//! pricing uses it twice: to prorate the coupon for accrued interest, and
//! to measure the remaining part of the current coupon period when
//! discounting.
//!
//! # Supported Conventions
//!
//! - [`Act365Fixed`]: Actual/365 Fixed
//! - [`Thirty360BondBasis`]: 30/360 Bond Basis
//!
//! # Usage
//!
//! ```rust
//! use tessera_core::daycounts::{DayCount, Thirty360BondBasis};
//! use tessera_core::types::Date;
//!
//! let dc = Thirty360BondBasis;
//! let start = Date::from_ymd(2025, 1, 15).unwrap();
//! let end = Date::from_ymd(2025, 7, 15).unwrap();
//!
//! assert_eq!(dc.day_count(start, end), 180);
//! assert_eq!(dc.year_fraction(start, end), 0.5);
//! ```

mod act365;
mod thirty360;

pub use act365::Act365Fixed;
pub use thirty360::Thirty360BondBasis;

use serde::{Deserialize, Serialize};

use crate::error::CoreError;
use crate::types::Date;

/// Trait for day count conventions.
///
/// Implementations must be thread-safe (`Send + Sync`) since instruments
/// are shared across pricing lanes.
pub trait DayCount: Send + Sync {
    /// Returns the name of the day count convention.
    fn name(&self) -> &'static str;

    /// Calculates the year fraction between two dates.
    ///
    /// Negative if `end` is before `start`.
    fn year_fraction(&self, start: Date, end: Date) -> f64;

    /// Calculates the day count between two dates according to the convention.
    fn day_count(&self, start: Date, end: Date) -> i64;
}

/// Runtime selection of a day count convention.
///
/// This is what reference data carries; it dispatches statically to the
/// convention structs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
#[non_exhaustive]
pub enum DayCountConvention {
    /// Actual/365 Fixed
    #[serde(alias = "ACT365")]
    Act365Fixed,

    /// 30/360 Bond Basis
    #[serde(alias = "BOND_BASIS_30360")]
    Thirty360BondBasis,
}

impl DayCountConvention {
    /// Returns the name of the convention.
    #[must_use]
    pub fn name(&self) -> &'static str {
        match self {
            DayCountConvention::Act365Fixed => Act365Fixed.name(),
            DayCountConvention::Thirty360BondBasis => Thirty360BondBasis.name(),
        }
    }

    /// Year fraction between two dates under this convention.
    #[must_use]
    pub fn year_fraction(&self, start: Date, end: Date) -> f64 {
        match self {
            DayCountConvention::Act365Fixed => Act365Fixed.year_fraction(start, end),
            DayCountConvention::Thirty360BondBasis => Thirty360BondBasis.year_fraction(start, end),
        }
    }

    /// Day count between two dates under this convention.
    #[must_use]
    pub fn day_count(&self, start: Date, end: Date) -> i64 {
        match self {
            DayCountConvention::Act365Fixed => Act365Fixed.day_count(start, end),
            DayCountConvention::Thirty360BondBasis => Thirty360BondBasis.day_count(start, end),
        }
    }

    /// Returns all available day count conventions.
    #[must_use]
    pub fn all() -> &'static [DayCountConvention] {
        &[
            DayCountConvention::Act365Fixed,
            DayCountConvention::Thirty360BondBasis,
        ]
    }
}

impl std::fmt::Display for DayCountConvention {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.name())
    }
}

impl std::str::FromStr for DayCountConvention {
    type Err = CoreError;

    /// Parses a convention name; case-insensitive, accepts common aliases.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalized = s.trim().to_uppercase();

        match normalized.as_str() {
            "ACT/365" | "ACT/365F" | "ACT/365 FIXED" | "ACTUAL/365" | "ACT365"
            | "ACT365FIXED" | "ACT365_FIXED" => Ok(DayCountConvention::Act365Fixed),

            "30/360" | "30/360 BOND BASIS" | "BOND" | "BOND_BASIS_30360" | "THIRTY360"
            | "THIRTY360_BOND_BASIS" | "THIRTY360BONDBASIS" => {
                Ok(DayCountConvention::Thirty360BondBasis)
            }

            _ => Err(CoreError::unknown_convention(s)),
        }
    }
}
