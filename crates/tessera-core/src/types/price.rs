//! Decimal price and volume types.
//!
//! Both wrap `rust_decimal::Decimal` so that running sums over many trades
//! (turnover, cumulative volume) stay exact.

use rust_decimal::prelude::*;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::ops::{Add, Mul, Sub};

use crate::error::{CoreError, CoreResult};

/// The price of one unit of an instrument.
///
/// # Example
///
/// ```rust
/// use tessera_core::types::Price;
/// use rust_decimal_macros::dec;
///
/// let bid = Price::new(dec!(12));
/// let ask = Price::new(dec!(10));
/// assert_eq!(Price::mid(bid, ask), Some(Price::new(dec!(11))));
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Price(Decimal);

impl Price {
    /// Zero price.
    pub const ZERO: Price = Price(Decimal::ZERO);

    /// Creates a price from a decimal value.
    #[must_use]
    pub const fn new(value: Decimal) -> Self {
        Self(value)
    }

    /// Creates a price from a floating-point model output.
    ///
    /// # Errors
    ///
    /// Returns `CoreError::MathError` for NaN or infinite values.
    pub fn from_f64(value: f64) -> CoreResult<Self> {
        Decimal::from_f64(value)
            .map(Self)
            .ok_or_else(|| CoreError::math_error(format!("price {value} is not representable")))
    }

    /// Returns the decimal value.
    #[must_use]
    pub const fn value(&self) -> Decimal {
        self.0
    }

    /// Returns the value as `f64` (lossy).
    #[must_use]
    pub fn to_f64(&self) -> f64 {
        self.0.to_f64().unwrap_or(f64::NAN)
    }

    /// Average of two prices, or `None` if their sum overflows.
    #[must_use]
    pub fn mid(a: Price, b: Price) -> Option<Price> {
        a.0.checked_add(b.0)
            .and_then(|sum| sum.checked_div(Decimal::TWO))
            .map(Price)
    }

    /// Rounds to `dp` decimal places (banker's rounding).
    #[must_use]
    pub fn round_dp(&self, dp: u32) -> Price {
        Price(self.0.round_dp(dp))
    }
}

impl fmt::Display for Price {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<Decimal> for Price {
    fn from(value: Decimal) -> Self {
        Self(value)
    }
}

impl Add for Price {
    type Output = Price;

    fn add(self, rhs: Price) -> Price {
        Price(self.0 + rhs.0)
    }
}

impl Sub for Price {
    type Output = Price;

    fn sub(self, rhs: Price) -> Price {
        Price(self.0 - rhs.0)
    }
}

impl Mul<Volume> for Price {
    type Output = Decimal;

    /// Turnover of `volume` units traded at this price.
    fn mul(self, rhs: Volume) -> Decimal {
        self.0 * rhs.0
    }
}

/// A traded quantity.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Volume(Decimal);

impl Volume {
    /// Zero volume.
    pub const ZERO: Volume = Volume(Decimal::ZERO);

    /// Creates a volume from a decimal value.
    #[must_use]
    pub const fn new(value: Decimal) -> Self {
        Self(value)
    }

    /// Returns the decimal value.
    #[must_use]
    pub const fn value(&self) -> Decimal {
        self.0
    }

    /// Returns true if the volume is zero.
    #[must_use]
    pub fn is_zero(&self) -> bool {
        self.0.is_zero()
    }
}

impl fmt::Display for Volume {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<Decimal> for Volume {
    fn from(value: Decimal) -> Self {
        Self(value)
    }
}

impl Add for Volume {
    type Output = Volume;

    fn add(self, rhs: Volume) -> Volume {
        Volume(self.0 + rhs.0)
    }
}
