//! Compounding methods for discounting cash flows.
//!
//! Time is measured in coupon periods; `frequency` is the number of coupon
//! periods per year, so `periods / frequency` is the time in years.

use serde::{Deserialize, Serialize};

use crate::error::CoreError;

/// Rule converting a yield and a time into a discount factor.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum CompoundingMethod {
    /// Periodic compounding at the coupon frequency:
    /// `(1 + y / f) ^ (-n)`
    #[default]
    Compounding,

    /// Simple interest over the elapsed years: `1 / (1 + y * n / f)`
    Simple,
}

impl CompoundingMethod {
    /// Discount factor for `periods` coupon periods at `yield_rate`.
    ///
    /// # Arguments
    ///
    /// * `yield_rate` - Annual yield as a decimal (0.05 = 5%)
    /// * `frequency` - Compounding periods per year (coupon frequency, >= 1)
    /// * `periods` - Time to the cash flow in periods (may be fractional)
    #[must_use]
    pub fn discount_factor(&self, yield_rate: f64, frequency: u32, periods: f64) -> f64 {
        let f = f64::from(frequency.max(1));
        match self {
            CompoundingMethod::Compounding => (1.0 + yield_rate / f).powf(-periods),
            CompoundingMethod::Simple => 1.0 / (1.0 + yield_rate * periods / f),
        }
    }

    /// Returns the name of the method.
    #[must_use]
    pub fn name(&self) -> &'static str {
        match self {
            CompoundingMethod::Compounding => "COMPOUNDING",
            CompoundingMethod::Simple => "SIMPLE",
        }
    }
}

impl std::fmt::Display for CompoundingMethod {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.name())
    }
}

impl std::str::FromStr for CompoundingMethod {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_uppercase().as_str() {
            "COMPOUNDING" | "COMPOUND" | "PERIODIC" => Ok(CompoundingMethod::Compounding),
            "SIMPLE" => Ok(CompoundingMethod::Simple),
            _ => Err(CoreError::unknown_convention(s)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_compounding_annual() {
        let df = CompoundingMethod::Compounding.discount_factor(0.05, 1, 20.0);
        assert_relative_eq!(df, 1.05_f64.powi(-20), epsilon = 1e-15);
    }

    #[test]
    fn test_compounding_semi_annual() {
        let df = CompoundingMethod::Compounding.discount_factor(0.03, 2, 4.0);
        assert_relative_eq!(df, 1.015_f64.powi(-4), epsilon = 1e-15);
    }

    #[test]
    fn test_simple() {
        // Two semi-annual periods = one year
        let df = CompoundingMethod::Simple.discount_factor(0.04, 2, 2.0);
        assert_relative_eq!(df, 1.0 / 1.04, epsilon = 1e-15);
    }

    #[test]
    fn test_zero_time_is_par() {
        for method in [CompoundingMethod::Compounding, CompoundingMethod::Simple] {
            assert_relative_eq!(method.discount_factor(0.07, 4, 0.0), 1.0);
        }
    }

    #[test]
    fn test_zero_yield_is_par() {
        assert_relative_eq!(CompoundingMethod::Compounding.discount_factor(0.0, 2, 7.5), 1.0);
        assert_relative_eq!(CompoundingMethod::Simple.discount_factor(0.0, 2, 7.5), 1.0);
    }

    #[test]
    fn test_parse() {
        assert_eq!(
            "compounding".parse::<CompoundingMethod>().unwrap(),
            CompoundingMethod::Compounding
        );
        assert_eq!(
            "SIMPLE".parse::<CompoundingMethod>().unwrap(),
            CompoundingMethod::Simple
        );
        assert!("CONTINUOUS".parse::<CompoundingMethod>().is_err());
    }

    mod proptests {
        use super::*;
        use proptest::prelude::*;

        proptest! {
            #[test]
            fn discount_factor_is_a_fraction(
                yield_rate in 0.0f64..0.25,
                frequency in prop::sample::select(vec![1u32, 2, 4, 12]),
                periods in 0.0f64..120.0,
            ) {
                for method in [CompoundingMethod::Compounding, CompoundingMethod::Simple] {
                    let df = method.discount_factor(yield_rate, frequency, periods);
                    prop_assert!(df > 0.0 && df <= 1.0);
                }
            }
        }
    }
}
