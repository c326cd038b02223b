//! Bond instrument terms.

use serde::{Deserialize, Serialize};
use tessera_core::compounding::CompoundingMethod;
use tessera_core::daycounts::DayCountConvention;
use tessera_core::types::Date;
use tessera_curves::CurveId;

use crate::error::{BondError, BondResult};

/// How a bond chooses its discounting yield.
///
/// With `calculate_with_curve` the yield for each cash flow is read from
/// the curve named by `yield_curve_id`; otherwise `constant_yield` is used
/// for every flow.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct BondPricingParameters {
    /// Curve used when pricing off a curve.
    pub yield_curve_id: Option<CurveId>,
    /// Flat annual yield used otherwise.
    pub constant_yield: Option<f64>,
    /// Selects curve pricing.
    pub calculate_with_curve: bool,
}

impl BondPricingParameters {
    /// Price with a flat yield.
    #[must_use]
    pub fn constant(yield_rate: f64) -> Self {
        Self {
            yield_curve_id: None,
            constant_yield: Some(yield_rate),
            calculate_with_curve: false,
        }
    }

    /// Price off the named curve.
    #[must_use]
    pub fn curve(curve_id: impl Into<CurveId>) -> Self {
        Self {
            yield_curve_id: Some(curve_id.into()),
            constant_yield: None,
            calculate_with_curve: true,
        }
    }
}

/// A fixed-rate bullet bond.
///
/// Coupons of `coupon_rate / coupon_annual_frequency * nominal_value` are
/// paid every `12 / coupon_annual_frequency` months from `start_date`; the
/// nominal is repaid with the last coupon on `maturity_date`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BondInstrument {
    /// First accrual date.
    pub start_date: Date,
    /// Final payment date.
    pub maturity_date: Date,
    /// Coupon payments per year.
    pub coupon_annual_frequency: u32,
    /// Annual coupon rate as a decimal.
    pub coupon_rate: f64,
    /// Face amount repaid at maturity.
    pub nominal_value: f64,
    /// Convention for accrual fractions.
    pub day_count: DayCountConvention,
    /// Discounting rule.
    #[serde(default)]
    pub compounding: CompoundingMethod,
    /// Yield source selection.
    #[serde(default)]
    pub pricing: BondPricingParameters,
}

impl BondInstrument {
    /// Creates a new builder.
    #[must_use]
    pub fn builder() -> BondInstrumentBuilder {
        BondInstrumentBuilder::default()
    }

    /// Coupon paid each period.
    #[must_use]
    pub fn coupon_amount(&self) -> f64 {
        self.coupon_rate / f64::from(self.coupon_annual_frequency.max(1)) * self.nominal_value
    }

    /// Months between coupon dates.
    #[must_use]
    pub fn coupon_period_months(&self) -> u32 {
        12 / self.coupon_annual_frequency.max(1)
    }

    /// Returns true if the bond pays no coupon.
    #[must_use]
    pub fn is_zero_coupon(&self) -> bool {
        self.coupon_rate == 0.0
    }

    /// Checks the terms describe a priceable bond.
    pub fn validate(&self) -> BondResult<()> {
        if self.maturity_date <= self.start_date {
            return Err(BondError::invalid_spec(format!(
                "maturity {} must be after start {}",
                self.maturity_date, self.start_date
            )));
        }
        if self.coupon_annual_frequency == 0 || 12 % self.coupon_annual_frequency != 0 {
            return Err(BondError::invalid_spec(format!(
                "coupon frequency {} must be a divisor of 12",
                self.coupon_annual_frequency
            )));
        }
        if !self.coupon_rate.is_finite() || self.coupon_rate < 0.0 {
            return Err(BondError::invalid_spec(format!(
                "coupon rate {} must be a non-negative number",
                self.coupon_rate
            )));
        }
        if !self.nominal_value.is_finite() || self.nominal_value < 0.0 {
            return Err(BondError::invalid_spec(format!(
                "nominal value {} must be a non-negative number",
                self.nominal_value
            )));
        }
        Ok(())
    }
}

/// Builder for [`BondInstrument`].
#[derive(Debug, Clone, Default)]
pub struct BondInstrumentBuilder {
    start_date: Option<Date>,
    maturity_date: Option<Date>,
    coupon_annual_frequency: Option<u32>,
    coupon_rate: Option<f64>,
    nominal_value: Option<f64>,
    day_count: Option<DayCountConvention>,
    compounding: Option<CompoundingMethod>,
    pricing: Option<BondPricingParameters>,
}

impl BondInstrumentBuilder {
    /// Sets the start date.
    #[must_use]
    pub fn start_date(mut self, date: Date) -> Self {
        self.start_date = Some(date);
        self
    }

    /// Sets the maturity date.
    #[must_use]
    pub fn maturity_date(mut self, date: Date) -> Self {
        self.maturity_date = Some(date);
        self
    }

    /// Sets the number of coupons per year.
    #[must_use]
    pub fn coupon_annual_frequency(mut self, frequency: u32) -> Self {
        self.coupon_annual_frequency = Some(frequency);
        self
    }

    /// Sets the coupon rate as a decimal (0.05 for 5%).
    #[must_use]
    pub fn coupon_rate(mut self, rate: f64) -> Self {
        self.coupon_rate = Some(rate);
        self
    }

    /// Sets the nominal value.
    #[must_use]
    pub fn nominal_value(mut self, nominal: f64) -> Self {
        self.nominal_value = Some(nominal);
        self
    }

    /// Sets the day count convention.
    #[must_use]
    pub fn day_count(mut self, day_count: DayCountConvention) -> Self {
        self.day_count = Some(day_count);
        self
    }

    /// Sets the compounding method.
    #[must_use]
    pub fn compounding(mut self, compounding: CompoundingMethod) -> Self {
        self.compounding = Some(compounding);
        self
    }

    /// Sets the pricing parameters.
    #[must_use]
    pub fn pricing(mut self, pricing: BondPricingParameters) -> Self {
        self.pricing = Some(pricing);
        self
    }

    /// Builds the `BondInstrument`.
    ///
    /// Day count defaults to ACT/365 Fixed, compounding to periodic, and
    /// pricing parameters to none.
    ///
    /// # Errors
    ///
    /// Returns an error if required fields are missing or values are invalid.
    pub fn build(self) -> BondResult<BondInstrument> {
        let start_date = self
            .start_date
            .ok_or_else(|| BondError::missing_field("start_date"))?;
        let maturity_date = self
            .maturity_date
            .ok_or_else(|| BondError::missing_field("maturity_date"))?;
        let coupon_annual_frequency = self
            .coupon_annual_frequency
            .ok_or_else(|| BondError::missing_field("coupon_annual_frequency"))?;
        let coupon_rate = self
            .coupon_rate
            .ok_or_else(|| BondError::missing_field("coupon_rate"))?;
        let nominal_value = self
            .nominal_value
            .ok_or_else(|| BondError::missing_field("nominal_value"))?;

        let bond = BondInstrument {
            start_date,
            maturity_date,
            coupon_annual_frequency,
            coupon_rate,
            nominal_value,
            day_count: self.day_count.unwrap_or(DayCountConvention::Act365Fixed),
            compounding: self.compounding.unwrap_or_default(),
            pricing: self.pricing.unwrap_or_default(),
        };
        bond.validate()?;
        Ok(bond)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> Date {
        Date::from_ymd(y, m, d).unwrap()
    }

    fn builder() -> BondInstrumentBuilder {
        BondInstrument::builder()
            .start_date(date(2021, 1, 1))
            .maturity_date(date(2023, 1, 1))
            .coupon_annual_frequency(2)
            .coupon_rate(0.04)
            .nominal_value(1000.0)
    }

    #[test]
    fn test_build_defaults() {
        let bond = builder().build().unwrap();
        assert_eq!(bond.day_count, DayCountConvention::Act365Fixed);
        assert_eq!(bond.compounding, CompoundingMethod::Compounding);
        assert_eq!(bond.pricing, BondPricingParameters::default());
        assert_eq!(bond.coupon_amount(), 20.0);
        assert_eq!(bond.coupon_period_months(), 6);
    }

    #[test]
    fn test_missing_field() {
        let err = BondInstrument::builder().build().unwrap_err();
        assert_eq!(err, BondError::missing_field("start_date"));
    }

    #[test]
    fn test_maturity_before_start() {
        let err = builder().maturity_date(date(2020, 1, 1)).build().unwrap_err();
        assert!(matches!(err, BondError::InvalidSpec { .. }));
    }

    #[test]
    fn test_frequency_must_divide_twelve() {
        assert!(builder().coupon_annual_frequency(0).build().is_err());
        assert!(builder().coupon_annual_frequency(5).build().is_err());
        assert!(builder().coupon_annual_frequency(12).build().is_ok());
    }

    #[test]
    fn test_negative_nominal() {
        assert!(builder().nominal_value(-1.0).build().is_err());
    }

    #[test]
    fn test_deserialize_reference_data() {
        let json = r#"{
            "start_date": "2020-01-01",
            "maturity_date": "2040-01-01",
            "coupon_annual_frequency": 2,
            "coupon_rate": 0.025,
            "nominal_value": 1000.0,
            "day_count": "ACT365",
            "compounding": "COMPOUNDING",
            "pricing": { "yield_curve_id": "GOVT", "calculate_with_curve": true }
        }"#;
        let bond: BondInstrument = serde_json::from_str(json).unwrap();
        assert_eq!(bond.pricing, BondPricingParameters::curve("GOVT"));
        assert!(bond.validate().is_ok());
    }
}
