//! Coupon schedule generation.
//!
//! The schedule runs forward from the start date in steps of
//! `12 / frequency` months, clamping to month end where the day does not
//! exist. The maturity date always closes the schedule, so a maturity that
//! is not on the regular grid produces a short final period.

use tessera_core::types::Date;

use crate::error::BondResult;
use crate::instrument::BondInstrument;

/// Accrual boundaries of a bond, start date first and maturity last.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CouponSchedule {
    dates: Vec<Date>,
}

impl CouponSchedule {
    /// Generates the schedule for a bond.
    ///
    /// # Errors
    ///
    /// Returns `BondError::InvalidSpec` for bonds that fail validation, and
    /// a core error if date arithmetic leaves the supported range.
    pub fn generate(bond: &BondInstrument) -> BondResult<Self> {
        bond.validate()?;

        let step = bond.coupon_period_months() as i32;
        let mut dates = vec![bond.start_date];

        let mut i = 1;
        loop {
            let date = bond.start_date.add_months(i * step)?;
            if date >= bond.maturity_date {
                break;
            }
            dates.push(date);
            i += 1;
        }
        dates.push(bond.maturity_date);

        Ok(Self { dates })
    }

    /// All boundaries including the start date.
    pub fn dates(&self) -> &[Date] {
        &self.dates
    }

    /// Coupon payment dates (every boundary after the start date).
    pub fn payment_dates(&self) -> &[Date] {
        &self.dates[1..]
    }

    /// First accrual date.
    pub fn start(&self) -> Date {
        self.dates[0]
    }

    /// Last payment date.
    pub fn maturity(&self) -> Date {
        self.dates[self.dates.len() - 1]
    }

    /// Index `j` such that `dates[j] <= as_of < dates[j + 1]`.
    ///
    /// `None` before the start date and on or after maturity.
    pub fn period_index(&self, as_of: Date) -> Option<usize> {
        if as_of < self.start() || as_of >= self.maturity() {
            return None;
        }
        Some(self.dates.partition_point(|d| *d <= as_of) - 1)
    }

    /// `(previous, next)` coupon dates around `as_of`.
    pub fn period_containing(&self, as_of: Date) -> Option<(Date, Date)> {
        self.period_index(as_of)
            .map(|j| (self.dates[j], self.dates[j + 1]))
    }
}
