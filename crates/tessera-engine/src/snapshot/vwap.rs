//! Running volume-weighted average price.

use rust_decimal::Decimal;
use tracing::warn;

use tessera_core::types::{Price, Volume};

/// Cumulative VWAP over every trade since creation.
///
/// Sums are kept in `Decimal` so the average is exact.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct VwapAccumulator {
    turnover: Decimal,
    total_volume: Decimal,
}

impl VwapAccumulator {
    /// Creates an empty accumulator.
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a trade. A trade that would overflow the sums is dropped.
    pub fn add(&mut self, price: Price, volume: Volume) {
        let updated = price
            .value()
            .checked_mul(volume.value())
            .and_then(|notional| self.turnover.checked_add(notional))
            .zip(self.total_volume.checked_add(volume.value()));

        match updated {
            Some((turnover, total_volume)) => {
                self.turnover = turnover;
                self.total_volume = total_volume;
            }
            None => warn!("VWAP overflow, dropping trade {} x {}", volume, price),
        }
    }

    /// Current VWAP, or `None` while cumulative volume is zero.
    pub fn vwap(&self) -> Option<Price> {
        if self.total_volume.is_zero() {
            return None;
        }
        self.turnover.checked_div(self.total_volume).map(Price::new)
    }

    /// Sum of price times volume.
    pub fn turnover(&self) -> Decimal {
        self.turnover
    }

    /// Sum of volumes.
    pub fn total_volume(&self) -> Volume {
        Volume::new(self.total_volume)
    }
}
