//! Theoretical (model) prices.
//!
//! [`TheoreticalPriceCalculator`] picks the model for an instrument's
//! product category through the [`PriceModel`] capability trait. Bonds are
//! the only category with a model; everything else is unsupported.

use std::sync::Arc;

use tessera_bonds::{BondDiscountingPriceModel, BondInstrument};
use tessera_core::types::{Date, Price};

use crate::error::{EngineError, EngineResult};
use crate::reference_data::{Instrument, InstrumentKind};

/// Pricing capabilities, one method per supported product category.
pub trait PriceModel: Send + Sync {
    /// Theoretical clean price of a bond.
    fn price_bond(&self, bond: &BondInstrument, as_of: Date) -> EngineResult<Price>;
}

impl PriceModel for BondDiscountingPriceModel {
    /// Fails with `EngineError::Expired` from the maturity date on, so a
    /// matured bond has no theoretical price rather than a price of zero.
    fn price_bond(&self, bond: &BondInstrument, as_of: Date) -> EngineResult<Price> {
        if as_of >= bond.maturity_date {
            return Err(EngineError::Expired(format!(
                "bond matured on {} (valuation date {as_of})",
                bond.maturity_date
            )));
        }
        let result = self.calculate(bond, as_of)?;
        Ok(Price::from_f64(result.clean_price)?)
    }
}

/// Dispatches instruments to their pricing model.
#[derive(Clone)]
pub struct TheoreticalPriceCalculator {
    model: Arc<dyn PriceModel>,
}

impl std::fmt::Debug for TheoreticalPriceCalculator {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TheoreticalPriceCalculator").finish_non_exhaustive()
    }
}

impl TheoreticalPriceCalculator {
    /// Create a calculator over a model.
    pub fn new(model: Arc<dyn PriceModel>) -> Self {
        Self { model }
    }

    /// Theoretical price of `instrument` on `as_of`.
    ///
    /// Fails with `EngineError::UnsupportedInstrument` for categories
    /// without a model, and with the model's error otherwise.
    pub fn calculate(&self, instrument: &Instrument, as_of: Date) -> EngineResult<Price> {
        match &instrument.kind {
            InstrumentKind::Bond(bond) => self.model.price_bond(bond, as_of),
            other => Err(EngineError::UnsupportedInstrument(format!(
                "{} ({})",
                instrument.instrument_id,
                other.name()
            ))),
        }
    }
}
