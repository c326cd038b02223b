//! Instrument reference data.
//!
//! Instruments are registered once reference data has been received and
//! are immutable afterwards; re-registration replaces the record whole.

use std::sync::Arc;

use dashmap::DashMap;
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use tessera_bonds::BondInstrument;
use tessera_traits::{InstrumentId, PriceType};

use crate::error::{EngineError, EngineResult};

/// Product category of an instrument.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "category", content = "terms", rename_all = "SCREAMING_SNAKE_CASE")]
pub enum InstrumentKind {
    /// Fixed-rate bond, priceable by the discounting model
    Bond(BondInstrument),
    /// Equity; no theoretical model
    Equity,
}

impl InstrumentKind {
    /// Category name for log and error messages.
    pub fn name(&self) -> &'static str {
        match self {
            InstrumentKind::Bond(_) => "BOND",
            InstrumentKind::Equity => "EQUITY",
        }
    }
}

/// A tradable instrument and its snapshot configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Instrument {
    /// Instrument identifier
    pub instrument_id: InstrumentId,
    /// Price sources in order of preference; duplicates allowed
    pub intraday_price_priority: Vec<PriceType>,
    /// Product category and terms
    pub kind: InstrumentKind,
}

impl Instrument {
    /// Creates an equity instrument.
    pub fn equity(instrument_id: impl Into<InstrumentId>, priority: Vec<PriceType>) -> Self {
        Self {
            instrument_id: instrument_id.into(),
            intraday_price_priority: priority,
            kind: InstrumentKind::Equity,
        }
    }

    /// Creates a bond instrument.
    pub fn bond(
        instrument_id: impl Into<InstrumentId>,
        priority: Vec<PriceType>,
        terms: BondInstrument,
    ) -> Self {
        Self {
            instrument_id: instrument_id.into(),
            intraday_price_priority: priority,
            kind: InstrumentKind::Bond(terms),
        }
    }

    /// Checks the record can be used for snapshots and pricing.
    pub fn validate(&self) -> EngineResult<()> {
        if self.intraday_price_priority.is_empty() {
            return Err(EngineError::configuration(format!(
                "{}: intraday price priority is empty",
                self.instrument_id
            )));
        }
        if let InstrumentKind::Bond(bond) = &self.kind {
            bond.validate().map_err(|e| {
                EngineError::configuration(format!("{}: {e}", self.instrument_id))
            })?;
        }
        Ok(())
    }
}

/// Registry of validated instruments.
#[derive(Debug, Default)]
pub struct ReferenceDataRegistry {
    instruments: DashMap<InstrumentId, Arc<Instrument>>,
}

impl ReferenceDataRegistry {
    /// Creates an empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Validates and stores an instrument.
    ///
    /// An invalid record is rejected with `EngineError::Configuration` and
    /// leaves any previously registered version in place.
    pub fn register(&self, instrument: Instrument) -> EngineResult<Arc<Instrument>> {
        if let Err(e) = instrument.validate() {
            warn!("Rejected instrument {}: {}", instrument.instrument_id, e);
            return Err(e);
        }

        let instrument = Arc::new(instrument);
        debug!(
            "Registered {} instrument {}",
            instrument.kind.name(),
            instrument.instrument_id
        );
        self.instruments
            .insert(instrument.instrument_id.clone(), instrument.clone());
        Ok(instrument)
    }

    /// Looks up an instrument.
    pub fn get(&self, instrument_id: &InstrumentId) -> Option<Arc<Instrument>> {
        self.instruments.get(instrument_id).map(|r| r.value().clone())
    }

    /// Returns true if the instrument is registered.
    pub fn contains(&self, instrument_id: &InstrumentId) -> bool {
        self.instruments.contains_key(instrument_id)
    }

    /// Number of registered instruments.
    pub fn len(&self) -> usize {
        self.instruments.len()
    }

    /// Returns true if nothing is registered.
    pub fn is_empty(&self) -> bool {
        self.instruments.is_empty()
    }
}
