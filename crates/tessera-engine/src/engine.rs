//! The pricing engine.
//!
//! Holds one [`PriceSnapshotCalculator`] per instrument, created on the
//! first event for that instrument. Each calculator sits behind its own
//! mutex inside a sharded map, so events for one instrument are applied one
//! at a time while different instruments proceed independently.

use std::sync::Arc;

use dashmap::mapref::entry::Entry;
use dashmap::DashMap;
use parking_lot::Mutex;
use tracing::{debug, info, warn};

use tessera_curves::{CurveId, YieldCurve, YieldRefData};
use tessera_traits::{InstrumentId, MarketDataPrice, MarketEvent, SnapshotPublisher};

use crate::config::EngineConfig;
use crate::error::{EngineError, EngineResult};
use crate::market_data::MarketDataService;
use crate::reference_data::{Instrument, ReferenceDataRegistry};
use crate::snapshot::PriceSnapshotCalculator;
use crate::theoretical::TheoreticalPriceCalculator;

/// The main pricing engine.
pub struct PricingEngine {
    /// Engine configuration
    config: EngineConfig,

    /// Registered instruments
    reference_data: Arc<ReferenceDataRegistry>,

    /// Published curves
    market_data: Arc<MarketDataService>,

    /// Model dispatch shared by all calculators
    theoretical: Arc<TheoreticalPriceCalculator>,

    /// Snapshot state per instrument
    calculators: DashMap<InstrumentId, Mutex<PriceSnapshotCalculator>>,

    /// Output publisher
    publisher: Arc<dyn SnapshotPublisher>,
}

impl std::fmt::Debug for PricingEngine {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PricingEngine")
            .field("name", &self.config.name)
            .field("instruments", &self.reference_data.len())
            .field("curves", &self.market_data.len())
            .field("calculators", &self.calculators.len())
            .finish_non_exhaustive()
    }
}

impl PricingEngine {
    /// Create a new pricing engine.
    pub fn new(
        config: EngineConfig,
        reference_data: Arc<ReferenceDataRegistry>,
        market_data: Arc<MarketDataService>,
        theoretical: Arc<TheoreticalPriceCalculator>,
        publisher: Arc<dyn SnapshotPublisher>,
    ) -> Self {
        info!(
            "Starting pricing engine: {} (publish interval {} ms)",
            config.name, config.min_publish_interval_ms
        );
        Self {
            config,
            reference_data,
            market_data,
            theoretical,
            calculators: DashMap::new(),
            publisher,
        }
    }

    /// Engine configuration.
    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    /// Registered instruments.
    pub fn reference_data(&self) -> &Arc<ReferenceDataRegistry> {
        &self.reference_data
    }

    /// Published curves.
    pub fn market_data(&self) -> &Arc<MarketDataService> {
        &self.market_data
    }

    /// Registers or replaces an instrument.
    ///
    /// Existing snapshot state for the instrument is kept and priced with
    /// the new record from the next event on.
    pub fn register_instrument(&self, instrument: Instrument) -> EngineResult<()> {
        let instrument = self.reference_data.register(instrument)?;
        if let Some(calculator) = self.calculators.get(&instrument.instrument_id) {
            calculator.lock().set_instrument(instrument);
        }
        Ok(())
    }

    /// Builds and publishes a curve, replacing any previous version.
    pub fn update_curve(&self, data: &YieldRefData) -> EngineResult<Arc<YieldCurve>> {
        Ok(self.market_data.update_curve(data)?)
    }

    /// Current curve for `curve_id`.
    pub fn curve(&self, curve_id: &CurveId) -> Option<Arc<YieldCurve>> {
        self.market_data.get(curve_id)
    }

    /// Applies an event to its instrument's snapshot state.
    ///
    /// Returns the snapshot to publish, if any, without publishing it.
    /// Fails with `EngineError::UnknownInstrument` for instruments that
    /// have not been registered.
    pub fn on_event(&self, event: &MarketEvent) -> EngineResult<Option<MarketDataPrice>> {
        let instrument_id = event.instrument_id();

        if let Some(calculator) = self.calculators.get(instrument_id) {
            return Ok(calculator.lock().update_and_get(event));
        }

        // The registry is read under the shard lock so that a concurrent
        // re-registration either lands before this read or finds the new
        // calculator and updates it.
        let calculator = match self.calculators.entry(instrument_id.clone()) {
            Entry::Occupied(entry) => entry.into_ref(),
            Entry::Vacant(entry) => {
                let instrument = self
                    .reference_data
                    .get(instrument_id)
                    .ok_or_else(|| EngineError::UnknownInstrument(instrument_id.clone()))?;
                debug!("Creating snapshot state for {}", instrument_id);
                entry.insert(Mutex::new(PriceSnapshotCalculator::new(
                    instrument,
                    self.theoretical.clone(),
                    self.config.min_publish_interval_millis(),
                )))
            }
        }
        .downgrade();

        let snapshot = calculator.lock().update_and_get(event);
        Ok(snapshot)
    }

    /// Applies an event and publishes the resulting snapshot.
    ///
    /// A failed publish is logged and does not fail the event.
    pub async fn process(&self, event: &MarketEvent) -> EngineResult<Option<MarketDataPrice>> {
        let snapshot = self.on_event(event)?;

        if let Some(snapshot) = &snapshot {
            if let Err(e) = self.publisher.publish(snapshot).await {
                warn!(
                    "Failed to publish snapshot for {}: {}",
                    snapshot.instrument_id, e
                );
            }
        }

        Ok(snapshot)
    }

    /// Runs `f` against an instrument's snapshot state, if it exists.
    pub fn with_calculator<R>(
        &self,
        instrument_id: &InstrumentId,
        f: impl FnOnce(&PriceSnapshotCalculator) -> R,
    ) -> Option<R> {
        self.calculators
            .get(instrument_id)
            .map(|calculator| f(&*calculator.lock()))
    }

    /// Number of instruments with snapshot state.
    pub fn active_instruments(&self) -> usize {
        self.calculators.len()
    }
}
