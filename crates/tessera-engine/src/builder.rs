//! Builder pattern for the pricing engine.

use std::sync::Arc;

use tessera_bonds::BondDiscountingPriceModel;
use tessera_traits::SnapshotPublisher;

use crate::config::EngineConfig;
use crate::engine::PricingEngine;
use crate::error::{EngineError, EngineResult};
use crate::market_data::MarketDataService;
use crate::reference_data::ReferenceDataRegistry;
use crate::theoretical::{PriceModel, TheoreticalPriceCalculator};

/// Builder for constructing a [`PricingEngine`].
///
/// Only the publisher is required. Stores default to empty ones and the
/// price model defaults to a bond discounting model reading curves from the
/// engine's market data store.
#[derive(Default)]
pub struct PricingEngineBuilder {
    config: Option<EngineConfig>,
    publisher: Option<Arc<dyn SnapshotPublisher>>,
    price_model: Option<Arc<dyn PriceModel>>,
    market_data: Option<Arc<MarketDataService>>,
    reference_data: Option<Arc<ReferenceDataRegistry>>,
}

impl PricingEngineBuilder {
    /// Create a new builder.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the engine configuration.
    pub fn with_config(mut self, config: EngineConfig) -> Self {
        self.config = Some(config);
        self
    }

    /// Set the snapshot publisher.
    pub fn with_publisher(mut self, publisher: Arc<dyn SnapshotPublisher>) -> Self {
        self.publisher = Some(publisher);
        self
    }

    /// Set the theoretical price model.
    pub fn with_price_model(mut self, model: Arc<dyn PriceModel>) -> Self {
        self.price_model = Some(model);
        self
    }

    /// Share an existing curve store.
    pub fn with_market_data(mut self, market_data: Arc<MarketDataService>) -> Self {
        self.market_data = Some(market_data);
        self
    }

    /// Share an existing instrument registry.
    pub fn with_reference_data(mut self, reference_data: Arc<ReferenceDataRegistry>) -> Self {
        self.reference_data = Some(reference_data);
        self
    }

    /// Build the pricing engine.
    pub fn build(self) -> EngineResult<PricingEngine> {
        let config = self.config.unwrap_or_default();
        config.validate()?;

        let publisher = self
            .publisher
            .ok_or_else(|| EngineError::configuration("publisher not configured"))?;

        let market_data = self
            .market_data
            .unwrap_or_else(|| Arc::new(MarketDataService::new()));
        let reference_data = self
            .reference_data
            .unwrap_or_else(|| Arc::new(ReferenceDataRegistry::new()));

        let model: Arc<dyn PriceModel> = match self.price_model {
            Some(model) => model,
            None => Arc::new(BondDiscountingPriceModel::new(market_data.clone())),
        };

        Ok(PricingEngine::new(
            config,
            reference_data,
            market_data,
            Arc::new(TheoreticalPriceCalculator::new(model)),
            publisher,
        ))
    }
}
