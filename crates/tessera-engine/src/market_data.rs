//! Published yield curves.
//!
//! Curves are rebuilt from reference data and swapped in whole. Readers
//! clone the `Arc` and keep a complete curve even if a refresh lands while
//! they are pricing.

use std::sync::Arc;

use dashmap::DashMap;
use tracing::{info, warn};

use tessera_curves::{CurveId, CurveResult, YieldCurve, YieldCurveProvider, YieldRefData};

/// Store of the current yield curve per curve id.
#[derive(Debug, Default)]
pub struct MarketDataService {
    curves: DashMap<CurveId, Arc<YieldCurve>>,
}

impl MarketDataService {
    /// Creates an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Builds a curve from reference data and publishes it.
    ///
    /// Invalid data is rejected and the previous curve stays published.
    pub fn update_curve(&self, data: &YieldRefData) -> CurveResult<Arc<YieldCurve>> {
        match YieldCurve::new(data) {
            Ok(curve) => {
                info!(
                    "Published curve {} ({} points, anchor {})",
                    data.curve_id,
                    data.len(),
                    data.anchor_date
                );
                Ok(self.insert(curve))
            }
            Err(e) => {
                warn!("Rejected curve {}: {}", data.curve_id, e);
                Err(e)
            }
        }
    }

    /// Publishes an already built curve.
    pub fn insert(&self, curve: YieldCurve) -> Arc<YieldCurve> {
        let curve = Arc::new(curve);
        self.curves.insert(curve.curve_id().clone(), curve.clone());
        curve
    }

    /// Current curve for `curve_id`.
    pub fn get(&self, curve_id: &CurveId) -> Option<Arc<YieldCurve>> {
        self.curves.get(curve_id).map(|r| r.value().clone())
    }

    /// Number of published curves.
    pub fn len(&self) -> usize {
        self.curves.len()
    }

    /// Returns true if no curve is published.
    pub fn is_empty(&self) -> bool {
        self.curves.is_empty()
    }
}

impl YieldCurveProvider for MarketDataService {
    fn curve(&self, curve_id: &CurveId) -> Option<Arc<YieldCurve>> {
        self.get(curve_id)
    }
}
