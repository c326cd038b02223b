//! Curve lookup capability.

use std::collections::HashMap;
use std::sync::Arc;

use crate::curve::YieldCurve;
use crate::ids::CurveId;

/// Source of published yield curves.
///
/// Returned curves are shared and immutable; a refresh replaces the `Arc`
/// held by the provider, never the curve behind it.
pub trait YieldCurveProvider: Send + Sync {
    /// Current curve for `curve_id`, if one has been published.
    fn curve(&self, curve_id: &CurveId) -> Option<Arc<YieldCurve>>;
}

impl YieldCurveProvider for HashMap<CurveId, Arc<YieldCurve>> {
    fn curve(&self, curve_id: &CurveId) -> Option<Arc<YieldCurve>> {
        self.get(curve_id).cloned()
    }
}

impl<P: YieldCurveProvider + ?Sized> YieldCurveProvider for Arc<P> {
    fn curve(&self, curve_id: &CurveId) -> Option<Arc<YieldCurve>> {
        (**self).curve(curve_id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tessera_core::types::Date;

    #[test]
    fn test_hashmap_provider() {
        let anchor = Date::from_ymd(2020, 1, 1).unwrap();
        let mut curves = HashMap::new();
        curves.insert(
            CurveId::new("GOVT"),
            Arc::new(YieldCurve::flat("GOVT", anchor, 0.02)),
        );

        assert!(curves.curve(&CurveId::new("GOVT")).is_some());
        assert!(curves.curve(&CurveId::new("MISSING")).is_none());
    }
}
