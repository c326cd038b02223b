//! # Tessera Curves
//!
//! Yield curves built from discrete reference points.
//!
//! A [`YieldCurve`] is constructed once from [`YieldRefData`] and never
//! mutated afterwards. A refresh of the reference data builds a new curve
//! and replaces the old one wholesale, so readers holding an `Arc` to the
//! previous curve keep a complete, consistent view.
//!
//! ## Interpolation
//!
//! - Time to maturity is ACT/365 Fixed from the curve's anchor date
//! - Linear interpolation between bracketing points
//! - Flat extrapolation before the first and after the last point
//!
//! ## Example
//!
//! ```rust
//! use tessera_core::types::Date;
//! use tessera_curves::{YieldCurve, YieldRefData};
//!
//! let anchor = Date::from_ymd(2019, 1, 1).unwrap();
//! let data = YieldRefData::new(
//!     "GOVT",
//!     anchor,
//!     vec![anchor.add_days(365), anchor.add_days(730)],
//!     vec![0.01, 0.02],
//! );
//! let curve = YieldCurve::new(&data).unwrap();
//!
//! let y = curve.yield_at(anchor.add_days(547));
//! assert!(y > 0.01 && y < 0.02);
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::missing_errors_doc)]
#![allow(clippy::must_use_candidate)]
#![allow(clippy::cast_precision_loss)]
#![allow(clippy::doc_markdown)]

pub mod curve;
pub mod error;
pub mod ids;
pub mod provider;
pub mod ref_data;

pub use curve::YieldCurve;
pub use error::{CurveError, CurveResult};
pub use ids::CurveId;
pub use provider::YieldCurveProvider;
pub use ref_data::YieldRefData;

/// Prelude module for convenient imports.
pub mod prelude {
    pub use crate::curve::YieldCurve;
    pub use crate::error::{CurveError, CurveResult};
    pub use crate::ids::CurveId;
    pub use crate::provider::YieldCurveProvider;
    pub use crate::ref_data::YieldRefData;
}
