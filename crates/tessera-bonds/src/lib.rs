//! # Tessera Bonds
//!
//! Theoretical pricing of fixed-rate bonds by discounting their cash flows.
//!
//! - [`BondInstrument`]: coupon terms, conventions and pricing parameters
//! - [`CouponSchedule`]: coupon dates from start to maturity
//! - [`BondDiscountingPriceModel`]: clean price, dirty price and accrued
//!   interest against a flat yield or a yield curve
//!
//! ## Example
//!
//! ```rust
//! use tessera_bonds::prelude::*;
//! use tessera_core::prelude::*;
//!
//! let bond = BondInstrument::builder()
//!     .start_date(Date::from_ymd(2020, 1, 1).unwrap())
//!     .maturity_date(Date::from_ymd(2040, 1, 1).unwrap())
//!     .coupon_annual_frequency(1)
//!     .coupon_rate(0.0)
//!     .nominal_value(1000.0)
//!     .build()
//!     .unwrap();
//!
//! let model = BondDiscountingPriceModel::default();
//! let as_of = Date::from_ymd(2019, 1, 1).unwrap();
//! let result = model
//!     .calculate_bond_price(&bond, YieldSource::Flat(0.05), as_of)
//!     .unwrap();
//!
//! assert!((result.clean_price - 376.89).abs() < 0.01);
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::missing_errors_doc)]
#![allow(clippy::must_use_candidate)]
#![allow(clippy::cast_precision_loss)]
#![allow(clippy::cast_possible_wrap)]
#![allow(clippy::cast_possible_truncation)]
#![allow(clippy::doc_markdown)]

pub mod error;
pub mod instrument;
pub mod model;
pub mod schedule;

pub use error::{BondError, BondResult};
pub use instrument::{BondInstrument, BondInstrumentBuilder, BondPricingParameters};
pub use model::{BondDiscountingPriceModel, BondPriceResult, YieldSource};
pub use schedule::CouponSchedule;

/// Prelude module for convenient imports.
pub mod prelude {
    pub use crate::error::{BondError, BondResult};
    pub use crate::instrument::{BondInstrument, BondPricingParameters};
    pub use crate::model::{BondDiscountingPriceModel, BondPriceResult, YieldSource};
    pub use crate::schedule::CouponSchedule;
}
