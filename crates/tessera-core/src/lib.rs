//! # Tessera Core
//!
//! Core types and pricing conventions shared by every Tessera crate.
//!
//! - **Types**: `Date`, `Timestamp`, `Price`, `Volume`
//! - **Day Count Conventions**: year fractions for accrual and discounting
//! - **Compounding**: discount factors for compounded and simple interest
//!
//! ## Example
//!
//! ```rust
//! use tessera_core::prelude::*;
//!
//! let start = Date::from_ymd(2021, 1, 1).unwrap();
//! let end = Date::from_ymd(2021, 7, 1).unwrap();
//!
//! let yf = DayCountConvention::Act365Fixed.year_fraction(start, end);
//! let df = CompoundingMethod::Compounding.discount_factor(0.03, 2, 1.0);
//! assert!(yf > 0.49 && df < 1.0);
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::missing_errors_doc)]
#![allow(clippy::must_use_candidate)]
#![allow(clippy::cast_precision_loss)]
#![allow(clippy::cast_possible_wrap)]
#![allow(clippy::cast_lossless)]
#![allow(clippy::doc_markdown)]

pub mod compounding;
pub mod daycounts;
pub mod error;
pub mod types;

/// Prelude module for convenient imports.
pub mod prelude {
    pub use crate::compounding::CompoundingMethod;
    pub use crate::daycounts::{DayCount, DayCountConvention};
    pub use crate::error::{CoreError, CoreResult};
    pub use crate::types::{Date, Price, Timestamp, Volume};
}

// Re-export commonly used types at crate root
pub use error::{CoreError, CoreResult};
pub use types::{Date, Price, Timestamp, Volume};
