//! Domain types for market data and pricing.
//!
//! - [`Date`]: Calendar date for financial calculations
//! - [`Timestamp`]: Event time in epoch milliseconds
//! - [`Price`]: Decimal price of one unit of an instrument
//! - [`Volume`]: Decimal traded quantity

mod date;
mod price;
mod timestamp;

pub use date::Date;
pub use price::{Price, Volume};
pub use timestamp::Timestamp;
