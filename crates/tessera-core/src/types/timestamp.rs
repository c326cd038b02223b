//! Event timestamps.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

use super::Date;
use crate::error::{CoreError, CoreResult};

/// Time of an event in milliseconds since the Unix epoch (UTC).
///
/// Market data events carry the exchange's event time, which is what the
/// throttling window and the valuation date are derived from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Timestamp(i64);

impl Timestamp {
    /// Creates a timestamp from epoch milliseconds.
    #[must_use]
    pub const fn from_millis(millis: i64) -> Self {
        Self(millis)
    }

    /// Returns the current wall-clock time.
    #[must_use]
    pub fn now() -> Self {
        Self(Utc::now().timestamp_millis())
    }

    /// Returns epoch milliseconds.
    #[must_use]
    pub const fn as_millis(&self) -> i64 {
        self.0
    }

    /// Milliseconds elapsed since `earlier` (negative if `earlier` is later).
    #[must_use]
    pub const fn millis_since(&self, earlier: Timestamp) -> i64 {
        self.0.saturating_sub(earlier.0)
    }

    /// Returns the UTC calendar date of this timestamp.
    ///
    /// # Errors
    ///
    /// Returns `CoreError::InvalidTimestamp` if the value is outside the
    /// range chrono can represent.
    pub fn to_date(&self) -> CoreResult<Date> {
        DateTime::<Utc>::from_timestamp_millis(self.0)
            .map(|dt| Date::from(dt.date_naive()))
            .ok_or(CoreError::InvalidTimestamp { millis: self.0 })
    }
}

impl fmt::Display for Timestamp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}ms", self.0)
    }
}

impl From<i64> for Timestamp {
    fn from(millis: i64) -> Self {
        Self(millis)
    }
}
