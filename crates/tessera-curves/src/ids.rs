//! Curve identifiers.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Curve identifier, as referenced by a bond's pricing parameters.
#[derive(Debug, Clone, Hash, Eq, PartialEq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CurveId(pub String);

impl CurveId {
    /// Create a new curve ID.
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// Get the ID as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for CurveId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<String> for CurveId {
    fn from(s: String) -> Self {
        Self(s)
    }
}

impl From<&str> for CurveId {
    fn from(s: &str) -> Self {
        Self(s.to_string())
    }
}
