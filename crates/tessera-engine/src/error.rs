//! Engine error types.

use thiserror::Error;

use tessera_bonds::BondError;
use tessera_core::CoreError;
use tessera_curves::CurveError;
use tessera_traits::{InstrumentId, TraitError};

/// A specialized Result type for engine operations.
pub type EngineResult<T> = Result<T, EngineError>;

/// Engine error type.
#[derive(Debug, Error)]
pub enum EngineError {
    /// Rejected configuration or reference data
    #[error("configuration error: {0}")]
    Configuration(String),

    /// No pricing model for the instrument's category
    #[error("unsupported instrument: {0}")]
    UnsupportedInstrument(String),

    /// Valuation date on or after the instrument's last cash flow
    #[error("instrument expired: {0}")]
    Expired(String),

    /// Event for an instrument that was never registered
    #[error("unknown instrument: {0}")]
    UnknownInstrument(InstrumentId),

    /// Bond model error
    #[error("bond pricing error: {0}")]
    Bond(#[from] BondError),

    /// Curve construction error
    #[error("curve error: {0}")]
    Curve(#[from] CurveError),

    /// Core type error
    #[error("core error: {0}")]
    Core(#[from] CoreError),

    /// Publishing a snapshot failed
    #[error("publish error: {0}")]
    Publish(String),

    /// A lane task has stopped
    #[error("lane closed: {0}")]
    LaneClosed(String),

    /// IO error
    #[error("IO error: {0}")]
    Io(String),
}

impl EngineError {
    /// Creates a configuration error.
    pub fn configuration(message: impl Into<String>) -> Self {
        Self::Configuration(message.into())
    }

    /// Returns true if pricing failed for lack of curves or yields.
    pub fn is_missing_reference_data(&self) -> bool {
        matches!(self, EngineError::Bond(BondError::MissingReferenceData { .. }))
    }
}

impl From<TraitError> for EngineError {
    fn from(e: TraitError) -> Self {
        EngineError::Publish(e.to_string())
    }
}

impl From<std::io::Error> for EngineError {
    fn from(e: std::io::Error) -> Self {
        EngineError::Io(e.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_reference_data() {
        let err: EngineError = BondError::missing_reference_data("no curve").into();
        assert!(err.is_missing_reference_data());
        assert!(!EngineError::configuration("x").is_missing_reference_data());
    }

    #[test]
    fn test_display() {
        let err = EngineError::UnknownInstrument(InstrumentId::new("XS123"));
        assert_eq!(err.to_string(), "unknown instrument: XS123");
    }
}
