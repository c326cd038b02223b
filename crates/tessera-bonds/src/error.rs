//! Error types for bond operations.

use thiserror::Error;

/// A specialized Result type for bond operations.
pub type BondResult<T> = Result<T, BondError>;

/// Errors that can occur during bond operations.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum BondError {
    /// Invalid bond specification.
    #[error("Invalid bond specification: {reason}")]
    InvalidSpec {
        /// Description of what's invalid.
        reason: String,
    },

    /// Missing required field.
    #[error("Missing required field: {field}")]
    MissingField {
        /// The missing field name.
        field: String,
    },

    /// Data needed to choose a yield source is absent.
    #[error("Missing reference data: {reason}")]
    MissingReferenceData {
        /// What is missing.
        reason: String,
    },

    /// Core library error.
    #[error("Core error: {0}")]
    CoreError(#[from] tessera_core::CoreError),

    /// Curve error.
    #[error("Curve error: {0}")]
    CurveError(#[from] tessera_curves::CurveError),
}

impl BondError {
    /// Creates an invalid specification error.
    #[must_use]
    pub fn invalid_spec(reason: impl Into<String>) -> Self {
        Self::InvalidSpec {
            reason: reason.into(),
        }
    }

    /// Creates a missing field error.
    #[must_use]
    pub fn missing_field(field: impl Into<String>) -> Self {
        Self::MissingField {
            field: field.into(),
        }
    }

    /// Creates a missing reference data error.
    #[must_use]
    pub fn missing_reference_data(reason: impl Into<String>) -> Self {
        Self::MissingReferenceData {
            reason: reason.into(),
        }
    }
}
