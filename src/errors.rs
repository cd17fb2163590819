//! Error taxonomy shared by every computation in the crate.

use thiserror::Error;

use crate::math::CScalar;

/// Top-level error type for the crate.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum CouplingError {
    /// Degenerate geometry: coincident positions, non-finite coordinates, negative lengths.
    #[error("invalid geometry: {0}")]
    InvalidGeometry(String),
    /// Non-physical scenario parameters such as a frequency or resistivity ≤ 0.
    #[error("invalid scenario: {0}")]
    InvalidScenario(String),
    /// A computation produced a non-finite value.
    #[error("numeric overflow: {0}")]
    NumericOverflow(String),
    /// A physical constant failed validation or is not recognised.
    #[error("invalid physical constant {name} = {value}")]
    InvalidConstant {
        /// Constant name.
        name: String,
        /// Offending value.
        value: f64,
    },
    /// Raised when a required parameter is missing.
    #[error("missing parameter: {0}")]
    MissingParameter(&'static str),
}

/// Result alias used throughout the crate.
pub type Result<T, E = CouplingError> = std::result::Result<T, E>;

/// Returns `value` if it is finite, otherwise a [`CouplingError::NumericOverflow`] naming `what`.
pub(crate) fn ensure_finite(value: f64, what: &str) -> Result<f64> {
    if value.is_finite() {
        Ok(value)
    } else {
        Err(CouplingError::NumericOverflow(format!("{what} is {value}")))
    }
}

/// Phasor counterpart of [`ensure_finite`]; both parts must be finite.
pub(crate) fn ensure_finite_phasor(value: CScalar, what: &str) -> Result<CScalar> {
    if value.is_finite() {
        Ok(value)
    } else {
        Err(CouplingError::NumericOverflow(format!("{what} is {value}")))
    }
}
