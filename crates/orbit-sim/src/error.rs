//! Error types for the orbit engine

use thiserror::Error;

/// Result type for engine operations
pub type OrbitResult<T> = Result<T, OrbitError>;

/// Errors surfaced by construction and queries
#[derive(Error, Debug, Clone, PartialEq)]
pub enum OrbitError {
    /// Invalid orbital elements or engine configuration
    #[error("Invalid {field}: {reason}")]
    Validation { field: &'static str, reason: String },

    /// Newton-Raphson exhausted its iteration budget
    #[error(
        "Kepler solver did not converge after {iterations} iterations \
         (eccentricity {eccentricity}, mean anomaly {mean_anomaly}, last step {last_step:e})"
    )]
    Convergence {
        iterations: usize,
        eccentricity: f64,
        mean_anomaly: f64,
        last_step: f64,
    },
}

impl OrbitError {
    pub(crate) fn validation(field: &'static str, reason: impl Into<String>) -> Self {
        OrbitError::Validation { field, reason: reason.into() }
    }
}
