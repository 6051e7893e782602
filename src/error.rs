// error.rs - Typed errors for the distance core

use thiserror::Error;

/// Errors raised while building matrices, clusters or conservation profiles
#[derive(Debug, Clone, PartialEq, Error)]
pub enum DistanceError {
    /// A sequence does not have the alignment width of the first sequence
    #[error("sequence '{id}' has length {found}, expected {expected} (input is not aligned)")]
    ShapeMismatch {
        id: String,
        expected: usize,
        found: usize,
    },

    /// No sequences were supplied
    #[error("no sequences provided")]
    EmptyInput,

    /// The distance correction is undefined for the observed p-distance
    #[error("{metric} distance saturated for '{first}' vs '{second}' (p = {p:.4})")]
    Saturated {
        metric: String,
        first: String,
        second: String,
        p: f64,
    },

    /// Bad argument to a computation (threshold, cluster count, ...)
    #[error("invalid parameter: {0}")]
    InvalidParameter(String),
}

pub type Result<T> = std::result::Result<T, DistanceError>;
