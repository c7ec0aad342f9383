//! Error types for problem construction.

use thiserror::Error;

/// Errors raised when a problem is malformed.
///
/// Numerical outcomes of a solve (infeasible, unbounded, iteration cap) are
/// never errors; they are reported through [`crate::SolveStatus`].
#[derive(Error, Debug, Clone, PartialEq)]
pub enum LpError {
    /// Dimensions of c, A and b disagree.
    #[error("Dimension mismatch: {0}")]
    DimensionMismatch(String),

    /// A coefficient is NaN or infinite.
    #[error("Non-finite coefficient in {what} at index {index}")]
    NonFinite {
        /// Which array holds the bad value ("c", "A", "b").
        what: &'static str,
        /// Flat index of the offending value.
        index: usize,
    },
}

/// Result type for problem construction.
pub type LpResult<T> = Result<T, LpError>;
