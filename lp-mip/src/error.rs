//! Error types for the MIP drivers.

use lp_core::LpError;
use thiserror::Error;

/// Errors that make a MIP solve meaningless.
///
/// Infeasible or unbounded relaxations are not errors; they are reported
/// through [`crate::MipStatus`] and the node trace.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum MipError {
    /// Problem validation failed
    #[error("Invalid problem: {0}")]
    InvalidProblem(String),

    /// No variable is integer-restricted
    #[error("No integer variables given; solve the LP relaxation directly instead")]
    NoIntegerVariables,

    /// Underlying LP data is malformed
    #[error("LP error: {0}")]
    Lp(#[from] LpError),
}

/// Result type for MIP operations.
pub type MipResult<T> = Result<T, MipError>;
