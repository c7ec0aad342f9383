//! Dense-tableau dual simplex engine.
//!
//! Solves linear programs in the canonical form
//!
//! ```text
//! minimize    c^T x
//! subject to  A x <= b
//!             x >= 0
//! ```
//!
//! with a two-phase method: primal simplex pivots restore dual feasibility
//! when some cost is negative, then dual simplex pivots restore primal
//! feasibility. The final tableau can produce Gomory fractional cuts, which
//! the branch-and-cut driver in `lp-mip` builds on.
//!
//! # Example
//!
//! ```
//! use lp_core::{solve, ProblemData, SolveStatus, SolverSettings};
//!
//! // min -x0 - x1  s.t.  x0 + x1 <= 10
//! let prob = ProblemData::new(vec![-1.0, -1.0], vec![vec![1.0, 1.0]], vec![10.0]).unwrap();
//! let result = solve(&prob, &SolverSettings::default());
//!
//! assert_eq!(result.status, SolveStatus::Optimal);
//! assert!((result.obj_val + 10.0).abs() < 1e-9);
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod error;
pub mod problem;
pub mod simplex;
pub mod tolerance;

// Re-export main types
pub use error::{LpError, LpResult};
pub use problem::{ProblemData, SolveInfo, SolveResult, SolveStatus, SolverSettings};
pub use simplex::{DualSimplexSolver, LinearCut, Tableau};

/// Main solve entry point.
pub fn solve(problem: &ProblemData, settings: &SolverSettings) -> SolveResult {
    DualSimplexSolver::new(problem, settings.clone()).solve()
}
