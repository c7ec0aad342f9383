//! Mixed-integer programming layer over the `lp-core` dual simplex.
//!
//! Two depth-first drivers solve
//!
//! ```text
//! minimize    c^T x
//! subject to  A x <= b
//!             x >= 0,  x_j integer for j in J
//! ```
//!
//! by repeated LP relaxation:
//!
//! - [`BranchAndBoundSolver`] layers branching bounds onto the base problem.
//! - [`BranchAndCutSolver`] additionally strengthens each node with Gomory
//!   fractional cuts before branching.
//!
//! Both record a trace of every visited node (see [`trace`]).
//!
//! # Example
//!
//! ```
//! use lp_core::ProblemData;
//! use lp_mip::{solve_branch_and_bound, MipSettings, MipStatus};
//!
//! // max 5x0 + 4x1  s.t.  6x0 + 4x1 <= 24,  x0 + 2x1 <= 6
//! let lp = ProblemData::new(
//!     vec![-5.0, -4.0],
//!     vec![vec![6.0, 4.0], vec![1.0, 2.0]],
//!     vec![24.0, 6.0],
//! )
//! .unwrap();
//!
//! let (sol, history) = solve_branch_and_bound(&lp, &[0, 1], &MipSettings::default()).unwrap();
//! assert_eq!(sol.status, MipStatus::Optimal);
//! assert!((sol.obj_val + 20.0).abs() < 1e-6);
//! assert_eq!(history[0].id, 1);
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod bnb;
pub mod bnc;
pub mod error;
pub mod model;
pub mod search;
pub mod settings;
pub mod trace;

pub use bnb::BranchAndBoundSolver;
pub use bnc::BranchAndCutSolver;
pub use error::{MipError, MipResult};
pub use model::{IncumbentTracker, MipProblem, MipSolution, MipStatus};
pub use search::NodeStatus;
pub use settings::{BranchingRule, MipSettings};
pub use trace::{BcHistory, BcNodeRecord, CutRecord, CutStatus, CutType, NodeRecord};

use lp_core::ProblemData;

/// Solve a MILP with branch-and-bound.
///
/// Returns the solution and the node trace sorted by id.
pub fn solve_branch_and_bound(
    problem: &ProblemData,
    integer_vars: &[usize],
    settings: &MipSettings,
) -> MipResult<(MipSolution, Vec<NodeRecord>)> {
    let mip = MipProblem::new(problem.clone(), integer_vars.to_vec())?;
    let mut solver = BranchAndBoundSolver::new(mip, settings.clone());
    let solution = solver.solve();
    Ok((solution, solver.history()))
}

/// Solve a MILP with branch-and-cut.
///
/// Returns the solution and the node and cut trace.
pub fn solve_branch_and_cut(
    problem: &ProblemData,
    integer_vars: &[usize],
    settings: &MipSettings,
) -> MipResult<(MipSolution, BcHistory)> {
    let mip = MipProblem::new(problem.clone(), integer_vars.to_vec())?;
    let mut solver = BranchAndCutSolver::new(mip, settings.clone());
    let solution = solver.solve();
    Ok((solution, solver.history()))
}
