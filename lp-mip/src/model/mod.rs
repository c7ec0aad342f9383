//! MILP problem wrapper, search result, and incumbent.

mod problem;
mod solution;

pub use problem::MipProblem;
pub use solution::{IncumbentTracker, MipSolution, MipStatus};
