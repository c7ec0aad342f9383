//! MIP solution types.

use std::fmt;

/// Status of the MIP solve.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub enum MipStatus {
    /// Search finished with an incumbent.
    Optimal,

    /// Search finished without any integer-feasible point.
    Infeasible,

    /// Some relaxation was unbounded.
    Unbounded,

    /// Node limit reached, best solution returned.
    NodeLimit,
}

impl MipStatus {
    /// Returns true if a feasible solution was found.
    pub fn has_solution(&self) -> bool {
        matches!(self, MipStatus::Optimal | MipStatus::NodeLimit)
    }
}

impl fmt::Display for MipStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            MipStatus::Optimal => "Optimal",
            MipStatus::Infeasible => "Infeasible",
            MipStatus::Unbounded => "Unbounded",
            MipStatus::NodeLimit => "NodeLimit",
        };
        f.write_str(s)
    }
}

/// Complete MIP solution with diagnostics.
#[derive(Debug, Clone)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct MipSolution {
    /// Solve status.
    pub status: MipStatus,

    /// Best integer solution (empty if none was found).
    pub x: Vec<f64>,

    /// Objective value of best solution; +inf when none was found.
    pub obj_val: f64,

    /// Number of nodes popped from the stack.
    pub nodes_explored: u64,

    /// Number of cuts appended to node relaxations.
    pub cuts_added: u64,

    /// Number of times incumbent was updated.
    pub incumbent_updates: u64,

    /// Nodes whose relaxation stopped at the iteration cap.
    pub degraded_nodes: u64,

    /// Total solve time in milliseconds.
    pub solve_time_ms: u64,
}

impl Default for MipSolution {
    fn default() -> Self {
        Self {
            status: MipStatus::Infeasible,
            x: Vec::new(),
            obj_val: f64::INFINITY,
            nodes_explored: 0,
            cuts_added: 0,
            incumbent_updates: 0,
            degraded_nodes: 0,
            solve_time_ms: 0,
        }
    }
}

/// Tracks the best known feasible solution (incumbent).
#[derive(Debug, Clone)]
pub struct IncumbentTracker {
    /// Current best solution (if any).
    pub solution: Option<Vec<f64>>,

    /// Objective value of incumbent (primal bound).
    /// Initialized to +inf for minimization.
    pub obj_val: f64,

    /// Number of times incumbent was updated.
    pub update_count: u64,
}

impl Default for IncumbentTracker {
    fn default() -> Self {
        Self::new()
    }
}

impl IncumbentTracker {
    /// Create a new incumbent tracker.
    pub fn new() -> Self {
        Self {
            solution: None,
            obj_val: f64::INFINITY,
            update_count: 0,
        }
    }

    /// Check if we have an incumbent.
    pub fn has_incumbent(&self) -> bool {
        self.solution.is_some()
    }

    /// A relaxation objective that cannot beat the incumbent.
    ///
    /// Ties are dominated.
    pub fn dominates(&self, obj: f64) -> bool {
        obj >= self.obj_val
    }

    /// Try to update incumbent with a new solution.
    ///
    /// Returns true if the incumbent was improved.
    pub fn update(&mut self, x: &[f64], obj: f64) -> bool {
        if obj < self.obj_val {
            self.solution = Some(x.to_vec());
            self.obj_val = obj;
            self.update_count += 1;
            true
        } else {
            false
        }
    }
}
