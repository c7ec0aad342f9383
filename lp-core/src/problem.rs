//! Problem data structures and validation.
//!
//! This module defines the canonical linear program the engine accepts and
//! the result types it reports.

use std::fmt;

use crate::error::{LpError, LpResult};

/// Linear program in canonical form.
///
/// ```text
/// minimize    c^T x
/// subject to  A x <= b
///             x >= 0
/// ```
///
/// Equality and `>=` rows must be linearized by the caller (an equality
/// becomes two `<=` rows, a `>=` row is negated). Maximization is handled by
/// negating `c` before the solve and the objective after it.
///
/// # Dimensions
///
/// - `n`: number of decision variables (length of c)
/// - `m`: number of constraints (length of b, number of rows in A)
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[allow(non_snake_case)] // A is standard mathematical notation
pub struct ProblemData {
    /// Linear cost vector c (length n)
    pub c: Vec<f64>,

    /// Dense constraint matrix A (m rows of length n)
    pub A: Vec<Vec<f64>>,

    /// Constraint right-hand side b (length m)
    pub b: Vec<f64>,
}

impl ProblemData {
    /// Create a validated problem.
    #[allow(non_snake_case)]
    pub fn new(c: Vec<f64>, A: Vec<Vec<f64>>, b: Vec<f64>) -> LpResult<Self> {
        let prob = Self { c, A, b };
        prob.validate()?;
        Ok(prob)
    }

    /// Get the number of decision variables (n)
    pub fn num_vars(&self) -> usize {
        self.c.len()
    }

    /// Get the number of constraints (m)
    pub fn num_constraints(&self) -> usize {
        self.b.len()
    }

    /// Validate dimensions and finiteness.
    pub fn validate(&self) -> LpResult<()> {
        let n = self.num_vars();
        let m = self.num_constraints();

        if self.A.len() != m {
            return Err(LpError::DimensionMismatch(format!(
                "A has {} rows, b has length {}",
                self.A.len(),
                m
            )));
        }

        for (i, row) in self.A.iter().enumerate() {
            if row.len() != n {
                return Err(LpError::DimensionMismatch(format!(
                    "row {} of A has {} cols, c has length {}",
                    i,
                    row.len(),
                    n
                )));
            }
        }

        if let Some(index) = self.c.iter().position(|v| !v.is_finite()) {
            return Err(LpError::NonFinite { what: "c", index });
        }
        if let Some(index) = self.b.iter().position(|v| !v.is_finite()) {
            return Err(LpError::NonFinite { what: "b", index });
        }
        if let Some(index) = self.A.iter().flatten().position(|v| !v.is_finite()) {
            return Err(LpError::NonFinite { what: "A", index });
        }

        Ok(())
    }

    /// Return a copy with one extra `row . x <= rhs` constraint appended.
    pub fn with_row(&self, row: Vec<f64>, rhs: f64) -> Self {
        let mut prob = self.clone();
        prob.A.push(row);
        prob.b.push(rhs);
        prob
    }

    /// Objective value c^T x.
    pub fn objective(&self, x: &[f64]) -> f64 {
        self.c.iter().zip(x).map(|(ci, xi)| ci * xi).sum()
    }

    /// Largest violation of `A x <= b` and `x >= 0` (zero when feasible).
    pub fn max_violation(&self, x: &[f64]) -> f64 {
        let row_viol = self
            .A
            .iter()
            .zip(&self.b)
            .map(|(row, &bi)| {
                let lhs: f64 = row.iter().zip(x).map(|(a, xi)| a * xi).sum();
                (lhs - bi).max(0.0)
            })
            .fold(0.0, f64::max);

        let sign_viol = x.iter().map(|&xi| (-xi).max(0.0)).fold(0.0, f64::max);

        row_viol.max(sign_viol)
    }

    /// Check whether x satisfies every constraint within `tol`.
    pub fn is_feasible(&self, x: &[f64], tol: f64) -> bool {
        x.len() == self.num_vars() && self.max_violation(x) <= tol
    }
}

/// Simplex engine settings.
#[derive(Debug, Clone)]
pub struct SolverSettings {
    /// Maximum number of pivots per phase
    pub max_iter: usize,

    /// Enable verbose logging
    pub verbose: bool,
}

impl Default for SolverSettings {
    fn default() -> Self {
        Self {
            max_iter: 1000,
            verbose: false,
        }
    }
}

impl SolverSettings {
    /// Set the per-phase iteration cap.
    pub fn with_max_iter(mut self, max_iter: usize) -> Self {
        self.max_iter = max_iter;
        self
    }
}

/// Solution status.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum SolveStatus {
    /// Optimal solution found
    Optimal,

    /// No point satisfies the constraints
    Infeasible,

    /// Objective decreases without limit
    Unbounded,

    /// A phase hit its iteration cap; the last tableau state is reported
    MaxIterationsExceeded,

    /// Dual phase entered without dual feasibility. Internal phase signal,
    /// never the final status of [`crate::DualSimplexSolver::solve`].
    NotDualFeasible,
}

impl SolveStatus {
    /// Returns true if the relaxation proves the node empty.
    pub fn is_infeasible(&self) -> bool {
        matches!(self, SolveStatus::Infeasible | SolveStatus::NotDualFeasible)
    }

    /// Returns true if the extracted point is meaningful.
    pub fn has_solution(&self) -> bool {
        matches!(
            self,
            SolveStatus::Optimal | SolveStatus::MaxIterationsExceeded
        )
    }
}

impl fmt::Display for SolveStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SolveStatus::Optimal => write!(f, "Optimal"),
            SolveStatus::Infeasible => write!(f, "Infeasible"),
            SolveStatus::Unbounded => write!(f, "Unbounded"),
            SolveStatus::MaxIterationsExceeded => write!(f, "MaxIterations"),
            SolveStatus::NotDualFeasible => write!(f, "NotDualFeasible"),
        }
    }
}

/// Solve result with solution and diagnostics.
#[derive(Debug, Clone)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct SolveResult {
    /// Solution status
    pub status: SolveStatus,

    /// Decision variables x (length n); zero unless the status has a solution
    pub x: Vec<f64>,

    /// Slack values s = b - A x (length m)
    pub s: Vec<f64>,

    /// Reduced costs of the slack columns (length m), the row duals
    pub z: Vec<f64>,

    /// Objective value (negated bottom-right tableau cell)
    pub obj_val: f64,

    /// Iteration counts
    pub info: SolveInfo,
}

/// Pivot counts of a solve.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct SolveInfo {
    /// Total pivots across both phases
    pub iters: usize,

    /// Pivots performed to reach dual feasibility
    pub primal_iters: usize,

    /// Pivots performed by the dual simplex phase
    pub dual_iters: usize,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validate_dimensions() {
        assert!(ProblemData::new(vec![1.0, 1.0], vec![vec![1.0, 1.0]], vec![10.0]).is_ok());

        let err = ProblemData::new(vec![1.0, 1.0], vec![vec![1.0]], vec![10.0]).unwrap_err();
        assert!(matches!(err, LpError::DimensionMismatch(_)));

        let err = ProblemData::new(vec![1.0], vec![vec![1.0], vec![2.0]], vec![1.0]).unwrap_err();
        assert!(matches!(err, LpError::DimensionMismatch(_)));
    }

    #[test]
    fn test_validate_finite() {
        let err = ProblemData::new(vec![1.0, f64::NAN], vec![], vec![]).unwrap_err();
        assert_eq!(err, LpError::NonFinite { what: "c", index: 1 });

        let err = ProblemData::new(vec![1.0], vec![vec![f64::INFINITY]], vec![1.0]).unwrap_err();
        assert_eq!(err, LpError::NonFinite { what: "A", index: 0 });
    }

    #[test]
    fn test_feasibility_check() {
        let prob = ProblemData::new(vec![1.0, 1.0], vec![vec![1.0, 1.0]], vec![10.0]).unwrap();

        assert!(prob.is_feasible(&[4.0, 6.0], 1e-9));
        assert!(!prob.is_feasible(&[5.0, 6.0], 1e-9));
        assert!(!prob.is_feasible(&[-1.0, 0.0], 1e-9));
        assert!((prob.max_violation(&[5.0, 6.0]) - 1.0).abs() < 1e-12);
        assert_eq!(prob.objective(&[2.0, 3.0]), 5.0);
    }

    #[test]
    fn test_with_row_leaves_original() {
        let prob = ProblemData::new(vec![1.0], vec![vec![1.0]], vec![3.0]).unwrap();
        let extended = prob.with_row(vec![-1.0], -1.0);

        assert_eq!(prob.num_constraints(), 1);
        assert_eq!(extended.num_constraints(), 2);
        assert_eq!(extended.b, vec![3.0, -1.0]);
    }
}
