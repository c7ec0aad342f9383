//! Dense simplex tableau.
//!
//! Layout for a problem with `n` decision variables and `m` constraints:
//!
//! ```text
//!            x (n cols)   s (m cols)   rhs
//! row 0..m [     A     |     I      |  b  ]
//! row m    [     c     |     0      |  0  ]   reduced costs / -Z
//! ```
//!
//! The objective row encodes `Z - c^T x = 0`, so the bottom-right cell holds
//! `-Z` for the current basis.

use nalgebra::DMatrix;

use crate::problem::{ProblemData, SolveInfo, SolveResult, SolveStatus};
use crate::tolerance::{PIVOT_TOL, RATIO_TOL};

/// Dense tableau with its basis bookkeeping.
#[derive(Debug, Clone)]
pub struct Tableau {
    /// (m+1) x (n+m+1) matrix
    t: DMatrix<f64>,

    /// basic_vars[i] is the column basic in row i
    basic_vars: Vec<usize>,

    /// Number of decision variables
    n: usize,

    /// Number of constraint rows
    m: usize,
}

impl Tableau {
    /// Build the initial tableau with the slack basis.
    pub fn new(prob: &ProblemData) -> Self {
        let n = prob.num_vars();
        let m = prob.num_constraints();
        let rhs = n + m;

        let mut t = DMatrix::zeros(m + 1, n + m + 1);

        for (i, row) in prob.A.iter().enumerate() {
            for (j, &a) in row.iter().enumerate() {
                t[(i, j)] = a;
            }
            t[(i, n + i)] = 1.0;
            t[(i, rhs)] = prob.b[i];
        }

        for (j, &cj) in prob.c.iter().enumerate() {
            t[(m, j)] = cj;
        }

        Self {
            t,
            basic_vars: (n..n + m).collect(),
            n,
            m,
        }
    }

    /// Number of decision variables.
    pub fn num_vars(&self) -> usize {
        self.n
    }

    /// Number of constraint rows (excluding the objective row).
    pub fn num_rows(&self) -> usize {
        self.m
    }

    /// Number of variable columns (decision + slack, excluding rhs).
    pub fn num_var_cols(&self) -> usize {
        self.n + self.m
    }

    fn rhs_col(&self) -> usize {
        self.n + self.m
    }

    /// Entry of a constraint or objective row.
    #[inline]
    pub fn get(&self, row: usize, col: usize) -> f64 {
        self.t[(row, col)]
    }

    /// Right-hand side of constraint row `row`.
    #[inline]
    pub fn rhs(&self, row: usize) -> f64 {
        self.t[(row, self.rhs_col())]
    }

    /// Reduced cost of column `col`.
    #[inline]
    pub fn reduced_cost(&self, col: usize) -> f64 {
        self.t[(self.m, col)]
    }

    /// Column basic in `row`.
    #[inline]
    pub fn basic_var(&self, row: usize) -> usize {
        self.basic_vars[row]
    }

    /// All basic columns by row.
    pub fn basic_vars(&self) -> &[usize] {
        &self.basic_vars
    }

    /// Objective value of the current basis.
    pub fn objective_value(&self) -> f64 {
        -self.t[(self.m, self.rhs_col())]
    }

    /// All reduced costs are nonnegative (within tolerance).
    pub fn is_dual_feasible(&self) -> bool {
        (0..self.num_var_cols()).all(|j| self.reduced_cost(j) >= -PIVOT_TOL)
    }

    /// Primal entering column: most negative reduced cost, first index on ties.
    pub fn primal_entering(&self) -> Option<usize> {
        let mut min_val = -RATIO_TOL;
        let mut pivot_col = None;

        for j in 0..self.num_var_cols() {
            let cj = self.reduced_cost(j);
            if cj < min_val {
                min_val = cj;
                pivot_col = Some(j);
            }
        }
        pivot_col
    }

    /// Primal leaving row: minimum ratio rhs / a over strictly positive a,
    /// first row on ties.
    pub fn primal_leaving(&self, col: usize) -> Option<usize> {
        let mut min_ratio = f64::INFINITY;
        let mut pivot_row = None;

        for i in 0..self.m {
            let a = self.t[(i, col)];
            if a > RATIO_TOL {
                let ratio = self.rhs(i) / a;
                if ratio < min_ratio {
                    min_ratio = ratio;
                    pivot_row = Some(i);
                }
            }
        }
        pivot_row
    }

    /// Dual leaving row: most negative right-hand side.
    pub fn dual_leaving(&self) -> Option<usize> {
        let mut min_val = -PIVOT_TOL;
        let mut pivot_row = None;

        for i in 0..self.m {
            let r = self.rhs(i);
            if r < min_val {
                min_val = r;
                pivot_row = Some(i);
            }
        }
        pivot_row
    }

    /// Dual entering column: among negative entries of `row`, minimize
    /// |reduced cost / entry|.
    pub fn dual_entering(&self, row: usize) -> Option<usize> {
        let mut min_ratio = f64::INFINITY;
        let mut pivot_col = None;

        for j in 0..self.num_var_cols() {
            let a = self.t[(row, j)];
            if a < -PIVOT_TOL {
                let ratio = (self.reduced_cost(j) / a).abs();
                if ratio < min_ratio {
                    min_ratio = ratio;
                    pivot_col = Some(j);
                }
            }
        }
        pivot_col
    }

    /// Gauss-Jordan pivot on (row, col).
    pub fn pivot(&mut self, row: usize, col: usize) {
        let ncols = self.t.ncols();
        let pivot = self.t[(row, col)];

        log::trace!(
            "pivot row={} col={} leaving={} element={:.3e}",
            row,
            col,
            self.basic_vars[row],
            pivot
        );

        self.basic_vars[row] = col;

        for j in 0..ncols {
            self.t[(row, j)] /= pivot;
        }

        for i in 0..=self.m {
            if i == row {
                continue;
            }
            let factor = self.t[(i, col)];
            if factor.abs() > PIVOT_TOL {
                for j in 0..ncols {
                    let v = self.t[(row, j)];
                    self.t[(i, j)] -= factor * v;
                }
            }
        }
    }

    /// Read the current basis into a result.
    ///
    /// Decision values are only filled in when the status carries a
    /// meaningful point; the objective is always read from the tableau.
    pub fn extract(&self, status: SolveStatus, info: SolveInfo) -> SolveResult {
        let mut x = vec![0.0; self.n];
        let mut s = vec![0.0; self.m];

        if status.has_solution() {
            for (i, &var) in self.basic_vars.iter().enumerate() {
                if var < self.n {
                    x[var] = self.rhs(i);
                } else {
                    s[var - self.n] = self.rhs(i);
                }
            }
        }

        let z = (0..self.m).map(|k| self.reduced_cost(self.n + k)).collect();

        SolveResult {
            status,
            x,
            s,
            z,
            obj_val: self.objective_value(),
            info,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn small() -> ProblemData {
        // min -x0 - 2x1  s.t.  x0 + x1 <= 4,  x1 <= 3
        ProblemData::new(
            vec![-1.0, -2.0],
            vec![vec![1.0, 1.0], vec![0.0, 1.0]],
            vec![4.0, 3.0],
        )
        .unwrap()
    }

    #[test]
    fn test_initial_layout() {
        let tab = Tableau::new(&small());

        assert_eq!(tab.num_vars(), 2);
        assert_eq!(tab.num_rows(), 2);
        assert_eq!(tab.basic_vars(), &[2, 3]);

        // Slack identity and rhs
        assert_eq!(tab.get(0, 2), 1.0);
        assert_eq!(tab.get(1, 3), 1.0);
        assert_eq!(tab.get(0, 3), 0.0);
        assert_eq!(tab.rhs(0), 4.0);
        assert_eq!(tab.rhs(1), 3.0);

        // Objective row holds c, zero elsewhere
        assert_eq!(tab.reduced_cost(0), -1.0);
        assert_eq!(tab.reduced_cost(1), -2.0);
        assert_eq!(tab.reduced_cost(2), 0.0);
        assert_eq!(tab.objective_value(), 0.0);
        assert!(!tab.is_dual_feasible());
    }

    #[test]
    fn test_primal_selection() {
        let tab = Tableau::new(&small());

        // Most negative reduced cost is x1
        assert_eq!(tab.primal_entering(), Some(1));
        // Ratios: 4/1 and 3/1
        assert_eq!(tab.primal_leaving(1), Some(1));
    }

    #[test]
    fn test_pivot_keeps_unit_columns() {
        let mut tab = Tableau::new(&small());
        tab.pivot(1, 1);

        assert_eq!(tab.basic_var(1), 1);
        for (row, &col) in tab.basic_vars().iter().enumerate() {
            for i in 0..=tab.num_rows() {
                let expected = if i == row { 1.0 } else { 0.0 };
                assert!((tab.get(i, col) - expected).abs() < 1e-12);
            }
        }

        // x1 = 3, objective -6
        assert!((tab.rhs(1) - 3.0).abs() < 1e-12);
        assert!((tab.objective_value() + 6.0).abs() < 1e-12);
    }

    #[test]
    fn test_dual_selection() {
        // x0 >= 2 written as -x0 <= -2, with c >= 0
        let prob = ProblemData::new(vec![1.0], vec![vec![-1.0]], vec![-2.0]).unwrap();
        let tab = Tableau::new(&prob);

        assert!(tab.is_dual_feasible());
        assert_eq!(tab.dual_leaving(), Some(0));
        assert_eq!(tab.dual_entering(0), Some(0));
    }

    #[test]
    fn test_extract_zero_fills_without_solution() {
        let tab = Tableau::new(&small());
        let res = tab.extract(SolveStatus::Unbounded, SolveInfo::default());

        assert_eq!(res.x, vec![0.0, 0.0]);
        assert_eq!(res.s, vec![0.0, 0.0]);
        assert_eq!(res.z.len(), 2);
    }
}
