//! Gomory fractional cuts.
//!
//! For a tableau row whose basic variable should be integral,
//!
//! ```text
//! x_B + sum_j a_j x_j = beta,      f = frac(beta) in (0, 1)
//! ```
//!
//! every integer point satisfies `sum_j frac(a_j) x_j >= f`. Slack columns
//! are substituted by their definition `s_k = b_k - A_k x`, so the cut is
//! returned over the decision variables only, as `coefs . x <= rhs`.

use super::tableau::Tableau;
use crate::tolerance::{frac, INTEGRALITY_TOL, RATIO_TOL};

/// A linear cut: coefs^T x <= rhs.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct LinearCut {
    /// Coefficient vector (dense, length n).
    pub coefs: Vec<f64>,

    /// Right-hand side.
    pub rhs: f64,

    /// Tableau row the cut was derived from.
    pub source_row: usize,

    /// Fractional part of the source row's right-hand side.
    pub fraction: f64,
}

impl LinearCut {
    /// Compute violation: coefs^T x - rhs (positive means violated).
    pub fn violation(&self, x: &[f64]) -> f64 {
        let lhs: f64 = self.coefs.iter().zip(x).map(|(a, xi)| a * xi).sum();
        lhs - self.rhs
    }

    /// All coefficients and the right-hand side are finite.
    pub fn is_finite(&self) -> bool {
        self.rhs.is_finite() && self.coefs.iter().all(|c| c.is_finite())
    }
}

/// Row with the largest fractional right-hand side among rows whose basic
/// variable is integer-restricted. First row wins ties.
fn select_source_row(tableau: &Tableau, integer_vars: &[usize]) -> Option<(usize, f64)> {
    let mut best: Option<(usize, f64)> = None;

    for i in 0..tableau.num_rows() {
        if !integer_vars.contains(&tableau.basic_var(i)) {
            continue;
        }

        let f = frac(tableau.rhs(i));
        if f <= INTEGRALITY_TOL || f >= 1.0 - INTEGRALITY_TOL {
            continue;
        }

        if best.map_or(true, |(_, best_f)| f > best_f) {
            best = Some((i, f));
        }
    }

    best
}

/// Derive a Gomory cut from `tableau`.
///
/// `a`/`b` is the constraint system behind the tableau's slack columns.
/// Returns `None` when no integer-restricted basic variable is fractional,
/// or when `a`/`b` is missing a row the source row's slacks refer to.
pub(crate) fn gomory_cut(
    tableau: &Tableau,
    integer_vars: &[usize],
    a: &[Vec<f64>],
    b: &[f64],
) -> Option<LinearCut> {
    let (row, f) = select_source_row(tableau, integer_vars)?;
    let n = tableau.num_vars();

    let mut coefs = vec![0.0; n];
    let mut rhs = -f;

    for j in 0..tableau.num_var_cols() {
        let f_j = frac(tableau.get(row, j));
        if f_j < RATIO_TOL {
            continue;
        }

        if j < n {
            coefs[j] -= f_j;
        } else {
            // Slack k stands for b[k] - a[k]·x; without that row the cut
            // cannot be stated over x.
            let k = j - n;
            let Some((a_k, &b_k)) = a.get(k).zip(b.get(k)) else {
                log::warn!(
                    "Gomory cut needs constraint row {} but only {} rows / {} rhs entries given",
                    k,
                    a.len(),
                    b.len()
                );
                return None;
            };
            rhs += f_j * b_k;
            for (coef, &a_kv) in coefs.iter_mut().zip(a_k) {
                *coef += f_j * a_kv;
            }
        }
    }

    log::debug!(
        "Gomory cut from row {} (basic x{}, f={:.4}): rhs={:.4}",
        row,
        tableau.basic_var(row),
        f,
        rhs
    );

    Some(LinearCut {
        coefs,
        rhs,
        source_row: row,
        fraction: f,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{DualSimplexSolver, ProblemData, SolveStatus, SolverSettings};

    /// max x1  s.t.  3x0 + 2x1 <= 6,  -3x0 + 2x1 <= 0
    ///
    /// LP optimum is (1, 1.5); the first Gomory cut is x1 <= 1.
    fn triangle() -> ProblemData {
        ProblemData::new(
            vec![0.0, -1.0],
            vec![vec![3.0, 2.0], vec![-3.0, 2.0]],
            vec![6.0, 0.0],
        )
        .unwrap()
    }

    #[test]
    fn test_cut_expands_slacks() {
        let prob = triangle();
        let mut solver = DualSimplexSolver::new(&prob, SolverSettings::default());
        let res = solver.solve();

        assert_eq!(res.status, SolveStatus::Optimal);
        assert!((res.x[0] - 1.0).abs() < 1e-9);
        assert!((res.x[1] - 1.5).abs() < 1e-9);

        let cut = solver
            .generate_gomory_cut(&[0, 1], &prob.A, &prob.b)
            .expect("x1 is fractional");

        assert!((cut.fraction - 0.5).abs() < 1e-9);
        assert!(cut.coefs[0].abs() < 1e-9);
        assert!((cut.coefs[1] - 1.0).abs() < 1e-9);
        assert!((cut.rhs - 1.0).abs() < 1e-9);

        // Current vertex is cut off, integer points are kept
        assert!(cut.violation(&res.x) > 0.4);
        assert!(cut.violation(&[1.0, 1.0]) <= 1e-9);
        assert!(cut.violation(&[0.0, 0.0]) <= 1e-9);
    }

    #[test]
    fn test_no_cut_for_integral_basis() {
        let prob = ProblemData::new(vec![-1.0, -1.0], vec![vec![1.0, 1.0]], vec![10.0]).unwrap();
        let mut solver = DualSimplexSolver::new(&prob, SolverSettings::default());
        solver.solve();

        assert!(solver.generate_gomory_cut(&[0, 1], &prob.A, &prob.b).is_none());
    }

    #[test]
    fn test_no_cut_for_continuous_rows() {
        let prob = triangle();
        let mut solver = DualSimplexSolver::new(&prob, SolverSettings::default());
        solver.solve();

        // Only x0 is integer-restricted and it is already integral
        assert!(solver.generate_gomory_cut(&[0], &prob.A, &prob.b).is_none());
    }

    #[test]
    fn test_short_constraint_system_gives_no_cut() {
        let prob = triangle();
        let mut solver = DualSimplexSolver::new(&prob, SolverSettings::default());
        solver.solve();

        // The x1 row carries both slacks, so both rows are needed
        assert!(solver.generate_gomory_cut(&[0, 1], &prob.A, &prob.b[..1]).is_none());
        assert!(solver.generate_gomory_cut(&[0, 1], &prob.A[..1], &prob.b).is_none());
        assert!(solver.generate_gomory_cut(&[0, 1], &prob.A, &prob.b).is_some());
    }

    #[test]
    fn test_violation_sign() {
        let cut = LinearCut {
            coefs: vec![1.0, 1.0],
            rhs: 2.0,
            source_row: 0,
            fraction: 0.5,
        };
        assert!(cut.violation(&[1.5, 1.0]) > 0.0);
        assert!(cut.violation(&[1.0, 0.5]) < 0.0);
        assert!(cut.is_finite());
    }
}
