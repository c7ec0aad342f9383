//! MIP problem representation.

use lp_core::tolerance::fractionality;
use lp_core::ProblemData;

use crate::error::{MipError, MipResult};

/// Mixed-integer problem wrapper.
///
/// Pairs a canonical LP with the set of integer-restricted variables.
#[derive(Debug, Clone)]
pub struct MipProblem {
    /// Base LP; never mutated by the drivers.
    pub lp: ProblemData,

    /// Indices of integer variables, sorted, deduplicated, and in range.
    integer_vars: Vec<usize>,
}

impl MipProblem {
    /// Create a MipProblem from an LP and the integer-restricted indices.
    ///
    /// An empty index list is rejected: without integer variables the
    /// tree search degenerates to a single LP solve.
    pub fn new(lp: ProblemData, mut integer_vars: Vec<usize>) -> MipResult<Self> {
        lp.validate()?;

        if integer_vars.is_empty() {
            return Err(MipError::NoIntegerVariables);
        }

        let n = lp.num_vars();
        if let Some(&bad) = integer_vars.iter().find(|&&i| i >= n) {
            return Err(MipError::InvalidProblem(format!(
                "Integer variable {} but only {} variables",
                bad, n
            )));
        }

        integer_vars.sort_unstable();
        integer_vars.dedup();

        Ok(Self { lp, integer_vars })
    }

    /// Number of variables.
    pub fn num_vars(&self) -> usize {
        self.lp.num_vars()
    }

    /// Number of constraints in the base LP.
    pub fn num_constraints(&self) -> usize {
        self.lp.num_constraints()
    }

    /// Number of integer variables.
    pub fn num_integers(&self) -> usize {
        self.integer_vars.len()
    }

    /// Integer-restricted variable indices, sorted ascending.
    pub fn integer_vars(&self) -> &[usize] {
        &self.integer_vars
    }

    /// Get fractional integer variables and their values, in index order.
    ///
    /// Returns (var_index, current_value, fractionality) for each fractional variable.
    pub fn get_fractional_vars(&self, x: &[f64], tol: f64) -> Vec<(usize, f64, f64)> {
        self.integer_vars
            .iter()
            .filter_map(|&i| {
                let val = x[i];
                let frac = fractionality(val);
                (frac > tol).then_some((i, val, frac))
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn simple_lp() -> ProblemData {
        // min x0 + x1  s.t.  x0 + x1 <= 10
        ProblemData::new(vec![1.0, 1.0], vec![vec![1.0, 1.0]], vec![10.0]).unwrap()
    }

    #[test]
    fn test_mip_problem_creation() {
        let mip = MipProblem::new(simple_lp(), vec![1, 0, 1]).unwrap();

        assert_eq!(mip.num_vars(), 2);
        assert_eq!(mip.num_constraints(), 1);
        assert_eq!(mip.num_integers(), 2);
        assert_eq!(mip.integer_vars(), &[0, 1]);
    }

    #[test]
    fn test_rejects_meaningless_input() {
        assert_eq!(
            MipProblem::new(simple_lp(), vec![]).unwrap_err(),
            MipError::NoIntegerVariables
        );
        assert!(matches!(
            MipProblem::new(simple_lp(), vec![2]).unwrap_err(),
            MipError::InvalidProblem(_)
        ));

        let bad = ProblemData {
            c: vec![1.0],
            A: vec![vec![1.0, 2.0]],
            b: vec![1.0],
        };
        assert!(matches!(
            MipProblem::new(bad, vec![0]).unwrap_err(),
            MipError::Lp(_)
        ));
    }

    #[test]
    fn test_continuous_vars_never_fractional() {
        let mip = MipProblem::new(simple_lp(), vec![0]).unwrap();

        // x1 is continuous
        assert!(mip.get_fractional_vars(&[1.0, 0.5], 1e-5).is_empty());
        assert_eq!(mip.get_fractional_vars(&[0.5, 0.5], 1e-5).len(), 1);

        // Within tolerance of an integer
        assert!(mip.get_fractional_vars(&[0.999999, 0.5], 1e-5).is_empty());
    }

    #[test]
    fn test_integer_vars_stay_checked() {
        let mip = MipProblem::new(simple_lp(), vec![1, 1, 0]).unwrap();
        let mut indices = mip.integer_vars().to_vec();
        indices.push(7);

        // Mutating a copy leaves the problem intact
        assert_eq!(mip.integer_vars(), &[0, 1]);
        assert_eq!(mip.get_fractional_vars(&[0.5, 1.5], 1e-5).len(), 2);

        // Out-of-range indices only get in through the checked constructor
        assert!(matches!(
            MipProblem::new(simple_lp(), indices).unwrap_err(),
            MipError::InvalidProblem(_)
        ));
    }

    #[test]
    fn test_fractional_vars_in_index_order() {
        let mip = MipProblem::new(simple_lp(), vec![1, 0]).unwrap();
        let frac = mip.get_fractional_vars(&[2.7, 0.5], 1e-5);

        assert_eq!(frac.len(), 2);
        assert_eq!(frac[0].0, 0);
        assert_eq!(frac[1].0, 1);
        assert!((frac[0].2 - 0.3).abs() < 1e-10);
        assert!((frac[1].2 - 0.5).abs() < 1e-10);
    }
}
