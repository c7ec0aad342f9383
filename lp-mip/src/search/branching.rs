//! Branching variable selection.

use lp_core::tolerance::RATIO_TOL;

use super::BoundConstraint;
use crate::model::MipProblem;
use crate::settings::BranchingRule;

/// A branching decision.
#[derive(Debug, Clone)]
pub struct BranchDecision {
    /// Variable to branch on.
    pub var: usize,

    /// Current (fractional) value.
    pub value: f64,

    /// Bound for the "down" branch (x <= floor(value)).
    pub down_branch: BoundConstraint,

    /// Bound for the "up" branch (x >= ceil(value)).
    pub up_branch: BoundConstraint,

    /// Fractionality of `value`, logged with the decision.
    pub score: f64,
}

/// Branching variable selector.
#[derive(Debug, Clone)]
pub struct BranchingSelector {
    /// Branching rule to use.
    rule: BranchingRule,
}

impl BranchingSelector {
    /// Create a new branching selector.
    pub fn new(rule: BranchingRule) -> Self {
        Self { rule }
    }

    /// Select a branching variable.
    ///
    /// Returns None if the solution is integer-feasible.
    pub fn select(&self, x: &[f64], prob: &MipProblem, tol: f64) -> Option<BranchDecision> {
        // Fractional integer variables, in index order
        let fractional = prob.get_fractional_vars(x, tol);

        let (var, value, frac) = match self.rule {
            BranchingRule::FirstFractional => fractional.first().copied()?,
            BranchingRule::MostFractional => Self::most_fractional(&fractional)?,
        };

        Some(Self::make_decision(var, value, frac))
    }

    /// Variable with fractionality closest to 0.5; lowest index on ties.
    ///
    /// Fractionalities within `RATIO_TOL` of each other count as tied, so
    /// 0.3 and 0.7 are equal even though `1.0 - 0.7` rounds above 0.3.
    fn most_fractional(fractional: &[(usize, f64, f64)]) -> Option<(usize, f64, f64)> {
        fractional.iter().copied().fold(None, |best, cand| match best {
            Some((_, _, best_frac)) if cand.2 <= best_frac + RATIO_TOL => best,
            _ => Some(cand),
        })
    }

    /// Create a branch decision for a variable.
    fn make_decision(var: usize, value: f64, score: f64) -> BranchDecision {
        BranchDecision {
            var,
            value,
            down_branch: BoundConstraint::down_branch(var, value),
            up_branch: BoundConstraint::up_branch(var, value),
            score,
        }
    }
}
