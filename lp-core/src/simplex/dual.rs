//! Two-phase dual simplex driver.
//!
//! Phase 1 runs primal simplex pivots until every reduced cost is
//! nonnegative. Phase 2 runs dual simplex pivots until every right-hand side
//! is nonnegative. Slack columns start basic, so a problem with `c >= 0`
//! skips phase 1 entirely, and cut or branching rows with negative
//! right-hand sides are repaired by phase 2 alone.

use super::gomory::{self, LinearCut};
use super::tableau::Tableau;
use crate::problem::{ProblemData, SolveInfo, SolveResult, SolveStatus, SolverSettings};

/// Outcome of a single phase.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum PhaseOutcome {
    /// Phase reached its goal.
    Done,

    /// Phase stopped on a terminal status.
    Stopped(SolveStatus),
}

/// Dense-tableau dual simplex solver.
///
/// Owns its tableau for the duration of a solve. After [`solve`] returns, the
/// final tableau stays available for cut generation.
///
/// [`solve`]: DualSimplexSolver::solve
pub struct DualSimplexSolver {
    /// Problem the tableau is rebuilt from on every solve
    prob: ProblemData,

    /// Current tableau
    tableau: Tableau,

    /// Settings
    settings: SolverSettings,

    /// Pivot counters for the current solve
    info: SolveInfo,
}

impl DualSimplexSolver {
    /// Create a solver for `prob`.
    pub fn new(prob: &ProblemData, settings: SolverSettings) -> Self {
        Self {
            prob: prob.clone(),
            tableau: Tableau::new(prob),
            settings,
            info: SolveInfo::default(),
        }
    }

    /// Solve the LP.
    ///
    /// The tableau is rebuilt first, so calling this twice gives the same
    /// result.
    pub fn solve(&mut self) -> SolveResult {
        self.tableau = Tableau::new(&self.prob);
        self.info = SolveInfo::default();

        if !self.tableau.is_dual_feasible() {
            if let PhaseOutcome::Stopped(status) = self.run_primal_phase() {
                return self.finish(status);
            }
        }

        let status = match self.run_dual_phase() {
            PhaseOutcome::Done => SolveStatus::Optimal,
            PhaseOutcome::Stopped(status) => status,
        };

        self.finish(status)
    }

    /// Generate a Gomory fractional cut from the current tableau.
    ///
    /// `a` and `b` must be the constraint system the tableau was built from
    /// (including any cuts already appended), since slack columns are
    /// expanded back into the rows that define them. A system missing a row
    /// the cut needs yields `None`.
    pub fn generate_gomory_cut(
        &self,
        integer_vars: &[usize],
        a: &[Vec<f64>],
        b: &[f64],
    ) -> Option<LinearCut> {
        gomory::gomory_cut(&self.tableau, integer_vars, a, b)
    }

    fn finish(&self, status: SolveStatus) -> SolveResult {
        if self.settings.verbose {
            log::info!(
                "Simplex finished: status={}, obj={:.6e}, iters={} (primal {}, dual {})",
                status,
                self.tableau.objective_value(),
                self.info.iters,
                self.info.primal_iters,
                self.info.dual_iters,
            );
        } else {
            log::debug!(
                "Simplex finished: status={}, iters={}",
                status,
                self.info.iters
            );
        }

        self.tableau.extract(status, self.info)
    }

    /// Primal simplex pivots until all reduced costs are nonnegative.
    fn run_primal_phase(&mut self) -> PhaseOutcome {
        for _ in 0..self.settings.max_iter {
            let Some(col) = self.tableau.primal_entering() else {
                return PhaseOutcome::Done;
            };

            let Some(row) = self.tableau.primal_leaving(col) else {
                log::debug!("Column {} has negative reduced cost and no leaving row", col);
                return PhaseOutcome::Stopped(SolveStatus::Unbounded);
            };

            self.tableau.pivot(row, col);
            self.info.primal_iters += 1;
            self.info.iters += 1;
        }

        if self.tableau.primal_entering().is_none() {
            return PhaseOutcome::Done;
        }

        log::warn!(
            "Primal phase hit the iteration cap ({})",
            self.settings.max_iter
        );
        PhaseOutcome::Stopped(SolveStatus::MaxIterationsExceeded)
    }

    /// Dual simplex pivots until all right-hand sides are nonnegative.
    fn run_dual_phase(&mut self) -> PhaseOutcome {
        // Same threshold phase 1 stops on
        if self.tableau.primal_entering().is_some() {
            return PhaseOutcome::Stopped(SolveStatus::NotDualFeasible);
        }

        for _ in 0..self.settings.max_iter {
            let Some(row) = self.tableau.dual_leaving() else {
                return PhaseOutcome::Done;
            };

            let Some(col) = self.tableau.dual_entering(row) else {
                log::debug!("Row {} has negative rhs and no entering column", row);
                return PhaseOutcome::Stopped(SolveStatus::Infeasible);
            };

            self.tableau.pivot(row, col);
            self.info.dual_iters += 1;
            self.info.iters += 1;
        }

        if self.tableau.dual_leaving().is_none() {
            return PhaseOutcome::Done;
        }

        log::warn!(
            "Dual phase hit the iteration cap ({})",
            self.settings.max_iter
        );
        PhaseOutcome::Stopped(SolveStatus::MaxIterationsExceeded)
    }
}
