use clap::ValueEnum;
use lp_core::{solve, ProblemData, SolveResult, SolveStatus};
use lp_mip::{
    solve_branch_and_bound, solve_branch_and_cut, BcHistory, MipSettings, MipSolution, NodeRecord,
};
use serde::Serialize;

#[derive(ValueEnum, Clone, Copy, Debug, PartialEq, Eq)]
pub enum SolverChoice {
    /// LP relaxation only (integrality ignored)
    Lp,
    /// Branch-and-bound
    Bnb,
    /// Branch-and-cut with Gomory cuts
    Bnc,
}

/// Result of one run, with whatever trace the method produces.
#[derive(Debug, Clone, Serialize)]
#[serde(tag = "method", rename_all = "snake_case")]
pub enum Outcome {
    Lp {
        result: SolveResult,
    },
    BranchAndBound {
        solution: MipSolution,
        nodes: Vec<NodeRecord>,
    },
    BranchAndCut {
        solution: MipSolution,
        history: BcHistory,
    },
}

impl Outcome {
    pub fn status(&self) -> String {
        match self {
            Outcome::Lp { result } => result.status.to_string(),
            Outcome::BranchAndBound { solution, .. } | Outcome::BranchAndCut { solution, .. } => {
                solution.status.to_string()
            }
        }
    }

    /// Minimization-form objective, if the run produced a point.
    pub fn objective(&self) -> Option<f64> {
        match self {
            Outcome::Lp { result } => {
                (result.status == SolveStatus::Optimal).then_some(result.obj_val)
            }
            Outcome::BranchAndBound { solution, .. } | Outcome::BranchAndCut { solution, .. } => {
                solution.status.has_solution().then_some(solution.obj_val)
            }
        }
    }

    pub fn x(&self) -> &[f64] {
        match self {
            Outcome::Lp { result } => &result.x,
            Outcome::BranchAndBound { solution, .. } | Outcome::BranchAndCut { solution, .. } => {
                &solution.x
            }
        }
    }
}

pub fn solve_with_choice(
    prob: &ProblemData,
    integer_vars: &[usize],
    settings: &MipSettings,
    choice: SolverChoice,
) -> anyhow::Result<Outcome> {
    let outcome = match choice {
        SolverChoice::Lp => Outcome::Lp {
            result: solve(prob, &settings.lp_settings),
        },
        SolverChoice::Bnb => {
            let (solution, nodes) = solve_branch_and_bound(prob, integer_vars, settings)?;
            Outcome::BranchAndBound { solution, nodes }
        }
        SolverChoice::Bnc => {
            let (solution, history) = solve_branch_and_cut(prob, integer_vars, settings)?;
            Outcome::BranchAndCut { solution, history }
        }
    };
    Ok(outcome)
}
