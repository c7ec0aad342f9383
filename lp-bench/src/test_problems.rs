//! Built-in problems for the `demo` command.

use crate::problem_file::ProblemFile;

/// Test problem definition.
#[derive(Clone)]
pub struct TestProblem {
    pub name: &'static str,
    pub problem_class: &'static str,
    pub builder: fn() -> ProblemFile,
    /// Objective in the problem's own sense; None when no optimum exists
    pub expected_objective: Option<f64>,
    pub source: &'static str,
}

fn problem(c: &[f64], a: &[&[f64]], b: &[f64], integer_vars: &[usize], maximize: bool) -> ProblemFile {
    ProblemFile {
        c: c.to_vec(),
        a: a.iter().map(|row| row.to_vec()).collect(),
        b: b.to_vec(),
        integer_vars: integer_vars.to_vec(),
        maximize,
    }
}

// ============================================================================
// LP problems
// ============================================================================

fn build_single_row() -> ProblemFile {
    problem(&[1.0, 1.0], &[&[1.0, 1.0]], &[10.0], &[], true)
}

fn build_two_phase() -> ProblemFile {
    // x0 + x1 >= 1 written as -x0 - x1 <= -1
    problem(
        &[5.0, 4.0],
        &[&[6.0, 4.0], &[1.0, 2.0], &[-1.0, -1.0]],
        &[24.0, 6.0, -1.0],
        &[],
        true,
    )
}

fn build_contradictory() -> ProblemFile {
    problem(
        &[1.0, 1.0],
        &[&[1.0, 0.0], &[-1.0, 0.0]],
        &[1.0, -2.0],
        &[0],
        false,
    )
}

// ============================================================================
// MILP problems
// ============================================================================

fn build_knapsack() -> ProblemFile {
    problem(
        &[5.0, 4.0],
        &[&[6.0, 4.0], &[1.0, 2.0]],
        &[24.0, 6.0],
        &[0, 1],
        true,
    )
}

fn build_triangle() -> ProblemFile {
    problem(
        &[0.0, 1.0],
        &[&[3.0, 2.0], &[-3.0, 2.0]],
        &[6.0, 0.0],
        &[0, 1],
        true,
    )
}

fn build_integral_root() -> ProblemFile {
    problem(&[1.0, 1.0], &[&[1.0, 1.0]], &[10.0], &[0, 1], false)
}

fn build_empty_interval() -> ProblemFile {
    // 0.2 <= x0 <= 0.8
    problem(&[1.0], &[&[1.0], &[-1.0]], &[0.8, -0.2], &[0], false)
}

// ============================================================================
// Problem Registry
// ============================================================================

pub fn lp_test_problems() -> Vec<TestProblem> {
    vec![
        TestProblem {
            name: "LP_SINGLE_ROW",
            problem_class: "LP",
            builder: build_single_row,
            expected_objective: Some(10.0),
            source: "synthetic",
        },
        TestProblem {
            name: "LP_TWO_PHASE",
            problem_class: "LP",
            builder: build_two_phase,
            expected_objective: Some(21.0),
            source: "synthetic",
        },
        TestProblem {
            name: "LP_CONTRADICTORY",
            problem_class: "LP",
            builder: build_contradictory,
            expected_objective: None,
            source: "synthetic",
        },
    ]
}

pub fn milp_test_problems() -> Vec<TestProblem> {
    vec![
        TestProblem {
            name: "MILP_KNAPSACK",
            problem_class: "MILP",
            builder: build_knapsack,
            expected_objective: Some(20.0),
            source: "synthetic",
        },
        TestProblem {
            name: "MILP_TRIANGLE",
            problem_class: "MILP",
            builder: build_triangle,
            expected_objective: Some(1.0),
            source: "Gomory textbook example",
        },
        TestProblem {
            name: "MILP_INTEGRAL_ROOT",
            problem_class: "MILP",
            builder: build_integral_root,
            expected_objective: Some(0.0),
            source: "synthetic",
        },
        TestProblem {
            name: "MILP_EMPTY_INTERVAL",
            problem_class: "MILP",
            builder: build_empty_interval,
            expected_objective: None,
            source: "synthetic",
        },
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn registry_builds_valid_problems() {
        for tp in lp_test_problems().into_iter().chain(milp_test_problems()) {
            let file = (tp.builder)();
            assert!(file.to_problem().is_ok(), "{}", tp.name);
            if tp.problem_class == "MILP" {
                assert!(!file.integer_vars.is_empty(), "{}", tp.name);
            }
        }
    }
}
