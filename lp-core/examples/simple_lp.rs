//! Simple LP example.
//!
//! Solves:
//!   maximize    5x0 + 4x1
//!   subject to  6x0 + 4x1 <= 24
//!               x0 + 2x1 <= 6
//!               x0 + x1 >= 1
//!               x0, x1 >= 0
//!
//! Optimal solution: x0 = 3, x1 = 1.5, objective = 21

use lp_core::{DualSimplexSolver, ProblemData, SolverSettings};

fn main() {
    println!("Dense Dual Simplex - Simple LP Example");
    println!("======================================");

    // Canonical form is min c^T x, A x <= b, x >= 0:
    // the objective is negated and the >= row is written as -x0 - x1 <= -1.
    let prob = ProblemData::new(
        vec![-5.0, -4.0],
        vec![vec![6.0, 4.0], vec![1.0, 2.0], vec![-1.0, -1.0]],
        vec![24.0, 6.0, -1.0],
    )
    .expect("dimensions match");

    let settings = SolverSettings {
        verbose: true,
        ..Default::default()
    };

    let mut solver = DualSimplexSolver::new(&prob, settings);
    let result = solver.solve();

    println!("\n=== Solution ===");
    println!("Status:     {}", result.status);
    println!(
        "Iterations: {} (primal {}, dual {})",
        result.info.iters, result.info.primal_iters, result.info.dual_iters
    );
    println!("Objective:  {:.6}", -result.obj_val);
    println!("x = {:?}", result.x);
    println!("slacks = {:?}", result.s);
    println!("duals  = {:?}", result.z);

    if let Some(cut) = solver.generate_gomory_cut(&[0, 1], &prob.A, &prob.b) {
        println!(
            "\nGomory cut from row {} (fraction {:.2}): {:?} . x <= {:.4}",
            cut.source_row, cut.fraction, cut.coefs, cut.rhs
        );
    }
}
