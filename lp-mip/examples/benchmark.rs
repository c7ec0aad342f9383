//! Compare branch-and-bound and branch-and-cut on classic small problems.
//!
//! Run with: cargo run --release -p lp-mip --example benchmark

use std::time::Instant;

use lp_core::ProblemData;
use lp_mip::{BranchAndBoundSolver, BranchAndCutSolver, MipProblem, MipSettings};

fn main() {
    println!("=== MILP Driver Benchmark ===\n");

    benchmark_knapsack(6);
    benchmark_knapsack(10);

    benchmark_set_cover(8, 5);
    benchmark_set_cover(12, 7);
}

/// Append x[j] <= 1 for every variable.
fn with_unit_box(mut a: Vec<Vec<f64>>, mut b: Vec<f64>, n: usize) -> (Vec<Vec<f64>>, Vec<f64>) {
    for j in 0..n {
        let mut row = vec![0.0; n];
        row[j] = 1.0;
        a.push(row);
        b.push(1.0);
    }
    (a, b)
}

/// 0-1 Knapsack Problem
///
/// max  sum_i v[i] * x[i]
/// s.t. sum_i w[i] * x[i] <= capacity
///      x[i] binary
fn benchmark_knapsack(n: usize) {
    println!("--- Knapsack Problem (n={}) ---", n);

    let values: Vec<f64> = (0..n).map(|i| ((i * 7 + 3) % 20 + 5) as f64).collect();
    let weights: Vec<f64> = (0..n).map(|i| ((i * 11 + 5) % 15 + 3) as f64).collect();
    let capacity = (weights.iter().sum::<f64>() * 0.5).floor();

    println!("  Items: {}, Capacity: {:.0}", n, capacity);

    let (a, b) = with_unit_box(vec![weights], vec![capacity], n);
    let c: Vec<f64> = values.iter().map(|v| -v).collect();

    let prob = ProblemData::new(c, a, b).expect("dimensions match");
    run_mip_benchmark("Knapsack", prob, (0..n).collect());
}

/// Set Cover Problem
///
/// min  sum_j c[j] * x[j]
/// s.t. sum_{j: i in S_j} x[j] >= 1 for all elements i
///      x[j] binary
fn benchmark_set_cover(num_elements: usize, num_sets: usize) {
    println!(
        "--- Set Cover (elements={}, sets={}) ---",
        num_elements, num_sets
    );

    // -sum_{j: i in S_j} x[j] <= -1
    let a: Vec<Vec<f64>> = (0..num_elements)
        .map(|i| {
            (0..num_sets)
                .map(|j| {
                    if (i + j * 3) % 4 < 2 || j == i % num_sets {
                        -1.0
                    } else {
                        0.0
                    }
                })
                .collect()
        })
        .collect();
    let b = vec![-1.0; num_elements];

    // Integer-valued costs keep the Gomory cuts exact
    let costs: Vec<f64> = (0..num_sets).map(|j| (10 + j) as f64).collect();

    let (a, b) = with_unit_box(a, b, num_sets);
    let prob = ProblemData::new(costs, a, b).expect("dimensions match");
    run_mip_benchmark("Set Cover", prob, (0..num_sets).collect());
}

fn run_mip_benchmark(name: &str, lp: ProblemData, integer_vars: Vec<usize>) {
    let mip = MipProblem::new(lp, integer_vars).expect("valid MILP");

    let start = Instant::now();
    let bnb = BranchAndBoundSolver::new(mip.clone(), MipSettings::default()).solve();
    let bnb_ms = start.elapsed().as_secs_f64() * 1000.0;

    let start = Instant::now();
    let bnc = BranchAndCutSolver::new(mip, MipSettings::default()).solve();
    let bnc_ms = start.elapsed().as_secs_f64() * 1000.0;

    println!(
        "  B&B: status={} obj={:.4} nodes={} time={:.2}ms",
        bnb.status, bnb.obj_val, bnb.nodes_explored, bnb_ms
    );
    println!(
        "  B&C: status={} obj={:.4} nodes={} cuts={} time={:.2}ms",
        bnc.status, bnc.obj_val, bnc.nodes_explored, bnc.cuts_added, bnc_ms
    );

    if (bnb.obj_val - bnc.obj_val).abs() > 1e-6 {
        println!("  WARNING: {} objectives disagree", name);
    }
    println!();
}
