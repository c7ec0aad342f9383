//! Command-line driver for the dual simplex and the MILP tree searches.

mod problem_file;
mod solver_choice;
mod test_problems;

use std::path::PathBuf;
use std::time::Instant;

use anyhow::{bail, Context, Result};
use clap::{ArgAction, Parser, Subcommand, ValueEnum};
use env_logger::Builder;
use log::LevelFilter;
use lp_mip::trace::format_solution;
use lp_mip::{BranchingRule, MipSettings};

use problem_file::ProblemFile;
use solver_choice::{solve_with_choice, Outcome, SolverChoice};
use test_problems::{lp_test_problems, milp_test_problems, TestProblem};

/// Dense dual simplex with branch-and-bound and branch-and-cut
#[derive(Parser, Debug)]
#[command(name = "lp-bench")]
#[command(version)]
struct Args {
    /// Increase log verbosity (-v info, -vv debug, -vvv trace)
    #[arg(short, long, action = ArgAction::Count, global = true)]
    verbose: u8,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Solve a problem stored as JSON
    Solve {
        /// Problem file
        #[arg(value_name = "FILE")]
        file: PathBuf,

        /// Solution method
        #[arg(short, long, value_enum, default_value = "bnb")]
        method: SolverChoice,

        /// Maximize the objective (overrides the file's sense)
        #[arg(long)]
        maximize: bool,

        /// Print the node and cut trace
        #[arg(long)]
        trace: bool,

        /// Print the outcome as JSON
        #[arg(long)]
        json: bool,

        /// Gomory cuts per node before branching
        #[arg(long, default_value = "5")]
        max_cuts: usize,

        /// Pivot cap per simplex phase
        #[arg(long, default_value = "1000")]
        max_iter: usize,

        /// Node cap for the tree searches
        #[arg(long)]
        max_nodes: Option<u64>,

        /// Branching variable rule
        #[arg(long, value_enum, default_value = "first")]
        branching: Branching,
    },

    /// Run the built-in problems and check their objectives
    Demo {
        /// Print node traces
        #[arg(long)]
        trace: bool,
    },
}

#[derive(ValueEnum, Clone, Copy, Debug)]
enum Branching {
    /// First fractional variable by index
    First,
    /// Fractional part closest to 0.5
    Most,
}

impl From<Branching> for BranchingRule {
    fn from(b: Branching) -> Self {
        match b {
            Branching::First => BranchingRule::FirstFractional,
            Branching::Most => BranchingRule::MostFractional,
        }
    }
}

fn init_logging(verbose: u8) {
    let level = match verbose {
        0 => LevelFilter::Warn,
        1 => LevelFilter::Info,
        2 => LevelFilter::Debug,
        _ => LevelFilter::Trace,
    };
    Builder::new()
        .filter_level(level)
        .parse_default_env()
        .init();
}

pub fn main() -> Result<()> {
    let args = Args::parse();
    init_logging(args.verbose);

    match args.command {
        Command::Solve {
            file,
            method,
            maximize,
            trace,
            json,
            max_cuts,
            max_iter,
            max_nodes,
            branching,
        } => {
            let mut problem = ProblemFile::load_json(&file)?;
            problem.maximize |= maximize;

            let mut settings = MipSettings::default()
                .with_max_cuts(max_cuts)
                .with_branching_rule(branching.into());
            settings.lp_settings.max_iter = max_iter;
            settings.verbose = args.verbose > 0;
            if let Some(nodes) = max_nodes {
                settings = settings.with_max_nodes(nodes);
            }

            let outcome = run(&problem, &settings, method)
                .with_context(|| format!("Solving {}", file.display()))?;

            if json {
                let text = serde_json::to_string_pretty(&outcome)
                    .context("Failed to serialize outcome")?;
                println!("{}", text);
            } else {
                print_outcome(&problem, &outcome, trace);
            }
            Ok(())
        }
        Command::Demo { trace } => demo(trace),
    }
}

fn run(problem: &ProblemFile, settings: &MipSettings, method: SolverChoice) -> Result<Outcome> {
    let prob = problem.to_problem()?;
    log::info!(
        "Solving {} vars, {} constraints, {} integer with {:?}",
        prob.num_vars(),
        prob.num_constraints(),
        problem.integer_vars.len(),
        method
    );
    solve_with_choice(&prob, &problem.integer_vars, settings, method)
}

fn print_outcome(problem: &ProblemFile, outcome: &Outcome, trace: bool) {
    println!("Status:           {}", outcome.status());
    match outcome.objective() {
        Some(obj) => println!("Objective:        {:.6}", problem.report_objective(obj)),
        None => println!("Objective:        N/A"),
    }
    println!("Solution:         {}", format_solution(outcome.x()));

    match outcome {
        Outcome::Lp { result } => {
            println!(
                "Iterations:       {} (primal {}, dual {})",
                result.info.iters, result.info.primal_iters, result.info.dual_iters
            );
        }
        Outcome::BranchAndBound { solution, nodes } => {
            println!("Nodes explored:   {}", solution.nodes_explored);
            println!("Solve time:       {} ms", solution.solve_time_ms);
            if trace {
                print_header("Node trace (minimization form)");
                for rec in nodes {
                    println!("{}", rec);
                }
            }
        }
        Outcome::BranchAndCut { solution, history } => {
            println!("Nodes explored:   {}", solution.nodes_explored);
            println!("Cuts added:       {}", solution.cuts_added);
            println!("Solve time:       {} ms", solution.solve_time_ms);
            if trace {
                print_header("Node trace (minimization form)");
                for rec in &history.nodes {
                    println!("{}", rec);
                }
                print_header("Cut trace");
                if history.cuts.is_empty() {
                    println!("No cuts were generated.");
                }
                for rec in &history.cuts {
                    println!("{}", rec);
                }
            }
        }
    }
}

fn print_header(title: &str) {
    println!("\n{}", "=".repeat(80));
    println!("{}", title);
    println!("{}", "=".repeat(80));
}

/// Run one registry problem; returns whether the objective matched.
fn check_problem(tp: &TestProblem, method: SolverChoice, trace: bool) -> Result<bool> {
    let problem = (tp.builder)();
    let start = Instant::now();
    let outcome = run(&problem, &MipSettings::default(), method)
        .with_context(|| format!("Solving {}", tp.name))?;
    let elapsed = start.elapsed();

    let got = outcome.objective().map(|obj| problem.report_objective(obj));
    let pass = match (got, tp.expected_objective) {
        (Some(g), Some(e)) => (g - e).abs() < 1e-6,
        (None, None) => true,
        _ => false,
    };

    println!(
        "{:<22} {:<6} {:<5} {:<12} {:>12} {:>10.3}ms  {}",
        tp.name,
        tp.problem_class,
        format!("{:?}", method).to_lowercase(),
        outcome.status(),
        got.map_or_else(|| "N/A".to_string(), |g| format!("{:.4}", g)),
        elapsed.as_secs_f64() * 1000.0,
        if pass { "ok" } else { "MISMATCH" }
    );

    if trace {
        println!("Source:           {}", tp.source);
        print_outcome(&problem, &outcome, true);
    }

    Ok(pass)
}

fn demo(trace: bool) -> Result<()> {
    println!(
        "{:<22} {:<6} {:<5} {:<12} {:>12} {:>12}",
        "Problem", "Class", "Meth", "Status", "Objective", "Time"
    );
    println!("{}", "-".repeat(80));

    let mut failures = Vec::new();

    for tp in lp_test_problems() {
        if !check_problem(&tp, SolverChoice::Lp, trace)? {
            failures.push(format!("{} (lp)", tp.name));
        }
    }

    for tp in milp_test_problems() {
        for method in [SolverChoice::Bnb, SolverChoice::Bnc] {
            if !check_problem(&tp, method, trace)? {
                failures.push(format!("{} ({:?})", tp.name, method));
            }
        }
    }

    if !failures.is_empty() {
        bail!("Objective mismatch: {}", failures.join(", "));
    }
    Ok(())
}
