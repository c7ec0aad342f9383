//! Execution trace of a tree search.
//!
//! Drivers append one record per visited node (and, for branch-and-cut, one
//! record per cut attempt) in visitation order. Numbers are pre-rendered the
//! way they are displayed: objectives rounded to 4 decimals, solution
//! entries to 2.

use std::fmt;

use crate::search::{BoundConstraint, NodeStatus};

/// Placeholder for values a node did not produce.
pub const NOT_AVAILABLE: &str = "N/A";

/// Trace entry for one branch-and-bound node.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct NodeRecord {
    /// Node id (root is 1).
    pub id: u64,

    /// Parent id (None for root).
    pub parent_id: Option<u64>,

    /// Accumulated branching bounds, e.g. `x0 <= 2, x1 >= 3`.
    pub constraints: String,

    /// Relaxation objective, rounded.
    pub objective: Option<f64>,

    /// What happened to the node.
    pub status: NodeStatus,

    /// Relaxation solution, rendered.
    pub solution: String,
}

impl fmt::Display for NodeRecord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "#{:<4} parent={:<5} {:<16} obj={:<10} {:<24} [{}]",
            self.id,
            format_parent(self.parent_id),
            self.status.to_string(),
            format_objective(self.objective),
            self.solution,
            self.constraints,
        )
    }
}

/// Trace entry for one branch-and-cut node.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct BcNodeRecord {
    /// Node id (root is 1).
    pub id: u64,

    /// Parent id (None for root).
    pub parent_id: Option<u64>,

    /// Depth in the tree (0 for root).
    pub depth: usize,

    /// What happened to the node.
    pub status: NodeStatus,

    /// Final relaxation objective, rounded.
    pub objective: Option<f64>,

    /// Final relaxation solution, rendered.
    pub solution: String,

    /// Cuts appended at this node before it was settled.
    pub cuts_applied: usize,
}

impl fmt::Display for BcNodeRecord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "#{:<4} parent={:<5} depth={:<3} {:<16} obj={:<10} cuts={:<2} {}",
            self.id,
            format_parent(self.parent_id),
            self.depth,
            self.status.to_string(),
            format_objective(self.objective),
            self.cuts_applied,
            self.solution,
        )
    }
}

/// Family of a generated cut.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub enum CutType {
    /// Gomory fractional cut.
    Gomory,
}

impl fmt::Display for CutType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CutType::Gomory => f.write_str("Gomory"),
        }
    }
}

/// Outcome of a cut attempt.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub enum CutStatus {
    /// Cut was appended and the node re-solved.
    Applied,

    /// No row produced a cut.
    RejectedTooWeak,

    /// A cut was produced but has non-finite data.
    RejectedNumerical,
}

impl fmt::Display for CutStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            CutStatus::Applied => "Applied",
            CutStatus::RejectedTooWeak => "Rejected (Too weak)",
            CutStatus::RejectedNumerical => "Rejected (Numerical)",
        };
        f.write_str(s)
    }
}

/// Trace entry for one cut attempt.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct CutRecord {
    /// Node the cut was attempted at.
    pub node_id: u64,

    /// Solve round within the node (1 = first relaxation).
    pub iteration: usize,

    /// Cut family.
    pub cut_type: CutType,

    /// Outcome.
    pub status: CutStatus,

    /// Cut text, e.g. `0.50*x0 + 1.00*x1 <= 2.00`.
    pub constraint: String,

    /// Change of the relaxation objective after re-solving with the cut.
    pub improvement: Option<f64>,
}

impl fmt::Display for CutRecord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "node={:<4} round={:<2} {} {:<20} {}",
            self.node_id,
            self.iteration,
            self.cut_type,
            self.status.to_string(),
            self.constraint,
        )?;
        if let Some(delta) = self.improvement {
            write!(f, " (improvement {:.4})", delta)?;
        }
        Ok(())
    }
}

/// Full branch-and-cut trace.
#[derive(Debug, Clone, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct BcHistory {
    /// Node records, sorted by id.
    pub nodes: Vec<BcNodeRecord>,

    /// Cut records, in generation order.
    pub cuts: Vec<CutRecord>,
}

/// Round to `decimals` places, folding -0 into 0.
pub fn round_to(v: f64, decimals: i32) -> f64 {
    let scale = 10f64.powi(decimals);
    (v * scale).round() / scale + 0.0
}

/// Objective as shown in a trace: 4 decimals, or `N/A`.
pub fn format_objective(obj: Option<f64>) -> String {
    match obj {
        Some(v) => round_to(v, 4).to_string(),
        None => NOT_AVAILABLE.to_string(),
    }
}

/// Solution vector as shown in a trace, e.g. `[1, 2.5]`.
pub fn format_solution(x: &[f64]) -> String {
    let entries: Vec<String> = x.iter().map(|&v| round_to(v, 2).to_string()).collect();
    format!("[{}]", entries.join(", "))
}

/// Branching bounds as shown in a trace; `Root` when there are none.
pub fn format_bounds(bounds: &[BoundConstraint]) -> String {
    if bounds.is_empty() {
        return "Root".to_string();
    }
    bounds
        .iter()
        .map(|b| b.to_string())
        .collect::<Vec<_>>()
        .join(", ")
}

/// Cut as shown in a trace; coefficients below 1e-4 in magnitude are omitted.
pub fn format_cut(coefs: &[f64], rhs: f64) -> String {
    let terms: Vec<String> = coefs
        .iter()
        .enumerate()
        .filter(|(_, c)| c.abs() >= 1e-4)
        .map(|(i, c)| format!("{:.2}*x{}", c, i))
        .collect();
    format!("{} <= {:.2}", terms.join(" + "), rhs)
}

fn format_parent(parent_id: Option<u64>) -> String {
    parent_id.map_or_else(|| "-".to_string(), |p| p.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_objective_format() {
        assert_eq!(format_objective(Some(-10.0)), "-10");
        assert_eq!(format_objective(Some(3.141_59)), "3.1416");
        assert_eq!(format_objective(Some(-0.000_01)), "0");
        assert_eq!(format_objective(None), "N/A");
    }

    #[test]
    fn test_solution_format() {
        assert_eq!(format_solution(&[10.0, 0.0]), "[10, 0]");
        assert_eq!(format_solution(&[1.0, 2.5]), "[1, 2.5]");
        assert_eq!(format_solution(&[1.0 / 3.0, -1e-12]), "[0.33, 0]");
        assert_eq!(format_solution(&[]), "[]");
    }

    #[test]
    fn test_bounds_format() {
        assert_eq!(format_bounds(&[]), "Root");

        let bounds = [
            BoundConstraint::down_branch(0, 2.5),
            BoundConstraint::up_branch(1, 2.5),
        ];
        assert_eq!(format_bounds(&bounds), "x0 <= 2, x1 >= 3");
    }

    #[test]
    fn test_cut_format() {
        assert_eq!(
            format_cut(&[0.5, 1.0], 2.0),
            "0.50*x0 + 1.00*x1 <= 2.00"
        );
        assert_eq!(format_cut(&[1e-6, -1.0], -2.5), "-1.00*x1 <= -2.50");
    }

    #[test]
    fn test_status_labels() {
        assert_eq!(CutStatus::Applied.to_string(), "Applied");
        assert_eq!(CutStatus::RejectedTooWeak.to_string(), "Rejected (Too weak)");
        assert_eq!(
            CutStatus::RejectedNumerical.to_string(),
            "Rejected (Numerical)"
        );
        assert_eq!(CutType::Gomory.to_string(), "Gomory");
    }

    #[test]
    fn test_record_display() {
        let rec = NodeRecord {
            id: 1,
            parent_id: None,
            constraints: "Root".to_string(),
            objective: None,
            status: NodeStatus::Infeasible,
            solution: NOT_AVAILABLE.to_string(),
        };
        let line = rec.to_string();
        assert!(line.contains("Infeasible"));
        assert!(line.contains("N/A"));
        assert!(line.contains("[Root]"));
    }
}
