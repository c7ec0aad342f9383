//! Search node representation.

use std::fmt;

use lp_core::{LinearCut, ProblemData};

/// Outcome of processing a search node.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub enum NodeStatus {
    /// Node LP relaxation is infeasible.
    Infeasible,

    /// Node LP relaxation is unbounded.
    Unbounded,

    /// Node LP relaxation stopped at the iteration cap.
    IterationLimit,

    /// Node was pruned (bound >= incumbent).
    PrunedBound,

    /// Node produced an integer-feasible solution.
    IntegerFound,

    /// Node was branched (children created).
    Branched,
}

impl fmt::Display for NodeStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            NodeStatus::Infeasible => "Infeasible",
            NodeStatus::Unbounded => "Unbounded",
            NodeStatus::IterationLimit => "Iteration Limit",
            NodeStatus::PrunedBound => "Pruned (Bound)",
            NodeStatus::IntegerFound => "Integer Found",
            NodeStatus::Branched => "Branched",
        };
        f.write_str(s)
    }
}

/// Direction of a branching bound.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub enum BoundKind {
    /// x <= value
    Upper,

    /// x >= value
    Lower,
}

/// A single-variable bound added by branching.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct BoundConstraint {
    /// Variable index.
    pub var: usize,

    /// Bound direction.
    pub kind: BoundKind,

    /// Bound value.
    pub value: f64,
}

impl BoundConstraint {
    /// Create a "down" branch: x <= floor(value).
    pub fn down_branch(var: usize, value: f64) -> Self {
        Self {
            var,
            kind: BoundKind::Upper,
            value: value.floor(),
        }
    }

    /// Create an "up" branch: x >= ceil(value).
    pub fn up_branch(var: usize, value: f64) -> Self {
        Self {
            var,
            kind: BoundKind::Lower,
            value: value.ceil(),
        }
    }

    /// The bound as a `row . x <= rhs` constraint over `n` variables.
    pub fn to_row(&self, n: usize) -> (Vec<f64>, f64) {
        let mut row = vec![0.0; n];
        match self.kind {
            BoundKind::Upper => {
                row[self.var] = 1.0;
                (row, self.value)
            }
            BoundKind::Lower => {
                row[self.var] = -1.0;
                (row, -self.value)
            }
        }
    }
}

impl fmt::Display for BoundConstraint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let op = match self.kind {
            BoundKind::Upper => "<=",
            BoundKind::Lower => ">=",
        };
        write!(f, "x{} {} {}", self.var, op, self.value)
    }
}

/// A node in the branch-and-bound tree.
///
/// Carries only the bounds accumulated along its path; the base problem is
/// shared and never modified.
#[derive(Debug, Clone)]
pub struct SearchNode {
    /// Unique node identifier.
    pub id: u64,

    /// Parent node ID (None for root).
    pub parent_id: Option<u64>,

    /// Depth in the tree (0 for root).
    pub depth: usize,

    /// Bounds from the root down to this node.
    pub bounds: Vec<BoundConstraint>,

    /// Relaxation objective of the parent.
    pub parent_objective: f64,
}

impl SearchNode {
    /// Create the root node.
    pub fn root() -> Self {
        Self {
            id: 1,
            parent_id: None,
            depth: 0,
            bounds: Vec::new(),
            parent_objective: f64::NEG_INFINITY,
        }
    }

    /// Create a child node with one more bound.
    pub fn child(&self, id: u64, bound: BoundConstraint, parent_objective: f64) -> Self {
        let mut bounds = self.bounds.clone();
        bounds.push(bound);

        Self {
            id,
            parent_id: Some(self.id),
            depth: self.depth + 1,
            bounds,
            parent_objective,
        }
    }

    /// Base problem with this node's bounds appended as rows.
    pub fn relaxation(&self, base: &ProblemData) -> ProblemData {
        let n = base.num_vars();
        let mut prob = base.clone();

        for bound in &self.bounds {
            let (row, rhs) = bound.to_row(n);
            prob.A.push(row);
            prob.b.push(rhs);
        }
        prob
    }
}

/// A node in the branch-and-cut tree.
///
/// Owns its constraint system; cuts found at this node are appended to it
/// and inherited by its children.
#[derive(Debug, Clone)]
pub struct CutNode {
    /// Unique node identifier.
    pub id: u64,

    /// Parent node ID (None for root).
    pub parent_id: Option<u64>,

    /// Depth in the tree (0 for root).
    pub depth: usize,

    /// Node relaxation, including inherited cuts and branch rows.
    pub lp: ProblemData,

    /// Relaxation objective of the parent.
    pub parent_objective: f64,
}

impl CutNode {
    /// Create the root node over a copy of the base problem.
    pub fn root(base: &ProblemData) -> Self {
        Self {
            id: 1,
            parent_id: None,
            depth: 0,
            lp: base.clone(),
            parent_objective: f64::NEG_INFINITY,
        }
    }

    /// Create a child node: a copy of this node's system plus one bound row.
    pub fn child(&self, id: u64, bound: BoundConstraint, parent_objective: f64) -> Self {
        let (row, rhs) = bound.to_row(self.lp.num_vars());

        Self {
            id,
            parent_id: Some(self.id),
            depth: self.depth + 1,
            lp: self.lp.with_row(row, rhs),
            parent_objective,
        }
    }

    /// Append a cut to this node's system.
    pub fn add_cut(&mut self, cut: &LinearCut) {
        self.lp.A.push(cut.coefs.clone());
        self.lp.b.push(cut.rhs);
    }
}
