//! Depth-first search tree management.

mod branching;
mod node;
mod stack;
mod tree;

pub use branching::{BranchDecision, BranchingSelector};
pub use node::{BoundConstraint, BoundKind, CutNode, NodeStatus, SearchNode};
pub use stack::NodeStack;
pub use tree::{NodeOutcome, SearchTree};
