//! Search tree controller shared by both drivers.

use std::time::Instant;

use lp_core::{SolveResult, SolveStatus};

use super::{BranchDecision, BranchingSelector, NodeStack, NodeStatus};
use crate::model::{IncumbentTracker, MipProblem, MipSolution, MipStatus};
use crate::settings::MipSettings;

/// What to do with a node after its relaxation was solved.
#[derive(Debug, Clone)]
pub enum NodeOutcome {
    /// Node is a leaf: pruned, or integer-feasible.
    Fathomed(NodeStatus),

    /// Relaxation is fractional and could still beat the incumbent.
    Fractional(BranchDecision),
}

/// Per-solve search state.
///
/// Manages the node stack, incumbent, id allocation, and termination. A
/// fresh tree is created for every solve.
pub struct SearchTree<N> {
    /// Open nodes.
    stack: NodeStack<N>,

    /// Branching variable selector.
    branching: BranchingSelector,

    /// Incumbent solution tracker.
    pub incumbent: IncumbentTracker,

    /// Next node ID to assign (root is 1).
    next_node_id: u64,

    /// Nodes fathomed without producing an incumbent.
    nodes_pruned: u64,

    /// Cuts added.
    cuts_added: u64,

    /// Relaxations that stopped at the iteration cap.
    degraded_nodes: u64,

    /// Some relaxation was unbounded.
    saw_unbounded: bool,

    /// Start time.
    start_time: Option<Instant>,

    /// Settings.
    settings: MipSettings,
}

impl<N> SearchTree<N> {
    /// Create a new tree controller.
    pub fn new(settings: MipSettings) -> Self {
        Self {
            stack: NodeStack::new(),
            branching: BranchingSelector::new(settings.branching_rule),
            incumbent: IncumbentTracker::new(),
            next_node_id: 2, // 1 is the root
            nodes_pruned: 0,
            cuts_added: 0,
            degraded_nodes: 0,
            saw_unbounded: false,
            start_time: None,
            settings,
        }
    }

    /// Initialize with the root node.
    pub fn initialize(&mut self, root: N) {
        self.start_time = Some(Instant::now());
        self.stack.push(root);
    }

    /// Get the next node to process.
    pub fn next_node(&mut self) -> Option<N> {
        self.stack.pop()
    }

    /// Add a node to the stack.
    pub fn enqueue(&mut self, node: N) {
        self.stack.push(node);
    }

    /// Allocate ids for the (down, up) children of a branched node.
    pub fn child_ids(&mut self) -> (u64, u64) {
        let down_id = self.next_node_id;
        let up_id = self.next_node_id + 1;
        self.next_node_id += 2;
        (down_id, up_id)
    }

    /// Record cuts added.
    pub fn cuts_added(&mut self, count: usize) {
        self.cuts_added += count as u64;
    }

    /// Nodes popped so far.
    pub fn nodes_explored(&self) -> u64 {
        self.stack.total_popped()
    }

    /// Classify a solved relaxation and update the incumbent.
    ///
    /// Checks run in order: relaxation status, bound against the incumbent,
    /// integrality.
    pub fn evaluate(&mut self, node_id: u64, res: &SolveResult, prob: &MipProblem) -> NodeOutcome {
        if res.status.is_infeasible() {
            return self.fathom(NodeStatus::Infeasible);
        }

        match res.status {
            SolveStatus::Optimal | SolveStatus::Infeasible | SolveStatus::NotDualFeasible => {}
            SolveStatus::Unbounded => {
                log::debug!("Node {}: relaxation unbounded", node_id);
                self.saw_unbounded = true;
                return self.fathom(NodeStatus::Unbounded);
            }
            SolveStatus::MaxIterationsExceeded => {
                log::warn!(
                    "Node {}: relaxation hit the iteration cap, node discarded",
                    node_id
                );
                self.degraded_nodes += 1;
                return self.fathom(NodeStatus::IterationLimit);
            }
        }

        if self.incumbent.dominates(res.obj_val) {
            return self.fathom(NodeStatus::PrunedBound);
        }

        match self
            .branching
            .select(&res.x, prob, self.settings.int_feas_tol)
        {
            Some(decision) => NodeOutcome::Fractional(decision),
            None => {
                self.update_incumbent(&res.x, res.obj_val);
                NodeOutcome::Fathomed(NodeStatus::IntegerFound)
            }
        }
    }

    fn fathom(&mut self, status: NodeStatus) -> NodeOutcome {
        self.nodes_pruned += 1;
        NodeOutcome::Fathomed(status)
    }

    /// Update incumbent with a new solution.
    ///
    /// Returns true if incumbent was improved.
    pub fn update_incumbent(&mut self, x: &[f64], obj: f64) -> bool {
        let improved = self.incumbent.update(x, obj);

        if improved && self.settings.verbose {
            log::info!("New incumbent: obj={:.6e}", obj);
        }

        improved
    }

    /// Get elapsed time in milliseconds.
    pub fn elapsed_ms(&self) -> u64 {
        self.start_time
            .map(|t| t.elapsed().as_millis() as u64)
            .unwrap_or(0)
    }

    /// Check termination conditions.
    ///
    /// Returns Some(status) if we should terminate, None otherwise.
    pub fn check_termination(&self) -> Option<MipStatus> {
        if self.stack.is_empty() {
            return Some(self.exhausted_status());
        }

        if self.nodes_explored() >= self.settings.max_nodes {
            log::warn!(
                "Node limit reached ({}), {} nodes left open",
                self.settings.max_nodes,
                self.stack.len()
            );
            return Some(if self.saw_unbounded {
                MipStatus::Unbounded
            } else {
                MipStatus::NodeLimit
            });
        }

        None
    }

    fn exhausted_status(&self) -> MipStatus {
        if self.saw_unbounded {
            MipStatus::Unbounded
        } else if self.incumbent.has_incumbent() {
            MipStatus::Optimal
        } else {
            MipStatus::Infeasible
        }
    }

    /// Finalize the solve and return the solution.
    pub fn finalize(&self, status: MipStatus) -> MipSolution {
        let solution = MipSolution {
            status,
            x: self.incumbent.solution.clone().unwrap_or_default(),
            obj_val: self.incumbent.obj_val,
            nodes_explored: self.nodes_explored(),
            cuts_added: self.cuts_added,
            incumbent_updates: self.incumbent.update_count,
            degraded_nodes: self.degraded_nodes,
            solve_time_ms: self.elapsed_ms(),
        };

        if self.settings.verbose {
            log::info!(
                "Search finished: status={}, obj={:.6e}, nodes={}/{} created, pruned={}, cuts={}",
                solution.status,
                solution.obj_val,
                solution.nodes_explored,
                self.stack.total_added(),
                self.nodes_pruned,
                solution.cuts_added,
            );
        }

        solution
    }

    /// Log progress (if verbose).
    pub fn log_progress(&self) {
        if !self.settings.verbose {
            return;
        }

        if self.settings.log_freq == 0 || self.nodes_explored() % self.settings.log_freq != 0 {
            return;
        }

        log::info!(
            "Nodes: {} ({} open) | Incumbent: {:.6e} | Pruned: {} | Cuts: {} | Time: {:.1}s",
            self.nodes_explored(),
            self.stack.len(),
            self.incumbent.obj_val,
            self.nodes_pruned,
            self.cuts_added,
            self.elapsed_ms() as f64 / 1000.0,
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use lp_core::{ProblemData, SolveInfo};

    fn mip() -> MipProblem {
        let lp = ProblemData::new(vec![-1.0, -1.0], vec![vec![1.0, 1.0]], vec![3.5]).unwrap();
        MipProblem::new(lp, vec![0, 1]).unwrap()
    }

    fn result(status: SolveStatus, x: Vec<f64>, obj_val: f64) -> SolveResult {
        SolveResult {
            status,
            x,
            s: vec![0.0],
            z: vec![0.0],
            obj_val,
            info: SolveInfo::default(),
        }
    }

    #[test]
    fn test_tree_initialization() {
        let mut tree: SearchTree<u64> = SearchTree::new(MipSettings::default());

        tree.initialize(1);
        assert_eq!(tree.check_termination(), None);

        assert_eq!(tree.next_node(), Some(1));
        assert_eq!(tree.next_node(), None); // Stack now empty
        assert_eq!(tree.nodes_explored(), 1);

        // Exhausted without an incumbent
        assert_eq!(tree.check_termination(), Some(MipStatus::Infeasible));
    }

    #[test]
    fn test_child_ids() {
        let mut tree: SearchTree<u64> = SearchTree::new(MipSettings::default());
        assert_eq!(tree.child_ids(), (2, 3));
        assert_eq!(tree.child_ids(), (4, 5));
    }

    #[test]
    fn test_evaluate_order() {
        let prob = mip();
        let mut tree: SearchTree<u64> = SearchTree::new(MipSettings::default());

        let frac = result(SolveStatus::Optimal, vec![3.5, 0.0], -3.5);
        assert!(matches!(
            tree.evaluate(1, &frac, &prob),
            NodeOutcome::Fractional(d) if d.var == 0
        ));

        let int = result(SolveStatus::Optimal, vec![3.0, 0.0], -3.0);
        assert!(matches!(
            tree.evaluate(2, &int, &prob),
            NodeOutcome::Fathomed(NodeStatus::IntegerFound)
        ));
        assert_eq!(tree.incumbent.obj_val, -3.0);

        // Ties with the incumbent are pruned before the integrality check
        let tie = result(SolveStatus::Optimal, vec![2.0, 1.0], -3.0);
        assert!(matches!(
            tree.evaluate(3, &tie, &prob),
            NodeOutcome::Fathomed(NodeStatus::PrunedBound)
        ));
        assert_eq!(tree.incumbent.update_count, 1);
    }

    #[test]
    fn test_evaluate_statuses() {
        let prob = mip();
        let mut tree: SearchTree<u64> = SearchTree::new(MipSettings::default());
        let zero = vec![0.0, 0.0];

        for (status, expected) in [
            (SolveStatus::Infeasible, NodeStatus::Infeasible),
            (SolveStatus::NotDualFeasible, NodeStatus::Infeasible),
            (SolveStatus::MaxIterationsExceeded, NodeStatus::IterationLimit),
            (SolveStatus::Unbounded, NodeStatus::Unbounded),
        ] {
            let res = result(status, zero.clone(), 0.0);
            assert!(matches!(
                tree.evaluate(1, &res, &prob),
                NodeOutcome::Fathomed(s) if s == expected
            ));
        }

        let sol = tree.finalize(MipStatus::Unbounded);
        assert_eq!(sol.degraded_nodes, 1);
        assert_eq!(tree.check_termination(), Some(MipStatus::Unbounded));
    }

    #[test]
    fn test_node_limit() {
        let settings = MipSettings::default().with_max_nodes(1);
        let mut tree: SearchTree<u64> = SearchTree::new(settings);

        tree.initialize(1);
        tree.next_node();
        tree.enqueue(2);
        tree.enqueue(3);

        assert_eq!(tree.check_termination(), Some(MipStatus::NodeLimit));
    }

    #[test]
    fn test_incumbent_update() {
        let mut tree: SearchTree<u64> = SearchTree::new(MipSettings::default());

        // First incumbent
        assert!(tree.update_incumbent(&[1.0, 1.0], 100.0));
        assert_eq!(tree.incumbent.obj_val, 100.0);

        // Worse solution rejected
        assert!(!tree.update_incumbent(&[2.0, 2.0], 150.0));
        assert_eq!(tree.incumbent.obj_val, 100.0);

        // Better solution accepted
        assert!(tree.update_incumbent(&[0.5, 0.5], 50.0));

        tree.initialize(1);
        tree.next_node();
        let sol = tree.finalize(tree.check_termination().unwrap());
        assert_eq!(sol.status, MipStatus::Optimal);
        assert_eq!(sol.obj_val, 50.0);
        assert_eq!(sol.incumbent_updates, 2);
    }
}
