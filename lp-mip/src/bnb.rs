//! Branch-and-bound driver.
//!
//! Depth-first search over LP relaxations. Each node carries only the bounds
//! added along its path; the relaxation is rebuilt from the base problem
//! when the node is popped.

use lp_core::{DualSimplexSolver, SolveStatus};

use crate::model::{MipProblem, MipSolution};
use crate::search::{NodeOutcome, NodeStatus, SearchNode, SearchTree};
use crate::settings::MipSettings;
use crate::trace::{format_bounds, format_solution, round_to, NodeRecord, NOT_AVAILABLE};

/// Branch-and-bound solver.
pub struct BranchAndBoundSolver {
    /// Problem to solve.
    prob: MipProblem,

    /// Settings.
    settings: MipSettings,

    /// Node records of the last solve, in visitation order.
    history: Vec<NodeRecord>,
}

impl BranchAndBoundSolver {
    /// Create a solver for `prob`.
    pub fn new(prob: MipProblem, settings: MipSettings) -> Self {
        Self {
            prob,
            settings,
            history: Vec::new(),
        }
    }

    /// Run the search.
    ///
    /// Every call starts from scratch: fresh incumbent, counters, and trace.
    pub fn solve(&mut self) -> MipSolution {
        self.history.clear();

        if self.settings.verbose {
            log::info!(
                "Branch-and-bound: {} vars ({} integer), {} constraints",
                self.prob.num_vars(),
                self.prob.num_integers(),
                self.prob.num_constraints()
            );
        }

        let mut tree = SearchTree::new(self.settings.clone());
        tree.initialize(SearchNode::root());

        let status = loop {
            if let Some(status) = tree.check_termination() {
                break status;
            }

            if let Some(node) = tree.next_node() {
                self.process_node(&mut tree, node);
                tree.log_progress();
            }
        };

        tree.finalize(status)
    }

    /// Node records of the last solve, sorted by id.
    pub fn history(&self) -> Vec<NodeRecord> {
        let mut records = self.history.clone();
        records.sort_by_key(|r| r.id);
        records
    }

    /// Node records of the last solve, in visitation order.
    pub fn visit_order(&self) -> &[NodeRecord] {
        &self.history
    }

    fn process_node(&mut self, tree: &mut SearchTree<SearchNode>, node: SearchNode) {
        let relaxation = node.relaxation(&self.prob.lp);
        let res = DualSimplexSolver::new(&relaxation, self.settings.lp_settings.clone()).solve();

        let mut record = NodeRecord {
            id: node.id,
            parent_id: node.parent_id,
            constraints: format_bounds(&node.bounds),
            objective: None,
            status: NodeStatus::Infeasible,
            solution: NOT_AVAILABLE.to_string(),
        };

        if res.status == SolveStatus::Optimal {
            record.objective = Some(round_to(res.obj_val, 4));
            record.solution = format_solution(&res.x);
        }

        match tree.evaluate(node.id, &res, &self.prob) {
            NodeOutcome::Fathomed(status) => {
                log::debug!("Node {} (depth {}): {}", node.id, node.depth, status);
                record.status = status;
            }
            NodeOutcome::Fractional(decision) => {
                log::debug!(
                    "Node {} (depth {}): branching on x{} = {:.4} (fractionality {:.4})",
                    node.id,
                    node.depth,
                    decision.var,
                    decision.value,
                    decision.score
                );
                record.status = NodeStatus::Branched;

                let (down_id, up_id) = tree.child_ids();
                let down = node.child(down_id, decision.down_branch, res.obj_val);
                let up = node.child(up_id, decision.up_branch, res.obj_val);

                // Down child is explored first
                tree.enqueue(up);
                tree.enqueue(down);
            }
        }

        self.history.push(record);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::MipStatus;
    use lp_core::ProblemData;

    fn solver(c: Vec<f64>, a: Vec<Vec<f64>>, b: Vec<f64>, ints: Vec<usize>) -> BranchAndBoundSolver {
        let lp = ProblemData::new(c, a, b).unwrap();
        let mip = MipProblem::new(lp, ints).unwrap();
        BranchAndBoundSolver::new(mip, MipSettings::default())
    }

    #[test]
    fn test_integral_root_is_a_leaf() {
        let mut bnb = solver(vec![1.0, 1.0], vec![vec![1.0, 1.0]], vec![10.0], vec![0, 1]);
        let sol = bnb.solve();

        assert_eq!(sol.status, MipStatus::Optimal);
        assert_eq!(sol.nodes_explored, 1);
        assert_eq!(sol.obj_val, 0.0);

        let history = bnb.history();
        assert_eq!(history.len(), 1);
        assert_eq!(history[0].id, 1);
        assert_eq!(history[0].parent_id, None);
        assert_eq!(history[0].constraints, "Root");
        assert_eq!(history[0].status, NodeStatus::IntegerFound);
        assert_eq!(history[0].solution, "[0, 0]");
    }

    #[test]
    fn test_triangle_tree() {
        // max x1  s.t.  3x0 + 2x1 <= 6,  -3x0 + 2x1 <= 0
        let mut bnb = solver(
            vec![0.0, -1.0],
            vec![vec![3.0, 2.0], vec![-3.0, 2.0]],
            vec![6.0, 0.0],
            vec![0, 1],
        );
        let sol = bnb.solve();

        assert_eq!(sol.status, MipStatus::Optimal);
        assert!((sol.obj_val + 1.0).abs() < 1e-9);

        let history = bnb.history();
        assert_eq!(history[0].status, NodeStatus::Branched);
        assert_eq!(history[0].objective, Some(-1.5));
        assert_eq!(history[0].solution, "[1, 1.5]");

        // Root branches on x1 = 1.5
        assert_eq!(history[1].id, 2);
        assert_eq!(history[1].parent_id, Some(1));
        assert_eq!(history[1].constraints, "x1 <= 1");
        assert_eq!(history[2].constraints, "x1 >= 2");
        assert_eq!(history[2].status, NodeStatus::Infeasible);
        assert_eq!(history[2].objective, None);
    }

    #[test]
    fn test_down_child_visited_first() {
        let mut bnb = solver(
            vec![0.0, -1.0],
            vec![vec![3.0, 2.0], vec![-3.0, 2.0]],
            vec![6.0, 0.0],
            vec![0, 1],
        );
        bnb.solve();

        let order: Vec<u64> = bnb.visit_order().iter().map(|r| r.id).collect();
        assert_eq!(&order[..2], &[1, 2]);
    }

    #[test]
    fn test_node_limit() {
        let lp = ProblemData::new(
            vec![0.0, -1.0],
            vec![vec![3.0, 2.0], vec![-3.0, 2.0]],
            vec![6.0, 0.0],
        )
        .unwrap();
        let mip = MipProblem::new(lp, vec![0, 1]).unwrap();
        let mut bnb = BranchAndBoundSolver::new(mip, MipSettings::default().with_max_nodes(1));

        let sol = bnb.solve();
        assert_eq!(sol.status, MipStatus::NodeLimit);
        assert_eq!(sol.nodes_explored, 1);
        assert!(sol.x.is_empty());
    }

    #[test]
    fn test_unbounded_relaxation() {
        // min -x0 - x1  s.t.  x0 <= 2.5, x1 unrestricted above
        let mut bnb = solver(vec![-1.0, -1.0], vec![vec![1.0, 0.0]], vec![2.5], vec![0]);
        let sol = bnb.solve();

        assert_eq!(sol.status, MipStatus::Unbounded);
        assert_eq!(bnb.history()[0].status, NodeStatus::Unbounded);
    }
}
