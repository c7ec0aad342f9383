//! Branch-and-cut driver.
//!
//! Same depth-first search as [`crate::bnb`], but every node owns a copy of
//! its constraint system. While a node's relaxation stays fractional, Gomory
//! cuts derived from the final tableau are appended to that system and the
//! node is re-solved, up to `max_cuts_per_node` times. Only then does it
//! branch, and the children inherit the cuts.

use lp_core::{DualSimplexSolver, SolveResult, SolveStatus};

use crate::model::{MipProblem, MipSolution};
use crate::search::{CutNode, NodeOutcome, NodeStatus, SearchTree};
use crate::settings::MipSettings;
use crate::trace::{
    format_cut, format_solution, round_to, BcHistory, BcNodeRecord, CutRecord, CutStatus,
    CutType, NOT_AVAILABLE,
};

/// Branch-and-cut solver.
pub struct BranchAndCutSolver {
    /// Problem to solve.
    prob: MipProblem,

    /// Settings.
    settings: MipSettings,

    /// Node records of the last solve, in visitation order.
    nodes: Vec<BcNodeRecord>,

    /// Cut records of the last solve, in generation order.
    cuts: Vec<CutRecord>,
}

impl BranchAndCutSolver {
    /// Create a solver for `prob`.
    pub fn new(prob: MipProblem, settings: MipSettings) -> Self {
        Self {
            prob,
            settings,
            nodes: Vec::new(),
            cuts: Vec::new(),
        }
    }

    /// Run the search.
    ///
    /// Every call starts from scratch: fresh incumbent, counters, and trace.
    pub fn solve(&mut self) -> MipSolution {
        self.nodes.clear();
        self.cuts.clear();

        if self.settings.verbose {
            log::info!(
                "Branch-and-cut: {} vars ({} integer), {} constraints, up to {} cuts per node",
                self.prob.num_vars(),
                self.prob.num_integers(),
                self.prob.num_constraints(),
                self.settings.max_cuts_per_node
            );
        }

        let mut tree = SearchTree::new(self.settings.clone());
        tree.initialize(CutNode::root(&self.prob.lp));

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

    /// Trace of the last solve: nodes sorted by id, cuts in generation order.
    pub fn history(&self) -> BcHistory {
        let mut nodes = self.nodes.clone();
        nodes.sort_by_key(|r| r.id);

        BcHistory {
            nodes,
            cuts: self.cuts.clone(),
        }
    }

    /// Node records of the last solve, in visitation order.
    pub fn visit_order(&self) -> &[BcNodeRecord] {
        &self.nodes
    }

    fn process_node(&mut self, tree: &mut SearchTree<CutNode>, mut node: CutNode) {
        let mut cuts_applied = 0;
        let mut round = 0;
        // (cut record index, objective before the cut)
        let mut pending: Option<(usize, f64)> = None;

        loop {
            round += 1;
            let mut solver = DualSimplexSolver::new(&node.lp, self.settings.lp_settings.clone());
            let res = solver.solve();

            if let Some((idx, before)) = pending.take() {
                if res.status == SolveStatus::Optimal {
                    self.cuts[idx].improvement = Some(res.obj_val - before);
                }
            }

            let decision = match tree.evaluate(node.id, &res, &self.prob) {
                NodeOutcome::Fathomed(status) => {
                    log::debug!(
                        "Node {} (depth {}): {} after {} cuts",
                        node.id,
                        node.depth,
                        status,
                        cuts_applied
                    );
                    self.record_node(&node, status, &res, cuts_applied);
                    return;
                }
                NodeOutcome::Fractional(decision) => decision,
            };

            if cuts_applied < self.settings.max_cuts_per_node {
                let cut = solver.generate_gomory_cut(
                    self.prob.integer_vars(),
                    &node.lp.A,
                    &node.lp.b,
                );

                match cut {
                    Some(cut) if cut.is_finite() => {
                        let constraint = format_cut(&cut.coefs, cut.rhs);
                        log::debug!("Node {} round {}: cut {}", node.id, round, constraint);

                        self.log_cut(node.id, round, CutStatus::Applied, constraint);
                        pending = Some((self.cuts.len() - 1, res.obj_val));

                        node.add_cut(&cut);
                        cuts_applied += 1;
                        tree.cuts_added(1);
                        continue;
                    }
                    Some(_) => {
                        log::warn!("Node {} round {}: non-finite cut discarded", node.id, round);
                        self.log_cut(
                            node.id,
                            round,
                            CutStatus::RejectedNumerical,
                            NOT_AVAILABLE.to_string(),
                        );
                    }
                    None => {
                        self.log_cut(
                            node.id,
                            round,
                            CutStatus::RejectedTooWeak,
                            NOT_AVAILABLE.to_string(),
                        );
                    }
                }
            }

            log::debug!(
                "Node {} (depth {}): branching on x{} = {:.4} (fractionality {:.4}) after {} cuts",
                node.id,
                node.depth,
                decision.var,
                decision.value,
                decision.score,
                cuts_applied
            );
            self.record_node(&node, NodeStatus::Branched, &res, cuts_applied);

            let (down_id, up_id) = tree.child_ids();
            let down = node.child(down_id, decision.down_branch, res.obj_val);
            let up = node.child(up_id, decision.up_branch, res.obj_val);

            // Down child is explored first
            tree.enqueue(up);
            tree.enqueue(down);
            return;
        }
    }

    fn record_node(
        &mut self,
        node: &CutNode,
        status: NodeStatus,
        res: &SolveResult,
        cuts_applied: usize,
    ) {
        let solved = res.status == SolveStatus::Optimal;

        self.nodes.push(BcNodeRecord {
            id: node.id,
            parent_id: node.parent_id,
            depth: node.depth,
            status,
            objective: solved.then(|| round_to(res.obj_val, 4)),
            solution: if solved {
                format_solution(&res.x)
            } else {
                NOT_AVAILABLE.to_string()
            },
            cuts_applied,
        });
    }

    fn log_cut(&mut self, node_id: u64, iteration: usize, status: CutStatus, constraint: String) {
        self.cuts.push(CutRecord {
            node_id,
            iteration,
            cut_type: CutType::Gomory,
            status,
            constraint,
            improvement: None,
        });
    }
}
