//! Configuration settings for the MIP drivers.

use lp_core::tolerance::INTEGRALITY_TOL;
use lp_core::SolverSettings;

/// Branching variable selection rule.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum BranchingRule {
    /// Lowest-index integer variable with a fractional value.
    ///
    /// Fixes the shape of the search tree, so traces are reproducible
    /// across runs and across drivers.
    #[default]
    FirstFractional,

    /// Select variable with fractional part closest to 0.5.
    MostFractional,
}

/// MIP solver settings.
#[derive(Debug, Clone)]
pub struct MipSettings {
    // === Termination criteria ===
    /// Maximum number of nodes to pop from the stack.
    pub max_nodes: u64,

    /// Integer feasibility tolerance.
    /// A variable is considered integer if |x - round(x)| <= int_feas_tol.
    pub int_feas_tol: f64,

    // === Search strategy ===
    /// Branching variable selection rule.
    pub branching_rule: BranchingRule,

    // === Cut settings ===
    /// Maximum Gomory cuts added at a single node before branching.
    pub max_cuts_per_node: usize,

    // === Relaxation settings ===
    /// Settings for every LP relaxation solve.
    pub lp_settings: SolverSettings,

    // === Output ===
    /// Print progress information.
    pub verbose: bool,

    /// Log frequency (print every N nodes).
    pub log_freq: u64,
}

impl Default for MipSettings {
    fn default() -> Self {
        Self {
            // Termination
            max_nodes: 1_000_000,
            int_feas_tol: INTEGRALITY_TOL,

            // Search
            branching_rule: BranchingRule::default(),

            // Cuts
            max_cuts_per_node: 5,

            // Relaxations
            lp_settings: SolverSettings::default(),

            // Output
            verbose: false,
            log_freq: 100,
        }
    }
}

impl MipSettings {
    /// Create settings with verbose output enabled.
    pub fn verbose() -> Self {
        Self {
            verbose: true,
            log_freq: 1,
            ..Self::default()
        }
    }

    /// Set maximum nodes.
    pub fn with_max_nodes(mut self, nodes: u64) -> Self {
        self.max_nodes = nodes;
        self
    }

    /// Set the per-node cut cap.
    pub fn with_max_cuts(mut self, cuts: usize) -> Self {
        self.max_cuts_per_node = cuts;
        self
    }

    /// Set the branching rule.
    pub fn with_branching_rule(mut self, rule: BranchingRule) -> Self {
        self.branching_rule = rule;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let s = MipSettings::default();
        assert_eq!(s.max_cuts_per_node, 5);
        assert_eq!(s.branching_rule, BranchingRule::FirstFractional);
        assert_eq!(s.int_feas_tol, 1e-5);
        assert_eq!(s.lp_settings.max_iter, 1000);
        assert!(!s.verbose);
    }

    #[test]
    fn test_builders() {
        let s = MipSettings::verbose()
            .with_max_nodes(10)
            .with_max_cuts(0)
            .with_branching_rule(BranchingRule::MostFractional);

        assert!(s.verbose);
        assert_eq!(s.log_freq, 1);
        assert_eq!(s.max_nodes, 10);
        assert_eq!(s.max_cuts_per_node, 0);
        assert_eq!(s.branching_rule, BranchingRule::MostFractional);
    }
}
