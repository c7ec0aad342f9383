//! Dense-tableau simplex engine.

mod dual;
mod gomory;
mod tableau;

pub use dual::DualSimplexSolver;
pub use gomory::LinearCut;
pub use tableau::Tableau;
