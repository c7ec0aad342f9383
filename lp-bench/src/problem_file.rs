//! JSON problem files.
//!
//! ```json
//! {
//!   "c": [5, 4],
//!   "A": [[6, 4], [1, 2]],
//!   "b": [24, 6],
//!   "integer_vars": [0, 1],
//!   "maximize": true
//! }
//! ```
//!
//! Constraints are `A x <= b` with `x >= 0`. The sense flip for `maximize`
//! happens here; the solvers only ever minimize.

use std::fs::File;
use std::io::BufReader;
use std::path::Path;

use anyhow::{Context, Result};
use lp_core::ProblemData;
use serde::{Deserialize, Serialize};

/// A problem as stored on disk.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProblemFile {
    /// Objective coefficients in the file's own sense
    pub c: Vec<f64>,
    /// Constraint matrix, row-major
    #[serde(rename = "A", alias = "a")]
    pub a: Vec<Vec<f64>>,
    /// Right-hand side
    pub b: Vec<f64>,
    /// Integer-restricted variable indices
    #[serde(default)]
    pub integer_vars: Vec<usize>,
    /// Objective sense
    #[serde(default)]
    pub maximize: bool,
}

impl ProblemFile {
    /// Load from JSON file
    pub fn load_json<P: AsRef<Path>>(path: P) -> Result<Self> {
        let file = File::open(path.as_ref())
            .with_context(|| format!("Failed to open file {}", path.as_ref().display()))?;
        let reader = BufReader::new(file);
        serde_json::from_reader(reader)
            .with_context(|| format!("Failed to parse JSON from {}", path.as_ref().display()))
    }

    /// Canonical minimization problem.
    pub fn to_problem(&self) -> Result<ProblemData> {
        let c = if self.maximize {
            self.c.iter().map(|v| -v).collect()
        } else {
            self.c.clone()
        };

        ProblemData::new(c, self.a.clone(), self.b.clone()).context("Invalid problem data")
    }

    /// Objective value in the file's own sense.
    pub fn report_objective(&self, min_obj: f64) -> f64 {
        if self.maximize {
            -min_obj
        } else {
            min_obj
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_and_flip() {
        let json = r#"{ "c": [5, 4], "A": [[6, 4], [1, 2]], "b": [24, 6],
                        "integer_vars": [0, 1], "maximize": true }"#;
        let file: ProblemFile = serde_json::from_str(json).unwrap();
        let prob = file.to_problem().unwrap();

        assert_eq!(prob.c, vec![-5.0, -4.0]);
        assert_eq!(file.integer_vars, vec![0, 1]);
        assert_eq!(file.report_objective(-20.0), 20.0);
    }

    #[test]
    fn defaults_and_validation() {
        let json = r#"{ "c": [1, 1], "a": [[1, 1]], "b": [10] }"#;
        let file: ProblemFile = serde_json::from_str(json).unwrap();

        assert!(file.integer_vars.is_empty());
        assert!(!file.maximize);
        assert_eq!(file.report_objective(3.0), 3.0);

        let bad = ProblemFile {
            b: vec![],
            ..file
        };
        assert!(bad.to_problem().is_err());
    }
}
