//! Numeric tolerances shared by the simplex engine and the search drivers.
//!
//! Every threshold the algorithms compare against lives here so the engine
//! and the drivers can never disagree on what "zero" or "integral" means.

/// Zero check for tableau entries: dual-feasibility test, RHS sign test,
/// dual ratio test candidates and row elimination.
pub const PIVOT_TOL: f64 = 1e-10;

/// Zero check for the primal phase: entering reduced cost threshold and
/// ratio test denominators. Also the cut-off below which a fractional cut
/// coefficient is treated as integral.
pub const RATIO_TOL: f64 = 1e-9;

/// Guard added before flooring so that values like `2.9999999999` floor to 3.
pub const FLOOR_TOL: f64 = 1e-10;

/// Distance to the nearest integer under which a value counts as integral.
pub const INTEGRALITY_TOL: f64 = 1e-5;

/// Constraint satisfaction tolerance used when checking extracted solutions.
pub const FEASIBILITY_TOL: f64 = 1e-6;

/// Fractional part of `v`, guarded against values sitting just below an
/// integer.
#[inline]
pub fn frac(v: f64) -> f64 {
    v - (v + FLOOR_TOL).floor()
}

/// Distance from `v` to its nearest integer.
#[inline]
pub fn fractionality(v: f64) -> f64 {
    (v - v.round()).abs()
}
