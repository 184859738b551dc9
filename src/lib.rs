//! Primal simplex solver for linear programs of the form
//! `min c·x  s.t.  A·x ≤ b, x ≥ 0` with `b ≥ 0`.
//!
//! Every pivot is recorded as a [`simplex::Snapshot`] so that the whole run
//! can be inspected or rendered afterwards.

mod helpers;
pub mod plan;
pub mod simplex;

pub use plan::{Activity, ProductionPlan, ResourceUsage};
pub use simplex::{
    Options, Outcome, Problem, ProblemError, SimplexTable, Snapshot, Solution, Solved, Step,
    Variable,
};
