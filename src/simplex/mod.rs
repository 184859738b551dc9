mod options;
mod problem;
mod snapshot;
mod solution;
mod table;

pub use options::{Options, DEFAULT_ITERATION_CAP};
pub use problem::*;
pub use snapshot::{Snapshot, Variable};
pub use solution::{Outcome, Solution, Solved};
pub use table::{SimplexTable, Step};
