use serde::{Deserialize, Serialize};

/// Number of pivots after which a solve gives up.
pub const DEFAULT_ITERATION_CAP: usize = 20;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Options {
    /// Upper bound on the number of pivots of one solve. The history of a
    /// solve therefore never holds more than `iteration_cap + 1` snapshots.
    pub iteration_cap: usize,
}

impl Default for Options {
    fn default() -> Self {
        Self {
            iteration_cap: DEFAULT_ITERATION_CAP,
        }
    }
}
