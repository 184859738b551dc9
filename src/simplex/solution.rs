use derive_more::{Display, IsVariant};
use derive_new::new;
use nalgebra::DVector;
use serde::Serialize;

use super::{Snapshot, Variable};

/// Values of the decision variables at a vertex, together with the value of
/// the maximized objective there.
#[derive(Debug, Clone, PartialEq, Display, Serialize, new)]
#[display(fmt = "x = {:?}, value = {}", "variables.as_slice()", value)]
pub struct Solution {
    variables: DVector<f64>,
    value: f64,
}

impl Solution {
    pub fn variables(&self) -> &DVector<f64> {
        &self.variables
    }

    pub fn value(&self) -> f64 {
        self.value
    }

    pub fn into_parts(self) -> (DVector<f64>, f64) {
        (self.variables, self.value)
    }
}

/// How a solve ended.
#[derive(Debug, Clone, PartialEq, Display, IsVariant, Serialize)]
pub enum Outcome {
    /// Every reduced cost is non-negative.
    #[display(fmt = "optimal: {}", _0)]
    Optimal(Solution),
    /// `entering` can grow without bound: no row passed the ratio test.
    #[display(fmt = "unbounded along {}", entering)]
    Unbounded { entering: Variable },
    /// The pivot budget ran out before optimality. The solution is the
    /// feasible vertex reached so far.
    #[display(fmt = "iteration cap reached: {}", _0)]
    IterationCap(Solution),
}

impl Outcome {
    /// The vertex the solve stopped at, if any.
    pub fn solution(&self) -> Option<&Solution> {
        match self {
            Outcome::Optimal(solution) | Outcome::IterationCap(solution) => Some(solution),
            Outcome::Unbounded { .. } => None,
        }
    }

    pub fn optimal(&self) -> Option<&Solution> {
        match self {
            Outcome::Optimal(solution) => Some(solution),
            _ => None,
        }
    }
}

/// Result of [`Problem::solve`](super::Problem::solve): the outcome and every
/// tableau visited on the way.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Solved {
    pub outcome: Outcome,
    pub history: Vec<Snapshot>,
}

impl Solved {
    pub fn pivots(&self) -> usize {
        self.history.len() - 1
    }
}
