use std::fmt;

use derive_more::{Display, Error};
use nalgebra::{DMatrix, DVector, RowDVector};
use serde::Serialize;

use crate::ensure_shape;

use super::{Options, SimplexTable, Solved};


#[derive(Debug, Clone, PartialEq, Display, Error)]
pub enum ProblemError {
    #[display(fmt = "problem has no {}", what)]
    Empty { what: &'static str },
    #[display(fmt = "{} mismatch: expected {}, got {}", what, expected, actual)]
    ShapeMismatch {
        what: &'static str,
        expected: usize,
        actual: usize,
    },
    #[display(
        fmt = "constraint row {} has {} coefficients, expected {}",
        row,
        actual,
        expected
    )]
    RaggedRow {
        row: usize,
        expected: usize,
        actual: usize,
    },
    #[display(fmt = "{} contains a non-finite value", what)]
    NonFinite { what: &'static str },
    #[display(
        fmt = "right-hand side of constraint {} is negative ({}), the origin is not feasible",
        row,
        value
    )]
    NegativeRhs { row: usize, value: f64 },
}

/// `min objective·x` subject to `constraints·x ≤ rhs` and `x ≥ 0`.
///
/// A problem can only be built through [`Problem::new`] (or one of its
/// wrappers), so every value of this type has consistent dimensions, finite
/// coefficients and a non-negative right-hand side.
#[derive(Debug, Clone, PartialEq, Display, Serialize)]
#[display(
    fmt = "Problem {{\n    objective:\n{}    constraints:\n{}    rhs:\n{}}}",
    "indented(objective)",
    "indented(constraints)",
    "indented(rhs)"
)]
pub struct Problem {
    pub(crate) objective: RowDVector<f64>,
    pub(crate) constraints: DMatrix<f64>,
    pub(crate) rhs: DVector<f64>,
}

impl Problem {
    /// `objective` is taken in minimization form: to maximize `p·x` pass `-p`,
    /// or use [`Problem::maximize`].
    pub fn new(
        objective: RowDVector<f64>,
        constraints: DMatrix<f64>,
        rhs: DVector<f64>,
    ) -> Result<Self, ProblemError> {
        let (m, n) = constraints.shape();
        if m == 0 {
            return Err(ProblemError::Empty {
                what: "constraints",
            });
        }
        if n == 0 {
            return Err(ProblemError::Empty {
                what: "decision variables",
            });
        }
        ensure_shape!("objective length", n, objective.ncols());
        ensure_shape!("right-hand side length", m, rhs.nrows());

        if !objective.iter().all(|c| c.is_finite()) {
            return Err(ProblemError::NonFinite { what: "objective" });
        }
        if !constraints.iter().all(|a| a.is_finite()) {
            return Err(ProblemError::NonFinite {
                what: "constraint matrix",
            });
        }
        if !rhs.iter().all(|b| b.is_finite()) {
            return Err(ProblemError::NonFinite {
                what: "right-hand side",
            });
        }
        if let Some((row, &value)) = rhs.iter().enumerate().find(|(_, b)| **b < 0.) {
            return Err(ProblemError::NegativeRhs { row, value });
        }

        log::debug!("Problem of {m} constraints over {n} variables accepted");
        Ok(Self {
            objective,
            constraints,
            rhs,
        })
    }

    /// Builds the problem `max profit·x` by negating `profit`.
    pub fn maximize(
        profit: RowDVector<f64>,
        constraints: DMatrix<f64>,
        rhs: DVector<f64>,
    ) -> Result<Self, ProblemError> {
        Self::new(-profit, constraints, rhs)
    }

    /// Same as [`Problem::new`], from row-major slices.
    pub fn from_rows(
        objective: &[f64],
        constraints: &[Vec<f64>],
        rhs: &[f64],
    ) -> Result<Self, ProblemError> {
        let ncols = constraints.first().map_or(0, Vec::len);
        if let Some((row, coefficients)) = constraints
            .iter()
            .enumerate()
            .find(|(_, coefficients)| coefficients.len() != ncols)
        {
            return Err(ProblemError::RaggedRow {
                row,
                expected: ncols,
                actual: coefficients.len(),
            });
        }

        Self::new(
            RowDVector::from_row_slice(objective),
            DMatrix::from_fn(constraints.len(), ncols, |i, j| constraints[i][j]),
            DVector::from_column_slice(rhs),
        )
    }

    pub fn objective(&self) -> &RowDVector<f64> {
        &self.objective
    }

    /// Coefficients of the maximized objective, i.e. the negated objective.
    pub fn profit(&self) -> RowDVector<f64> {
        -&self.objective
    }

    pub fn constraints(&self) -> &DMatrix<f64> {
        &self.constraints
    }

    pub fn rhs(&self) -> &DVector<f64> {
        &self.rhs
    }

    /// `n`, the number of decision variables.
    pub fn n_variables(&self) -> usize {
        self.constraints.ncols()
    }

    /// `m`, the number of constraints (and of slack variables).
    pub fn n_constraints(&self) -> usize {
        self.constraints.nrows()
    }

    pub fn solve(self) -> Solved {
        self.solve_with(Options::default())
    }

    pub fn solve_with(self, options: Options) -> Solved {
        let mut table = SimplexTable::with_options(self, options);
        let outcome = table.solve();
        Solved {
            outcome,
            history: table.into_history(),
        }
    }
}

fn indented(value: &impl fmt::Display) -> String {
    value
        .to_string()
        .trim()
        .lines()
        .map(|l| format!("        {}\n", l.trim()))
        .collect()
}
