use std::fmt;

use derive_more::{Display, IsVariant};
use nalgebra::DMatrix;
use serde::Serialize;

/// A column of the tableau other than the right-hand side.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display, IsVariant, Serialize)]
pub enum Variable {
    /// Original decision variable, 0-based. Displayed 1-based as `x{k}`.
    #[display(fmt = "x{}", "_0 + 1")]
    Decision(usize),
    /// Slack of the constraint with the given 0-based row. Displayed as `s{k}`.
    #[display(fmt = "s{}", "_0 + 1")]
    Slack(usize),
}

impl Variable {
    pub fn from_column(column: usize, n_variables: usize) -> Self {
        if column < n_variables {
            Self::Decision(column)
        } else {
            Self::Slack(column - n_variables)
        }
    }

    pub fn column(self, n_variables: usize) -> usize {
        match self {
            Self::Decision(k) => k,
            Self::Slack(k) => n_variables + k,
        }
    }
}

/// Copy of the tableau and basis taken right after a pivot (or before the
/// first one, for iteration 0).
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Snapshot {
    iteration: usize,
    tableau: DMatrix<f64>,
    basis: Vec<usize>,
    description: String,
    entering: Option<Variable>,
    leaving: Option<Variable>,
}

impl Snapshot {
    pub(crate) fn initial(tableau: &DMatrix<f64>, basis: &[usize]) -> Self {
        Self {
            iteration: 0,
            tableau: tableau.clone_owned(),
            basis: basis.to_vec(),
            description: "initial tableau".to_owned(),
            entering: None,
            leaving: None,
        }
    }

    pub(crate) fn after_pivot(
        iteration: usize,
        tableau: &DMatrix<f64>,
        basis: &[usize],
        entering: Variable,
        leaving: Variable,
    ) -> Self {
        Self {
            iteration,
            tableau: tableau.clone_owned(),
            basis: basis.to_vec(),
            description: format!("iteration {iteration}: {entering} enters, {leaving} leaves"),
            entering: Some(entering),
            leaving: Some(leaving),
        }
    }

    pub fn iteration(&self) -> usize {
        self.iteration
    }

    /// `(m+1) × (n+m+1)`; the last row is the objective row.
    pub fn tableau(&self) -> &DMatrix<f64> {
        &self.tableau
    }

    /// Column index of the basic variable of each constraint row.
    pub fn basis(&self) -> &[usize] {
        &self.basis
    }

    pub fn description(&self) -> &str {
        &self.description
    }

    pub fn entering(&self) -> Option<Variable> {
        self.entering
    }

    pub fn leaving(&self) -> Option<Variable> {
        self.leaving
    }

    pub fn n_variables(&self) -> usize {
        self.tableau.ncols() - 1 - self.basis.len()
    }

    pub fn basis_labels(&self) -> Vec<Variable> {
        let n = self.n_variables();
        self.basis
            .iter()
            .map(|&column| Variable::from_column(column, n))
            .collect()
    }

    /// Value of the maximized objective at this vertex (last entry of the
    /// objective row).
    pub fn objective_value(&self) -> f64 {
        self.tableau[(self.tableau.nrows() - 1, self.tableau.ncols() - 1)]
    }
}

impl fmt::Display for Snapshot {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let n = self.n_variables();
        let width = f.precision().map_or(10, |p| p + 8);
        let precision = f.precision().unwrap_or(2);

        writeln!(f, "{}", self.description)?;
        write!(f, "{:>6}", "basis")?;
        for column in 0..self.tableau.ncols() - 1 {
            write!(f, "{:>width$}", Variable::from_column(column, n).to_string())?;
        }
        writeln!(f, "{:>width$}", "rhs")?;

        let labels = self.basis_labels();
        for (i, row) in self.tableau.row_iter().enumerate() {
            let label = labels.get(i).map_or_else(|| "F".to_owned(), Variable::to_string);
            write!(f, "{label:>6}")?;
            for value in row.iter() {
                write!(f, "{value:>width$.precision$}")?;
            }
            writeln!(f)?;
        }
        Ok(())
    }
}
