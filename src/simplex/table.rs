use derive_more::IsVariant;
use nalgebra::{DMatrix, DVector};

use crate::dbg_display;

use super::{Options, Outcome, Problem, Snapshot, Solution, Variable};


/// What a single call to [`SimplexTable::step`] did.
#[derive(Debug, Clone, PartialEq, IsVariant)]
pub enum Step {
    Pivoted { entering: Variable, leaving: Variable },
    Finished(Outcome),
}

#[derive(Debug, Clone, PartialEq)]
pub struct SimplexTable {
    problem: Problem,
    options: Options,
    /// (m+1) x (n+m+1): constraint rows, then the objective row.
    /// Empty until the first step.
    tableau: DMatrix<f64>,
    /// Column of the basic variable of each constraint row
    basis: Vec<usize>,
    history: Vec<Snapshot>,
    /// Pivots performed so far
    iteration: usize,
    outcome: Option<Outcome>,
}

impl SimplexTable {
    pub fn new(problem: Problem) -> Self {
        Self::with_options(problem, Options::default())
    }

    pub fn with_options(problem: Problem, options: Options) -> Self {
        Self {
            problem,
            options,
            tableau: DMatrix::zeros(0, 0),
            basis: Vec::new(),
            history: Vec::new(),
            iteration: 0,
            outcome: None,
        }
    }

    pub fn problem(&self) -> &Problem {
        &self.problem
    }

    pub fn options(&self) -> Options {
        self.options
    }

    pub fn tableau(&self) -> &DMatrix<f64> {
        &self.tableau
    }

    pub fn basis(&self) -> &[usize] {
        &self.basis
    }

    /// Number of pivots performed so far.
    pub fn iteration(&self) -> usize {
        self.iteration
    }

    /// Every tableau visited, starting with the initial one.
    pub fn history(&self) -> &[Snapshot] {
        &self.history
    }

    pub fn into_history(self) -> Vec<Snapshot> {
        self.history
    }

    /// `None` while the solve is still in progress.
    pub fn outcome(&self) -> Option<&Outcome> {
        self.outcome.as_ref()
    }

    /// Pivots until the tableau is optimal, the problem turns out unbounded
    /// or the iteration cap is hit.
    pub fn solve(&mut self) -> Outcome {
        loop {
            if let Step::Finished(outcome) = self.step() {
                return outcome;
            }
        }
    }

    /// Performs at most one pivot. Once finished, keeps returning the same
    /// outcome without touching the tableau.
    pub fn step(&mut self) -> Step {
        if let Some(outcome) = &self.outcome {
            return Step::Finished(outcome.clone());
        }
        if self.history.is_empty() {
            self.start();
        }
        log::debug!("Tableau:{}", self.tableau);

        let Some(pivot_col) = self.entering_column() else {
            log::info!("Optimal solution was found after {} pivots", self.iteration);
            return self.finish(Outcome::Optimal(self.current_solution()));
        };
        if self.iteration >= self.options.iteration_cap {
            log::warn!(
                "Iteration cap of {} reached before optimality",
                self.options.iteration_cap
            );
            return self.finish(Outcome::IterationCap(self.current_solution()));
        }

        let n = self.problem.n_variables();
        let entering = Variable::from_column(pivot_col, n);
        log::info!("Pivot column: {pivot_col} ({entering})");

        let Some(pivot_row) = self.leaving_row(pivot_col) else {
            log::info!("No row limits {entering}, the objective is unbounded");
            return self.finish(Outcome::Unbounded { entering });
        };
        let leaving = Variable::from_column(self.basis[pivot_row], n);
        log::info!("Pivot row: {pivot_row} ({leaving})");

        self.pivot(pivot_row, pivot_col);
        self.iteration += 1;
        log::info!("Iteration: {}", self.iteration);

        self.history.push(Snapshot::after_pivot(
            self.iteration,
            &self.tableau,
            &self.basis,
            entering,
            leaving,
        ));
        Step::Pivoted { entering, leaving }
    }

    fn start(&mut self) {
        let (m, n) = self.problem.constraints.shape();
        let mut tableau = DMatrix::<f64>::zeros(m + 1, n + m + 1);
        tableau
            .slice_mut((0, 0), (m, n))
            .copy_from(&self.problem.constraints);
        tableau.slice_mut((0, n), (m, m)).fill_with_identity();
        tableau
            .slice_mut((0, n + m), (m, 1))
            .copy_from(&self.problem.rhs);
        tableau
            .slice_mut((m, 0), (1, n))
            .copy_from(&self.problem.objective);

        self.tableau = tableau;
        self.basis = (n..n + m).collect();
        self.history
            .push(Snapshot::initial(&self.tableau, &self.basis));
    }

    fn finish(&mut self, outcome: Outcome) -> Step {
        self.outcome = Some(outcome.clone());
        Step::Finished(outcome)
    }

    fn objective_row(&self) -> usize {
        self.basis.len()
    }

    fn rhs_col(&self) -> usize {
        self.tableau.ncols() - 1
    }

    /// Column with the most negative reduced cost, the first one on ties.
    /// `None` when no reduced cost is negative.
    fn entering_column(&self) -> Option<usize> {
        let row = self.objective_row();
        first_min((0..self.rhs_col()).filter_map(|j| {
            let reduced_cost = self.tableau[(row, j)];
            (reduced_cost < 0.).then_some((j, reduced_cost))
        }))
    }

    /// Minimum ratio test over the rows with a positive entry in `pivot_col`,
    /// the first row on ties.
    fn leaving_row(&self, pivot_col: usize) -> Option<usize> {
        let rhs_col = self.rhs_col();
        first_min((0..self.objective_row()).filter_map(|i| {
            let el = self.tableau[(i, pivot_col)];
            (el > 0.).then(|| (i, self.tableau[(i, rhs_col)] / el))
        }))
    }

    fn pivot(&mut self, pivot_row: usize, pivot_col: usize) {
        let pivot_el = dbg_display!(self.tableau[(pivot_row, pivot_col)]);

        // divide the pivot row by the pivot element
        self.tableau.row_mut(pivot_row).apply(|el| *el /= pivot_el);

        // subtract the pivot row from the others till the pivot column is a unit vector
        let pivot_row_values = self.tableau.row(pivot_row).clone_owned();
        for i in (0..self.tableau.nrows()).filter(|i| *i != pivot_row) {
            let multiplier = self.tableau[(i, pivot_col)];
            self.tableau
                .row_mut(i)
                .zip_apply(&pivot_row_values, |el, pivot_row_el| {
                    *el -= pivot_row_el * multiplier
                });
        }

        self.basis[pivot_row] = pivot_col;
    }

    fn current_solution(&self) -> Solution {
        let n = self.problem.n_variables();
        let rhs_col = self.rhs_col();
        let variables = DVector::from_iterator(
            n,
            (0..n).map(|j| {
                self.basis
                    .iter()
                    .position(|column| *column == j)
                    .map_or(0., |row| self.tableau[(row, rhs_col)])
            }),
        );
        Solution::new(variables, self.tableau[(self.objective_row(), rhs_col)])
    }
}

/// Index of the smallest value, keeping the first one among equals.
fn first_min(candidates: impl Iterator<Item = (usize, f64)>) -> Option<usize> {
    candidates
        .fold(None, |best: Option<(usize, f64)>, (i, value)| match best {
            Some((_, min)) if min <= value => best,
            _ => Some((i, value)),
        })
        .map(|(i, _)| i)
}
