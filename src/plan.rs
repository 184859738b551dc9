//! Interpretation of a solution as a production plan: how long each
//! technology runs, what it yields, and how much of each resource is used.

use derive_new::new;
use serde::Serialize;

use crate::simplex::{Problem, Solution, Variable};

/// Levels at or below this are treated as "not running".
pub const ACTIVE_LEVEL: f64 = 0.001;

/// Utilization, in percent, from which a resource counts as a bottleneck.
pub const LIMITING_UTILIZATION: f64 = 99.;

#[derive(Debug, Clone, Copy, PartialEq, Serialize, new)]
pub struct Activity {
    pub variable: Variable,
    /// Value of the decision variable (e.g. hours of operation)
    pub level: f64,
    /// `level` times the variable's profit coefficient
    pub output: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, new)]
pub struct ResourceUsage {
    pub row: usize,
    pub used: f64,
    pub limit: f64,
    /// `used / limit` in percent
    pub utilization: f64,
}

impl ResourceUsage {
    pub fn is_limiting(&self) -> bool {
        self.utilization >= LIMITING_UTILIZATION
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ProductionPlan {
    activities: Vec<Activity>,
    resources: Vec<ResourceUsage>,
    total_output: f64,
}

impl ProductionPlan {
    pub fn new(problem: &Problem, solution: &Solution) -> Self {
        let x = solution.variables();
        debug_assert_eq!(x.nrows(), problem.n_variables());

        let activities = x
            .iter()
            .zip(problem.profit().iter())
            .enumerate()
            .filter(|(_, (level, _))| **level > ACTIVE_LEVEL)
            .map(|(k, (&level, &profit))| {
                Activity::new(Variable::Decision(k), level, level * profit)
            })
            .collect();

        let used = problem.constraints() * x;
        let resources = used
            .iter()
            .zip(problem.rhs().iter())
            .enumerate()
            .map(|(row, (&used, &limit))| {
                let utilization = if limit == 0. && used.abs() <= ACTIVE_LEVEL {
                    0.
                } else {
                    used / limit * 100.
                };
                ResourceUsage::new(row, used, limit, utilization)
            })
            .collect::<Vec<_>>();

        for resource in resources.iter().filter(|r| r.is_limiting()) {
            log::debug!(
                "Resource {} is limiting: {:.2} of {} used",
                resource.row,
                resource.used,
                resource.limit
            );
        }

        Self {
            activities,
            resources,
            total_output: solution.value(),
        }
    }

    /// Decision variables that are actually used, in variable order.
    pub fn activities(&self) -> &[Activity] {
        &self.activities
    }

    /// One entry per constraint, in row order.
    pub fn resources(&self) -> &[ResourceUsage] {
        &self.resources
    }

    pub fn limiting_resources(&self) -> impl Iterator<Item = &ResourceUsage> {
        self.resources.iter().filter(|r| r.is_limiting())
    }

    pub fn total_output(&self) -> f64 {
        self.total_output
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    fn production_problem() -> Problem {
        Problem::maximize(
            nalgebra::RowDVector::from_row_slice(&[300., 260., 320., 400., 450.]),
            nalgebra::DMatrix::from_row_slice(
                4,
                5,
                &[
                    15., 20., 12., 14., 18., //
                    0.2, 0.3, 0.15, 0.25, 0.3, //
                    4., 5., 6., 3., 2., //
                    5., 3., 4., 6., 3., //
                ],
            ),
            nalgebra::DVector::from_column_slice(&[2000., 300., 1000., 1600.]),
        )
        .unwrap()
    }

    #[test]
    fn plan_lists_running_technologies_only() {
        let problem = production_problem();
        let solution = problem.clone().solve().outcome.optimal().cloned().unwrap();
        let plan = ProductionPlan::new(&problem, &solution);

        assert_eq!(plan.activities().len(), 1);
        let activity = plan.activities()[0];
        assert_eq!(activity.variable, Variable::Decision(3));
        assert!((activity.level - 2000. / 14.).abs() < 1e-9);
        assert!((activity.output - plan.total_output()).abs() < 1e-6);
    }

    #[test]
    fn raw_material_is_the_bottleneck() {
        let problem = production_problem();
        let solution = problem.clone().solve().outcome.optimal().cloned().unwrap();
        let plan = ProductionPlan::new(&problem, &solution);

        let limiting: Vec<usize> = plan.limiting_resources().map(|r| r.row).collect();
        assert_eq!(limiting, [0]);

        let electricity = plan.resources()[1];
        assert!((electricity.used - 0.25 * 2000. / 14.).abs() < 1e-9);
        assert!((electricity.utilization - electricity.used / 3.).abs() < 1e-9);
        assert!(!electricity.is_limiting());
    }

    #[test]
    fn unused_zero_limit_resource_is_idle() {
        let problem = Problem::from_rows(&[-1., -1.], &[vec![1., 1.], vec![0., 1.]], &[4., 0.])
            .unwrap();
        let solution = Solution::new(nalgebra::DVector::from_column_slice(&[4., 0.]), 4.);
        let plan = ProductionPlan::new(&problem, &solution);

        assert_eq!(plan.resources()[1].utilization, 0.);
        assert!(plan.resources()[0].is_limiting());
    }
}
