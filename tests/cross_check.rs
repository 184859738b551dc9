use microlp::{ComparisonOp, OptimizationDirection};
use nalgebra::{DMatrix, DVector, RowDVector};
use proptest::prelude::*;
use tableau_simplex::{Outcome, Problem};

/// Optimal value of `max profit·x, A·x <= b, x >= 0` according to `microlp`.
fn reference_optimum(problem: &Problem) -> f64 {
    let mut lp = microlp::Problem::new(OptimizationDirection::Maximize);
    let vars: Vec<_> = problem
        .profit()
        .iter()
        .map(|&p| lp.add_var(p, (0., f64::INFINITY)))
        .collect();
    for (row, &limit) in problem.constraints().row_iter().zip(problem.rhs().iter()) {
        let expr: Vec<_> = vars.iter().copied().zip(row.iter().copied()).collect();
        lp.add_constraint(expr, ComparisonOp::Le, limit);
    }
    lp.solve().unwrap().objective()
}

fn assert_agrees(problem: Problem, tolerance: f64) {
    let expected = reference_optimum(&problem);
    let solved = problem.solve();
    let Outcome::Optimal(solution) = &solved.outcome else {
        panic!("expected an optimal outcome, got {}", solved.outcome);
    };
    assert!(
        (solution.value() - expected).abs() <= tolerance,
        "simplex: {}, reference: {expected}",
        solution.value()
    );
}

#[test]
fn production_example_matches_reference_solver() {
    let problem = Problem::maximize(
        RowDVector::from_row_slice(&[300., 260., 320., 400., 450.]),
        DMatrix::from_row_slice(
            4,
            5,
            &[
                15., 20., 12., 14., 18., //
                0.2, 0.3, 0.15, 0.25, 0.3, //
                4., 5., 6., 3., 2., //
                5., 3., 4., 6., 3., //
            ],
        ),
        DVector::from_column_slice(&[2000., 300., 1000., 1600.]),
    )
    .unwrap();

    assert_agrees(problem, 1e-3);
}

#[test]
fn textbook_problem_matches_reference_solver() {
    // max 3x1 + 5x2  s.t.  x1 <= 4, 2x2 <= 12, 3x1 + 2x2 <= 18
    let problem = Problem::from_rows(
        &[-3., -5.],
        &[vec![1., 0.], vec![0., 2.], vec![3., 2.]],
        &[4., 12., 18.],
    )
    .unwrap();

    assert_agrees(problem, 1e-9);
}

fn floats(values: Vec<i32>) -> Vec<f64> {
    values.into_iter().map(f64::from).collect()
}

fn bounded_problem() -> impl Strategy<Value = Problem> {
    (1usize..=4, 1usize..=4)
        .prop_flat_map(|(m, n)| {
            (
                prop::collection::vec(-9i32..=9, n),
                prop::collection::vec(prop::collection::vec(1i32..=9, n), m),
                prop::collection::vec(0i32..=50, m),
            )
        })
        .prop_map(|(objective, constraints, rhs)| {
            let constraints: Vec<Vec<f64>> = constraints.into_iter().map(floats).collect();
            Problem::from_rows(&floats(objective), &constraints, &floats(rhs)).unwrap()
        })
}

proptest! {
    #[test]
    fn optimum_matches_reference_solver(problem in bounded_problem()) {
        let expected = reference_optimum(&problem);
        let solved = problem.solve();

        prop_assert!(!solved.outcome.is_unbounded());
        if let Outcome::Optimal(solution) = &solved.outcome {
            prop_assert!(
                (solution.value() - expected).abs() <= 1e-6 * (1. + expected.abs()),
                "simplex: {}, reference: {}",
                solution.value(),
                expected
            );
        }
    }
}
