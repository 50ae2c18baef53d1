use super::{solve_least_squares, solve_unweighted_quadratic};
use crate::format_vector;
use veltrack_testing::assert_approx_eq;

#[test]
fn linear_fit_recovers_slope_and_intercept() {
    // Sample times in seconds relative to the newest point, as the strategies feed them.
    let x = [0.0, -0.01, -0.02, -0.03];
    let y: Vec<f32> = x.iter().map(|t| 5.0 + 400.0 * t).collect();
    let w = [1.0; 4];

    let fit = solve_least_squares(&x, &y, &w, 2).expect("line is solvable");

    assert_eq!(fit.degree(), 1);
    assert_approx_eq(fit.coefficients()[0], 5.0, 1e-3, "intercept");
    assert_approx_eq(fit.coefficients()[1], 400.0, 0.05, "slope");
    assert_approx_eq(fit.determination(), 1.0, 1e-3, "R²");
}

#[test]
fn quadratic_fit_matches_closed_form() {
    let x = [-2.0, -1.0, 0.0, 1.0, 2.0];
    let y: Vec<f32> = x.iter().map(|t| 1.0 + 2.0 * t + 3.0 * t * t).collect();
    let w = [1.0; 5];

    let fit = solve_least_squares(&x, &y, &w, 3).expect("parabola is solvable");
    let closed = solve_unweighted_quadratic(&x, &y).expect("closed form is solvable");

    for (i, expected) in [1.0, 2.0, 3.0].into_iter().enumerate() {
        assert_approx_eq(fit.coefficients()[i], expected, 1e-4, "qr coefficient");
        assert_approx_eq(closed[i], expected, 1e-4, "closed-form coefficient");
    }
    assert_approx_eq(fit.determination(), 1.0, 1e-5, "R²");
}

#[test]
fn noisy_fit_reports_partial_determination() {
    let x = [0.0, 1.0, 2.0, 3.0, 4.0, 5.0];
    let y = [0.0, 3.0, 1.0, 4.0, 2.0, 5.0];
    let w = [1.0; 6];

    let fit = solve_least_squares(&x, &y, &w, 2).expect("solvable");

    assert!(fit.determination() > 0.0 && fit.determination() < 1.0);
}

#[test]
fn repeated_abscissa_is_rank_deficient() {
    let x = [0.5; 4];
    let y = [1.0, 2.0, 3.0, 4.0];
    let w = [1.0; 4];

    assert!(solve_least_squares(&x, &y, &w, 2).is_none());
}

#[test]
fn fewer_points_than_terms_is_rank_deficient() {
    let x = [0.0, -0.01];
    let y = [3.0, 2.0];
    let w = [1.0; 2];

    assert!(solve_least_squares(&x, &y, &w, 3).is_none());
}

#[test]
fn constant_observations_define_full_determination() {
    let x = [0.0, -0.01, -0.02, -0.03];
    let y = [7.0; 4];
    let w = [1.0; 4];

    let fit = solve_least_squares(&x, &y, &w, 2).expect("solvable");

    assert_approx_eq(fit.coefficients()[1], 0.0, 1e-3, "slope");
    assert_eq!(fit.determination(), 1.0);
}

#[test]
fn weights_pull_fit_toward_heavier_points() {
    let x = [0.0, 1.0, 2.0];
    let y = [0.0, 0.0, 3.0];

    let uniform = solve_least_squares(&x, &y, &[1.0, 1.0, 1.0], 1).expect("solvable");
    let weighted = solve_least_squares(&x, &y, &[1.0, 1.0, 10.0], 1).expect("solvable");

    let uniform_error = (uniform.coefficients()[0] - 3.0).abs();
    let weighted_error = (weighted.coefficients()[0] - 3.0).abs();
    assert!(weighted_error < uniform_error);
}

#[test]
fn closed_form_rejects_degenerate_input() {
    assert!(solve_unweighted_quadratic(&[1.0, 1.0, 1.0], &[1.0, 2.0, 3.0]).is_none());
    assert!(solve_unweighted_quadratic(&[], &[]).is_none());
}

#[test]
#[should_panic(expected = "Mismatched vector sizes")]
fn mismatched_lengths_are_fatal() {
    let _ = solve_least_squares(&[0.0, 1.0], &[0.0], &[1.0, 1.0], 1);
}

#[test]
fn format_vector_lists_values() {
    assert_eq!(format_vector(&[1.0, -0.5]), "[ 1.000000, -0.500000 ]");
    assert_eq!(format_vector(&[]), "[ ]");
}
