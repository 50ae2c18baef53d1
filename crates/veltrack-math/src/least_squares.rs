//! Polynomial least-squares fitting.
//!
//! The general solver expands `x` into a weighted Vandermonde matrix `A`
//! (`A[i][h] = w[h] * x[h]^i`), factors it as `A = QR` with the modified
//! Gram-Schmidt process and back-substitutes `R·B = Qᵗ·(w .* y)`. `A` and
//! `Q` are stored column-major because the algorithm walks columns; `R` is
//! row-major.
//!
//! The weights are the reciprocal standard deviation of each observation:
//! the minimized quantity is `Σ w[h]² · (y[h] - p(x[h]))²`.

use crate::vector::{format_vector, vector_dot, vector_norm};
use crate::{MAX_POINTS, MAX_TERMS, RANK_EPSILON};

/// Result of a successful polynomial fit.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct PolynomialFit {
    coefficients: [f32; MAX_TERMS],
    terms: usize,
    determination: f32,
}

impl PolynomialFit {
    /// Coefficients in increasing power order: `y ≈ c[0] + c[1]·x + c[2]·x² + …`.
    pub fn coefficients(&self) -> &[f32] {
        &self.coefficients[..self.terms]
    }

    /// Degree of the fitted polynomial.
    pub fn degree(&self) -> usize {
        self.terms - 1
    }

    /// Weighted coefficient of determination (R²).
    ///
    /// Defined as 1 when the observations have (near) zero variance.
    pub fn determination(&self) -> f32 {
        self.determination
    }
}

/// Fits a polynomial with `n` terms (degree `n - 1`) to the points `(x, y)`.
///
/// Returns `None` when the columns of the design matrix are linearly
/// dependent, which happens when there are fewer distinct `x` values than
/// terms.
///
/// # Panics
///
/// Panics when `x`, `y` and `w` differ in length, when more than
/// [`MAX_POINTS`] points are supplied, or when `n` is outside
/// `1..=MAX_TERMS`.
pub fn solve_least_squares(x: &[f32], y: &[f32], w: &[f32], n: usize) -> Option<PolynomialFit> {
    let m = x.len();
    assert!(
        m == y.len() && m == w.len(),
        "Mismatched vector sizes: x={}, y={}, w={}",
        m,
        y.len(),
        w.len()
    );
    assert!(m <= MAX_POINTS, "Too many points: {} > {}", m, MAX_POINTS);
    assert!(
        (1..=MAX_TERMS).contains(&n),
        "Unsupported number of terms: {}",
        n
    );

    log::trace!(
        "solve_least_squares: m={}, n={}, x={}, y={}, w={}",
        m,
        n,
        format_vector(x),
        format_vector(y),
        format_vector(w)
    );

    let mut a = [[0.0f32; MAX_POINTS]; MAX_TERMS];
    for h in 0..m {
        a[0][h] = w[h];
        for i in 1..n {
            a[i][h] = a[i - 1][h] * x[h];
        }
    }

    let mut q = [[0.0f32; MAX_POINTS]; MAX_TERMS];
    let mut r = [[0.0f32; MAX_TERMS]; MAX_TERMS];
    for j in 0..n {
        let (basis, rest) = q.split_at_mut(j);
        let column = &mut rest[0][..m];
        column.copy_from_slice(&a[j][..m]);

        for previous in basis.iter() {
            let previous = &previous[..m];
            let dot = vector_dot(column, previous);
            for (value, base) in column.iter_mut().zip(previous) {
                *value -= dot * base;
            }
        }

        let norm = vector_norm(column);
        if norm < RANK_EPSILON {
            log::trace!("  - no solution, norm={}", norm);
            return None;
        }

        let inv_norm = 1.0 / norm;
        for value in column.iter_mut() {
            *value *= inv_norm;
        }
        for i in 0..n {
            r[j][i] = if i < j {
                0.0
            } else {
                vector_dot(column, &a[i][..m])
            };
        }
    }

    let mut wy = [0.0f32; MAX_POINTS];
    for h in 0..m {
        wy[h] = y[h] * w[h];
    }

    // R is upper triangular: solve from the last coefficient upwards.
    let mut b = [0.0f32; MAX_TERMS];
    for i in (0..n).rev() {
        let mut value = vector_dot(&q[i][..m], &wy[..m]);
        for j in (i + 1..n).rev() {
            value -= r[i][j] * b[j];
        }
        b[i] = value / r[i][i];
    }

    log::trace!("  - b={}", format_vector(&b[..n]));

    let ymean = y.iter().sum::<f32>() / m as f32;
    let mut sserr = 0.0f32;
    let mut sstot = 0.0f32;
    for h in 0..m {
        let mut err = y[h] - b[0];
        let mut term = 1.0f32;
        for coefficient in &b[1..n] {
            term *= x[h];
            err -= term * coefficient;
        }
        let weight_squared = w[h] * w[h];
        sserr += weight_squared * err * err;
        let var = y[h] - ymean;
        sstot += weight_squared * var * var;
    }
    let determination = if sstot > RANK_EPSILON {
        1.0 - sserr / sstot
    } else {
        1.0
    };

    log::trace!(
        "  - sserr={}, sstot={}, det={}",
        sserr,
        sstot,
        determination
    );

    Some(PolynomialFit {
        coefficients: b,
        terms: n,
        determination,
    })
}

/// Closed-form unweighted quadratic fit `y ≈ c + b·x + a·x²`.
///
/// Solves the 3×3 normal equations directly from power sums up to `x⁴`,
/// which is roughly twice as fast as the QR path. Returns `[c, b, a]`, or
/// `None` when the determinant of the centered normal equations is exactly
/// zero.
///
/// # Panics
///
/// Panics when `x` and `y` differ in length.
pub fn solve_unweighted_quadratic(x: &[f32], y: &[f32]) -> Option<[f32; 3]> {
    assert_eq!(x.len(), y.len(), "Mismatching array sizes");
    if x.is_empty() {
        return None;
    }
    let count = x.len() as f32;

    let mut sxi = 0.0f32;
    let mut sxiyi = 0.0f32;
    let mut syi = 0.0f32;
    let mut sxi2 = 0.0f32;
    let mut sxi3 = 0.0f32;
    let mut sxi2yi = 0.0f32;
    let mut sxi4 = 0.0f32;

    for (&xi, &yi) in x.iter().zip(y) {
        let xi2 = xi * xi;
        let xi3 = xi2 * xi;
        let xi4 = xi3 * xi;

        sxi += xi;
        sxi2 += xi2;
        sxiyi += xi * yi;
        sxi2yi += xi2 * yi;
        syi += yi;
        sxi3 += xi3;
        sxi4 += xi4;
    }

    let sxx = sxi2 - sxi * sxi / count;
    let sxy = sxiyi - sxi * syi / count;
    let sxx2 = sxi3 - sxi * sxi2 / count;
    let sx2y = sxi2yi - sxi2 * syi / count;
    let sx2x2 = sxi4 - sxi2 * sxi2 / count;

    let denominator = sxx * sx2x2 - sxx2 * sxx2;
    if denominator == 0.0 {
        log::warn!(
            "division by 0 when computing velocity, Sxx={}, Sx2x2={}, Sxx2={}",
            sxx,
            sx2x2,
            sxx2
        );
        return None;
    }

    let a = (sx2y * sxx - sxy * sxx2) / denominator;
    let b = (sxy * sx2x2 - sx2y * sxx2) / denominator;
    let c = syi / count - b * sxi / count - a * sxi2 / count;

    Some([c, b, a])
}

#[cfg(test)]
#[path = "tests/least_squares_tests.rs"]
mod tests;
