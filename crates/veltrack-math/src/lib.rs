//! Linear algebra kernel for velocity estimation.
//!
//! All storage is fixed-size: a fit never looks at more than
//! [`MAX_POINTS`] samples and never solves for more than [`MAX_TERMS`]
//! polynomial coefficients, so every matrix lives on the stack with a
//! compile-time bound. Arithmetic is single precision throughout.

mod least_squares;
mod vector;

pub use least_squares::{solve_least_squares, solve_unweighted_quadratic, PolynomialFit};
pub use vector::{format_vector, vector_dot, vector_norm};

/// Maximum number of data points accepted by the solvers.
pub const MAX_POINTS: usize = 20;

/// Maximum number of polynomial terms (degree + 1) the solvers produce.
pub const MAX_TERMS: usize = 5;

/// Column norm below which the design matrix is treated as rank deficient.
pub const RANK_EPSILON: f32 = 0.000001;
