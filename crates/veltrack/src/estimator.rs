/// Highest polynomial degree an estimator can carry.
pub const MAX_DEGREE: usize = 4;

/// Polynomial approximation of a pointer's position near its newest sample.
///
/// `t = 0` is the time of the newest sample and negative `t` is the past, in
/// seconds: `position(t) ≈ coeff[0] + coeff[1]·t + coeff[2]·t² + …`. So
/// `coeff[1]` is the velocity and `coeff[2]` half the acceleration.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Estimator {
    /// Time of the newest sample, in nanoseconds.
    pub time: i64,
    pub coeff: [f32; MAX_DEGREE + 1],
    /// Degree of the polynomial; 0 means only a position is known.
    pub degree: usize,
    /// Coefficient of determination (R²) between 0 and 1.
    pub confidence: f32,
}

impl Estimator {
    /// Estimator that knows only the last position.
    pub fn position_only(time: i64, position: f32) -> Self {
        let mut coeff = [0.0; MAX_DEGREE + 1];
        coeff[0] = position;
        Self {
            time,
            coeff,
            degree: 0,
            confidence: 1.0,
        }
    }

    /// Position at the newest sample. Always 0 on differential axes such as
    /// scroll, whose samples are deltas.
    pub fn position(&self) -> f32 {
        self.coeff[0]
    }

    /// Velocity in units per second, if the estimator has degree 1 or more.
    pub fn velocity(&self) -> Option<f32> {
        (self.degree >= 1).then_some(self.coeff[1])
    }

    /// Acceleration in units per second squared, if the degree is 2 or more.
    pub fn acceleration(&self) -> Option<f32> {
        (self.degree >= 2).then_some(self.coeff[2] * 2.0)
    }

    /// The `degree + 1` meaningful coefficients.
    pub fn coefficients(&self) -> &[f32] {
        &self.coeff[..=self.degree]
    }
}
