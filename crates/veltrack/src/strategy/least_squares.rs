//! Polynomial least-squares regression over the recent window.

use veltrack_input::{PointerId, PointerIdBits, NANOS_PER_MS};
use veltrack_math::{format_vector, solve_least_squares, solve_unweighted_quadratic};

use super::VelocityStrategy;
use crate::config::TraceConfig;
use crate::estimator::{Estimator, MAX_DEGREE};
use crate::history::{MovementHistory, HISTORY_SIZE};

/// Samples older than this relative to the newest one are not fitted.
pub const LEAST_SQUARES_HORIZON: i64 = 100 * NANOS_PER_MS;

const SECONDS_PER_NANO: f32 = 0.000_000_001;
const MILLIS_PER_NANO: f32 = 0.000_001;

/// Per-sample weighting applied to the fit.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum Weighting {
    /// Every sample counts the same.
    #[default]
    None,
    /// Down-weight samples followed closely by the next one.
    Delta,
    /// Emphasize samples 10..50ms old.
    Central,
    /// Emphasize samples under 50ms old.
    Recent,
}

#[derive(Clone, Debug)]
pub struct LeastSquaresStrategy {
    degree: usize,
    weighting: Weighting,
    history: MovementHistory,
    trace: TraceConfig,
}

impl LeastSquaresStrategy {
    /// # Panics
    ///
    /// Panics if `degree` is 0 or greater than [`MAX_DEGREE`].
    pub fn new(degree: usize, weighting: Weighting) -> Self {
        assert!(
            (1..=MAX_DEGREE).contains(&degree),
            "Invalid least-squares degree {} (max {})",
            degree,
            MAX_DEGREE
        );
        Self {
            degree,
            weighting,
            history: MovementHistory::new(),
            trace: TraceConfig::DISABLED,
        }
    }

    pub fn with_trace(mut self, trace: TraceConfig) -> Self {
        self.trace = trace;
        self
    }

    pub fn degree(&self) -> usize {
        self.degree
    }

    pub fn weighting(&self) -> Weighting {
        self.weighting
    }

    /// Weight of the movement stored at `index`.
    fn choose_weight(&self, index: usize) -> f32 {
        match self.weighting {
            Weighting::None => 1.0,
            Weighting::Delta => {
                if index == self.history.newest_index() {
                    return 1.0;
                }
                let next = self.history.get(MovementHistory::next(index));
                let delta_millis =
                    (next.event_time - self.history.get(index).event_time) as f32 * MILLIS_PER_NANO;
                if delta_millis < 0.0 {
                    0.5
                } else if delta_millis < 10.0 {
                    0.5 + delta_millis * 0.05
                } else {
                    1.0
                }
            }
            Weighting::Central => {
                let age_millis = self.age_millis(index);
                if age_millis < 0.0 {
                    0.5
                } else if age_millis < 10.0 {
                    0.5 + age_millis * 0.05
                } else if age_millis < 50.0 {
                    1.0
                } else if age_millis < 60.0 {
                    0.5 + (60.0 - age_millis) * 0.05
                } else {
                    0.5
                }
            }
            Weighting::Recent => {
                let age_millis = self.age_millis(index);
                if age_millis < 50.0 {
                    1.0
                } else if age_millis < 100.0 {
                    0.5 + (100.0 - age_millis) * 0.01
                } else {
                    0.5
                }
            }
        }
    }

    fn age_millis(&self, index: usize) -> f32 {
        let newest = self.history.get(self.history.newest_index());
        (newest.event_time - self.history.get(index).event_time) as f32 * MILLIS_PER_NANO
    }

    fn log_estimate(&self, estimator: &Estimator, sample_count: usize) {
        if self.trace.strategy {
            log::debug!(
                "lsq{} {:?}: {} samples, degree={}, coeff={}, confidence={:.6}",
                self.degree,
                self.weighting,
                sample_count,
                estimator.degree,
                format_vector(estimator.coefficients()),
                estimator.confidence
            );
        }
    }
}

impl VelocityStrategy for LeastSquaresStrategy {
    fn add_movement(&mut self, event_time: i64, id_bits: PointerIdBits, positions: &[f32]) {
        self.history.push(event_time, id_bits, positions, true);
    }

    fn clear_pointers(&mut self, id_bits: PointerIdBits) {
        self.history.clear_pointers(id_bits);
    }

    fn estimator(&self, id: PointerId) -> Option<Estimator> {
        let newest_time = self.history.newest()?.event_time;

        let mut times = [0.0f32; HISTORY_SIZE];
        let mut positions = [0.0f32; HISTORY_SIZE];
        let mut weights = [0.0f32; HISTORY_SIZE];
        let mut m = 0;
        for (index, movement) in self.history.recent(id, LEAST_SQUARES_HORIZON) {
            times[m] = -((newest_time - movement.event_time) as f32) * SECONDS_PER_NANO;
            positions[m] = movement.position(id);
            weights[m] = self.choose_weight(index);
            m += 1;
        }
        if m == 0 {
            return None;
        }

        let (times, positions, weights) = (&times[..m], &positions[..m], &weights[..m]);
        let degree = self.degree.min(m - 1);

        let fitted = if degree == 2 && self.weighting == Weighting::None {
            // The quadratic has a closed form that is cheaper and steadier
            // than the general solver.
            solve_unweighted_quadratic(times, positions).map(|[c, b, a]| {
                let mut coeff = [0.0; MAX_DEGREE + 1];
                coeff[..3].copy_from_slice(&[c, b, a]);
                Estimator {
                    time: newest_time,
                    coeff,
                    degree: 2,
                    confidence: 1.0,
                }
            })
        } else if degree >= 1 {
            solve_least_squares(times, positions, weights, degree + 1).map(|fit| {
                let mut coeff = [0.0; MAX_DEGREE + 1];
                coeff[..fit.coefficients().len()].copy_from_slice(fit.coefficients());
                Estimator {
                    time: newest_time,
                    coeff,
                    degree: fit.degree(),
                    confidence: fit.determination(),
                }
            })
        } else {
            None
        };

        let estimator =
            fitted.unwrap_or_else(|| Estimator::position_only(newest_time, positions[0]));
        self.log_estimate(&estimator, m);
        Some(estimator)
    }
}

#[cfg(test)]
#[path = "tests/least_squares_tests.rs"]
mod tests;
