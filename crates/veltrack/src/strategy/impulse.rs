//! Impulse velocity estimation.
//!
//! Treats the pointer as a unit-mass object pushed by the finger: the work
//! done between consecutive samples accumulates into kinetic energy, and the
//! velocity is the one that carries that energy. Compared to regression it
//! reacts to direction changes without overshooting.

use veltrack_input::{PointerId, PointerIdBits, NANOS_PER_MS};

use super::least_squares::{LeastSquaresStrategy, Weighting};
use super::VelocityStrategy;
use crate::config::TraceConfig;
use crate::estimator::{Estimator, MAX_DEGREE};
use crate::history::{MovementHistory, HISTORY_SIZE};

/// Samples older than this relative to the newest one are ignored.
pub const IMPULSE_HORIZON: i64 = 100 * NANOS_PER_MS;

const SECONDS_PER_NANO: f32 = 0.000_000_001;

#[derive(Clone, Debug)]
pub struct ImpulseStrategy {
    delta_values: bool,
    history: MovementHistory,
    trace: TraceConfig,
}

impl ImpulseStrategy {
    /// `delta_values` means each sample is the displacement since the
    /// previous one rather than an absolute position.
    pub fn new(delta_values: bool) -> Self {
        Self {
            delta_values,
            history: MovementHistory::new(),
            trace: TraceConfig::DISABLED,
        }
    }

    pub fn with_trace(mut self, trace: TraceConfig) -> Self {
        self.trace = trace;
        self
    }

    pub fn delta_values(&self) -> bool {
        self.delta_values
    }

    /// Logs what a quadratic least-squares fit makes of the same window.
    fn log_comparison(&self, times: &[i64], positions: &[f32], impulse_velocity: f32) {
        let mut lsq2 = LeastSquaresStrategy::new(2, Weighting::None);
        let id_bits = PointerIdBits::with_id(0);
        for (&time, &position) in times.iter().zip(positions).rev() {
            lsq2.add_movement(time, id_bits, &[position]);
        }
        match lsq2.estimator(0).and_then(|estimator| estimator.velocity()) {
            Some(lsq2_velocity) => log::debug!(
                "impulse velocity: {:.1}, lsq2 velocity: {:.1}",
                impulse_velocity,
                lsq2_velocity
            ),
            None => log::debug!(
                "impulse velocity: {:.1}, lsq2 velocity: unavailable",
                impulse_velocity
            ),
        }
    }
}

impl VelocityStrategy for ImpulseStrategy {
    fn add_movement(&mut self, event_time: i64, id_bits: PointerIdBits, positions: &[f32]) {
        self.history.push(event_time, id_bits, positions, true);
    }

    fn clear_pointers(&mut self, id_bits: PointerIdBits) {
        self.history.clear_pointers(id_bits);
    }

    fn estimator(&self, id: PointerId) -> Option<Estimator> {
        let newest_time = self.history.newest()?.event_time;

        let mut times = [0i64; HISTORY_SIZE];
        let mut positions = [0.0f32; HISTORY_SIZE];
        let mut count = 0;
        for (_, movement) in self.history.recent(id, IMPULSE_HORIZON) {
            times[count] = movement.event_time;
            positions[count] = movement.position(id);
            count += 1;
        }
        if count == 0 {
            return None;
        }

        let (times, positions) = (&times[..count], &positions[..count]);
        let velocity = impulse_velocity(times, positions, self.delta_values);
        if self.trace.impulse {
            self.log_comparison(times, positions, velocity);
        }

        let mut coeff = [0.0; MAX_DEGREE + 1];
        // A delta says nothing about where the pointer is.
        coeff[0] = if self.delta_values { 0.0 } else { positions[0] };
        coeff[1] = velocity;
        Some(Estimator {
            time: newest_time,
            coeff,
            degree: 2,
            confidence: 1.0,
        })
    }
}

/// Velocity that carries kinetic energy `work` for a unit mass, keeping the
/// sign of the work.
fn kinetic_energy_to_velocity(work: f32) -> f32 {
    work.signum() * (2.0 * work.abs()).sqrt()
}

/// Impulse velocity of samples ordered newest first, with times in
/// nanoseconds.
///
/// Segments with equal timestamps contribute nothing. With `delta_values`
/// each value is the displacement from the previous (older) sample.
pub(crate) fn impulse_velocity(times: &[i64], values: &[f32], delta_values: bool) -> f32 {
    debug_assert_eq!(times.len(), values.len());
    let count = times.len();
    if count < 2 {
        return 0.0;
    }
    if times[1] > times[0] {
        log::warn!("Impulse samples are not ordered newest first");
    }

    if count == 2 {
        if times[1] == times[0] {
            log::trace!("Impulse samples share timestamp {}", times[0]);
            return 0.0;
        }
        let delta = if delta_values {
            -values[0]
        } else {
            values[1] - values[0]
        };
        return delta / (SECONDS_PER_NANO * (times[1] - times[0]) as f32);
    }

    // Walk from the oldest segment to the newest.
    let mut work = 0.0f32;
    for i in (1..count).rev() {
        if times[i] == times[i - 1] {
            log::trace!("Impulse samples share timestamp {}", times[i]);
            continue;
        }
        let previous_velocity = kinetic_energy_to_velocity(work);
        let delta = if delta_values {
            -values[i - 1]
        } else {
            values[i] - values[i - 1]
        };
        let current_velocity = delta / (SECONDS_PER_NANO * (times[i] - times[i - 1]) as f32);
        work += (current_velocity - previous_velocity) * current_velocity.abs();
        if i == count - 1 {
            // The pointer was already moving when the window opened, so only
            // half of the first segment's work is attributed to it.
            work *= 0.5;
        }
    }
    kinetic_energy_to_velocity(work)
}

#[cfg(test)]
#[path = "tests/impulse_tests.rs"]
mod tests;
