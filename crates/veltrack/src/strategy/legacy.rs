//! Duration-weighted average of velocities measured from the oldest sample.

use veltrack_input::{PointerId, PointerIdBits, NANOS_PER_MS};

use super::VelocityStrategy;
use crate::estimator::{Estimator, MAX_DEGREE};
use crate::history::{MovementHistory, HISTORY_SIZE};

/// Oldest sample age considered, relative to the newest.
pub const LEGACY_HORIZON: i64 = 200 * NANOS_PER_MS;

/// Samples closer than this to the oldest one are skipped.
pub const LEGACY_MIN_DURATION: i64 = 10 * NANOS_PER_MS;

#[derive(Clone, Debug, Default)]
pub struct LegacyStrategy {
    history: MovementHistory,
}

impl LegacyStrategy {
    pub fn new() -> Self {
        Self::default()
    }
}

impl VelocityStrategy for LegacyStrategy {
    fn add_movement(&mut self, event_time: i64, id_bits: PointerIdBits, positions: &[f32]) {
        self.history.push(event_time, id_bits, positions, false);
    }

    fn clear_pointers(&mut self, id_bits: PointerIdBits) {
        self.history.clear_pointers(id_bits);
    }

    fn estimator(&self, id: PointerId) -> Option<Estimator> {
        let newest = self.history.newest()?;

        // Slots newest first; the last one is the oldest usable sample.
        let mut window = [0usize; HISTORY_SIZE];
        let mut count = 0;
        for (index, _) in self.history.recent(id, LEGACY_HORIZON) {
            window[count] = index;
            count += 1;
        }
        if count == 0 {
            return None;
        }

        let oldest = self.history.get(window[count - 1]);
        let oldest_position = oldest.position(id);
        let mut accumulated_velocity = 0.0f32;
        let mut last_duration: i64 = 0;
        let mut samples_used = 0;
        for &index in window[..count - 1].iter().rev() {
            let movement = self.history.get(index);
            let duration = movement.event_time - oldest.event_time;
            if duration < LEGACY_MIN_DURATION {
                continue;
            }
            let scale = 1_000_000_000.0 / duration as f32;
            let velocity = (movement.position(id) - oldest_position) * scale;
            accumulated_velocity = (accumulated_velocity * last_duration as f32
                + velocity * duration as f32)
                / (duration + last_duration) as f32;
            last_duration = duration;
            samples_used += 1;
        }

        let mut coeff = [0.0; MAX_DEGREE + 1];
        coeff[0] = newest.position(id);
        let degree = if samples_used > 0 {
            coeff[1] = accumulated_velocity;
            1
        } else {
            0
        };
        Some(Estimator {
            time: newest.event_time,
            coeff,
            degree,
            confidence: 1.0,
        })
    }
}

#[cfg(test)]
#[path = "tests/legacy_tests.rs"]
mod tests;
