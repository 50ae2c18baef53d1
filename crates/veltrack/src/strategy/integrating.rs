//! Integrating velocity filter.
//!
//! A first- or second-order IIR differentiator per pointer. It keeps no
//! window, only the filtered state, so an estimate costs nothing.

use veltrack_input::{PointerId, PointerIdBits, MAX_POINTER_ID, NANOS_PER_MS};

use super::VelocityStrategy;
use crate::estimator::{Estimator, MAX_DEGREE};

/// Samples closer than this to the previous update are dropped.
const MIN_TIME_DELTA: i64 = 2 * NANOS_PER_MS;

/// Filter time constant in seconds.
const FILTER_TIME_CONSTANT: f32 = 0.010;

const SECONDS_PER_NANO: f32 = 0.000_000_001;

#[derive(Clone, Copy, Debug, Default)]
struct PointerState {
    update_time: i64,
    /// Degree the state has bootstrapped to so far.
    degree: usize,
    position: f32,
    velocity: f32,
    acceleration: f32,
}

impl PointerState {
    fn init(event_time: i64, position: f32) -> Self {
        Self {
            update_time: event_time,
            position,
            ..Self::default()
        }
    }

    fn update(&mut self, target_degree: usize, event_time: i64, position: f32) {
        if event_time <= self.update_time + MIN_TIME_DELTA {
            return;
        }

        let dt = (event_time - self.update_time) as f32 * SECONDS_PER_NANO;
        self.update_time = event_time;

        let velocity = (position - self.position) / dt;
        if self.degree == 0 {
            self.velocity = velocity;
            self.degree = 1;
        } else {
            let alpha = dt / (FILTER_TIME_CONSTANT + dt);
            if target_degree == 1 {
                self.velocity += (velocity - self.velocity) * alpha;
            } else {
                let acceleration = (velocity - self.velocity) / dt;
                if self.degree == 1 {
                    self.acceleration = acceleration;
                    self.degree = 2;
                } else {
                    self.acceleration += (acceleration - self.acceleration) * alpha;
                }
                self.velocity += (self.acceleration * dt) * alpha;
            }
        }
        self.position = position;
    }

    fn to_estimator(self) -> Estimator {
        let mut coeff = [0.0; MAX_DEGREE + 1];
        coeff[0] = self.position;
        coeff[1] = self.velocity;
        coeff[2] = self.acceleration / 2.0;
        Estimator {
            time: self.update_time,
            coeff,
            degree: self.degree,
            confidence: 1.0,
        }
    }
}

#[derive(Clone, Debug)]
pub struct IntegratingStrategy {
    degree: usize,
    pointer_ids: PointerIdBits,
    states: [PointerState; MAX_POINTER_ID as usize + 1],
}

impl IntegratingStrategy {
    /// # Panics
    ///
    /// Panics unless `degree` is 1 or 2.
    pub fn new(degree: usize) -> Self {
        assert!(
            degree == 1 || degree == 2,
            "Invalid integrating degree {}",
            degree
        );
        Self {
            degree,
            pointer_ids: PointerIdBits::EMPTY,
            states: [PointerState::default(); MAX_POINTER_ID as usize + 1],
        }
    }

    pub fn degree(&self) -> usize {
        self.degree
    }
}

impl VelocityStrategy for IntegratingStrategy {
    fn add_movement(&mut self, event_time: i64, id_bits: PointerIdBits, positions: &[f32]) {
        assert_eq!(
            positions.len(),
            id_bits.count(),
            "Mismatching number of positions for {:?}",
            id_bits
        );
        for (id, &position) in id_bits.iter().zip(positions) {
            let state = &mut self.states[id as usize];
            if self.pointer_ids.contains(id) {
                state.update(self.degree, event_time, position);
            } else {
                *state = PointerState::init(event_time, position);
            }
        }
        self.pointer_ids = id_bits;
    }

    fn clear_pointers(&mut self, id_bits: PointerIdBits) {
        self.pointer_ids = self.pointer_ids.difference(id_bits);
    }

    fn estimator(&self, id: PointerId) -> Option<Estimator> {
        self.pointer_ids
            .contains(id)
            .then(|| self.states[id as usize].to_estimator())
    }
}

#[cfg(test)]
#[path = "tests/integrating_tests.rs"]
mod tests;
