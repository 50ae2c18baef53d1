use std::collections::BTreeMap;

use veltrack_input::{Axis, PointerId};

/// Snapshot of scaled and clamped velocities per axis and pointer.
///
/// Produced by [`crate::VelocityTracker::computed_velocity`]. Pointers and
/// axes without an estimate of degree one or more are absent.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct ComputedVelocity {
    velocities: BTreeMap<Axis, BTreeMap<PointerId, f32>>,
}

impl ComputedVelocity {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn velocity(&self, axis: Axis, id: PointerId) -> Option<f32> {
        self.velocities.get(&axis)?.get(&id).copied()
    }

    pub fn is_empty(&self) -> bool {
        self.velocities.values().all(BTreeMap::is_empty)
    }

    /// Entries in axis order, then pointer id order.
    pub fn iter(&self) -> impl Iterator<Item = (Axis, PointerId, f32)> + '_ {
        self.velocities.iter().flat_map(|(&axis, pointers)| {
            pointers
                .iter()
                .map(move |(&id, &velocity)| (axis, id, velocity))
        })
    }

    pub(crate) fn insert(&mut self, axis: Axis, id: PointerId, velocity: f32) {
        self.velocities.entry(axis).or_default().insert(id, velocity);
    }
}
