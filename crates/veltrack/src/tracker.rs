//! Multi-pointer, multi-axis velocity tracking.

use std::collections::BTreeMap;

use smallvec::SmallVec;
use veltrack_input::{
    Axis, MotionAction, MotionEvent, PointerId, PointerIdBits, MAX_POINTERS, NANOS_PER_MS,
};
use veltrack_math::format_vector;

use crate::computed::ComputedVelocity;
use crate::config::{TraceConfig, VelocityTrackerConfig, VelocityTrackerStrategy};
use crate::estimator::Estimator;
use crate::strategy::{Strategy, VelocityStrategy};

/// A pointer that reports nothing for this long is assumed to have stopped;
/// its next movement starts a fresh history.
pub const ASSUME_POINTER_STOPPED_TIME: i64 = 40 * NANOS_PER_MS;

/// Estimates pointer velocities from a stream of movements.
///
/// Strategies are created lazily, one per axis, the first time the axis is
/// seen. A tracker is single-threaded; move it between threads as needed.
#[derive(Clone, Debug)]
pub struct VelocityTracker {
    last_event_time: i64,
    current_pointer_ids: PointerIdBits,
    active_pointer_id: Option<PointerId>,
    override_strategy: VelocityTrackerStrategy,
    trace: TraceConfig,
    strategies: BTreeMap<Axis, Strategy>,
}

impl Default for VelocityTracker {
    fn default() -> Self {
        Self::new()
    }
}

impl VelocityTracker {
    /// Tracker using the per-axis default strategies.
    pub fn new() -> Self {
        Self::with_config(VelocityTrackerConfig::default())
    }

    /// Tracker using `strategy` for every axis, or the per-axis defaults for
    /// [`VelocityTrackerStrategy::Default`].
    pub fn with_strategy(strategy: VelocityTrackerStrategy) -> Self {
        Self::with_config(VelocityTrackerConfig::default().with_strategy(strategy))
    }

    pub fn with_config(config: VelocityTrackerConfig) -> Self {
        Self {
            last_event_time: 0,
            current_pointer_ids: PointerIdBits::EMPTY,
            active_pointer_id: None,
            override_strategy: config.strategy,
            trace: config.trace,
            strategies: BTreeMap::new(),
        }
    }

    /// Whether `axis` has a default strategy.
    pub fn is_axis_supported(axis: Axis) -> bool {
        VelocityTrackerStrategy::default_for_axis(axis).is_some()
    }

    /// Forgets every pointer and every axis.
    pub fn clear(&mut self) {
        self.current_pointer_ids = PointerIdBits::EMPTY;
        self.active_pointer_id = None;
        self.strategies.clear();
    }

    /// Forgets `id_bits` on every axis, for example when those pointers
    /// lift or get cancelled.
    pub fn clear_pointers(&mut self, id_bits: PointerIdBits) {
        self.current_pointer_ids = self.current_pointer_ids.difference(id_bits);
        if self
            .active_pointer_id
            .is_some_and(|id| id_bits.contains(id))
        {
            self.active_pointer_id = self.current_pointer_ids.first();
        }
        for strategy in self.strategies.values_mut() {
            strategy.clear_pointers(id_bits);
        }
    }

    /// Records one sample for several axes.
    ///
    /// Each entry of `positions` pairs an axis with one value per id of
    /// `id_bits`, in increasing id order. At most [`MAX_POINTERS`] pointers
    /// are tracked; surplus highest ids are dropped along with the tail of
    /// each value list.
    ///
    /// # Panics
    ///
    /// Panics if an axis has no default strategy or a value list length
    /// differs from the number of ids.
    pub fn add_movement<I, P>(&mut self, event_time: i64, id_bits: PointerIdBits, positions: I)
    where
        I: IntoIterator<Item = (Axis, P)>,
        P: AsRef<[f32]>,
    {
        let pointer_count = id_bits.count();
        let mut id_bits = id_bits;
        while id_bits.count() > MAX_POINTERS {
            id_bits.clear_last();
        }
        let tracked_count = id_bits.count();

        if self.current_pointer_ids.intersects(id_bits)
            && event_time - self.last_event_time > ASSUME_POINTER_STOPPED_TIME
        {
            if self.trace.velocity {
                log::debug!(
                    "Pointers stopped for {:.1}ms, clearing velocity state",
                    (event_time - self.last_event_time) as f32 / NANOS_PER_MS as f32
                );
            }
            self.strategies.clear();
        }

        self.last_event_time = event_time;
        self.current_pointer_ids = id_bits;
        if !self.active_pointer_id.is_some_and(|id| id_bits.contains(id)) {
            self.active_pointer_id = id_bits.first();
        }

        let override_strategy = self.override_strategy;
        let trace = self.trace;
        for (axis, values) in positions {
            let values = values.as_ref();
            assert_eq!(
                values.len(),
                pointer_count,
                "Mismatching number of {} positions for {:?}",
                axis,
                id_bits
            );
            let values = &values[..tracked_count];
            let strategy = self
                .strategies
                .entry(axis)
                .or_insert_with(|| create_strategy(axis, override_strategy, trace));
            strategy.add_movement(event_time, id_bits, values);

            if trace.velocity {
                log::debug!(
                    "add_movement({}): time={}, ids={:?}, positions={}",
                    axis,
                    event_time,
                    id_bits,
                    format_vector(values)
                );
                for id in id_bits.iter() {
                    match strategy.estimator(id) {
                        Some(estimator) => log::debug!(
                            "{} pointer {}: time={}, coeff={}, degree={}, confidence={:.6}",
                            axis,
                            id,
                            estimator.time,
                            format_vector(estimator.coefficients()),
                            estimator.degree,
                            estimator.confidence
                        ),
                        None => log::debug!("{} pointer {}: no estimate", axis, id),
                    }
                }
            }
        }
    }

    /// Feeds a motion event, replaying its historical samples first.
    ///
    /// `Down` and `HoverEnter` start over; `PointerDown` forgets the new
    /// pointer's stale history; `Up` and `PointerUp` only drop the planar
    /// axes when the pointers had already stopped. Actions that carry no
    /// movement are ignored.
    pub fn add_motion_event(&mut self, event: &MotionEvent) {
        let axes: &[Axis] = match event.action() {
            MotionAction::Down | MotionAction::HoverEnter => {
                self.clear();
                &Axis::PLANAR
            }
            MotionAction::PointerDown { action_index } => {
                self.clear_pointers(PointerIdBits::with_id(event.pointer_id(action_index)));
                &Axis::PLANAR
            }
            MotionAction::Move | MotionAction::HoverMove => &Axis::PLANAR,
            MotionAction::Scroll => &[Axis::Scroll],
            MotionAction::Up | MotionAction::PointerUp { .. } => {
                let delay = event.event_time() - self.last_event_time;
                if delay > ASSUME_POINTER_STOPPED_TIME {
                    if self.trace.velocity {
                        log::debug!(
                            "Pointer lifted {:.1}ms after the last movement, clearing planar velocity",
                            delay as f32 / NANOS_PER_MS as f32
                        );
                    }
                    for axis in Axis::PLANAR {
                        self.strategies.remove(&axis);
                    }
                }
                return;
            }
            _ => return,
        };

        let pointer_count = event.pointer_count().min(MAX_POINTERS);
        let id_bits: PointerIdBits = (0..pointer_count).map(|i| event.pointer_id(i)).collect();
        let mut slots = [0usize; MAX_POINTERS];
        for (i, slot) in slots.iter_mut().enumerate().take(pointer_count) {
            *slot = id_bits.index_of(event.pointer_id(i));
        }

        for sample in 0..event.sample_count() {
            let positions: SmallVec<[(Axis, [f32; MAX_POINTERS]); 2]> = axes
                .iter()
                .map(|&axis| {
                    let mut values = [0.0f32; MAX_POINTERS];
                    for (i, &slot) in slots.iter().enumerate().take(pointer_count) {
                        values[slot] = event.sample_axis_value(axis, i, sample);
                    }
                    (axis, values)
                })
                .collect();
            self.add_movement(
                event.sample_event_time(sample),
                id_bits,
                positions
                    .iter()
                    .map(|(axis, values)| (*axis, &values[..pointer_count])),
            );
        }
    }

    /// Velocity of `id` along `axis` in units per second, if known.
    pub fn velocity(&self, axis: Axis, id: PointerId) -> Option<f32> {
        self.estimator(axis, id)?.velocity()
    }

    pub fn estimator(&self, axis: Axis, id: PointerId) -> Option<Estimator> {
        self.strategies.get(&axis)?.estimator(id)
    }

    /// Velocities of all current pointers on all configured axes, scaled to
    /// `units` per second and clamped to `±max_velocity`.
    ///
    /// `units` is the number of position units per millisecond of the output
    /// scale: 1000 yields units per second.
    pub fn computed_velocity(&self, units: i32, max_velocity: f32) -> ComputedVelocity {
        let limit = max_velocity.abs();
        let mut computed = ComputedVelocity::new();
        for (&axis, strategy) in &self.strategies {
            for id in self.current_pointer_ids.iter() {
                let Some(velocity) = strategy.estimator(id).and_then(|e| e.velocity()) else {
                    continue;
                };
                let scaled = velocity * units as f32 / 1000.0;
                computed.insert(axis, id, scaled.max(-limit).min(limit));
            }
        }
        computed
    }

    /// Lowest pointer id seen in the newest movement that is still down.
    pub fn active_pointer_id(&self) -> Option<PointerId> {
        self.active_pointer_id
    }

    pub fn current_pointer_ids(&self) -> PointerIdBits {
        self.current_pointer_ids
    }

    /// Strategy configured for `axis`, if the axis has been seen.
    pub fn strategy(&self, axis: Axis) -> Option<&Strategy> {
        self.strategies.get(&axis)
    }
}

fn create_strategy(
    axis: Axis,
    override_strategy: VelocityTrackerStrategy,
    trace: TraceConfig,
) -> Strategy {
    let kind = match override_strategy {
        VelocityTrackerStrategy::Default => VelocityTrackerStrategy::default_for_axis(axis)
            .unwrap_or_else(|| panic!("Axis {} is not supported", axis)),
        strategy => strategy,
    };
    if trace.strategy {
        log::debug!("Creating {} velocity strategy for axis {}", kind, axis);
    }
    Strategy::new(kind, axis.is_differential(), trace)
}

#[cfg(test)]
#[path = "tests/tracker_tests.rs"]
mod tests;
