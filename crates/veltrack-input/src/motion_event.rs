//! Structured motion events.
//!
//! A [`MotionEvent`] carries one action, a fixed set of pointers and one or
//! more samples. Input devices batch several samples into a single event;
//! the older ones are the event's history and the last one is the current
//! sample. Samples are indexed `0..sample_count()` from oldest to newest.

use smallvec::SmallVec;

use crate::axis::Axis;
use crate::error::{MotionEventError, Result};
use crate::pointer::{PointerId, PointerIdBits, MAX_POINTER_ID};

/// Phase of a single-pointer event as reported by a windowing layer.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum PointerEventKind {
    Down,
    Move,
    Up,
    Cancel,
}

/// Action carried by a [`MotionEvent`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum MotionAction {
    /// First pointer went down; starts a gesture.
    Down,
    /// Last pointer went up; ends a gesture.
    Up,
    Move,
    Cancel,
    Outside,
    /// A non-primary pointer went down. `action_index` names it.
    PointerDown { action_index: usize },
    /// A non-primary pointer went up. `action_index` names it.
    PointerUp { action_index: usize },
    HoverEnter,
    HoverMove,
    HoverExit,
    Scroll,
    ButtonPress,
    ButtonRelease,
}

impl MotionAction {
    /// Index of the pointer the action refers to; 0 for whole-event actions.
    pub const fn action_index(self) -> usize {
        match self {
            MotionAction::PointerDown { action_index }
            | MotionAction::PointerUp { action_index } => action_index,
            _ => 0,
        }
    }
}

impl From<PointerEventKind> for MotionAction {
    fn from(kind: PointerEventKind) -> Self {
        match kind {
            PointerEventKind::Down => MotionAction::Down,
            PointerEventKind::Move => MotionAction::Move,
            PointerEventKind::Up => MotionAction::Up,
            PointerEventKind::Cancel => MotionAction::Cancel,
        }
    }
}

/// Axis values of one pointer in one sample.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct PointerCoords {
    values: [f32; Axis::COUNT],
}

impl PointerCoords {
    /// Coordinates at a planar position; other axes are zero.
    pub fn new(x: f32, y: f32) -> Self {
        Self::default()
            .with_axis_value(Axis::X, x)
            .with_axis_value(Axis::Y, y)
    }

    /// Coordinates carrying only a scroll delta.
    pub fn scroll(delta: f32) -> Self {
        Self::default().with_axis_value(Axis::Scroll, delta)
    }

    pub fn axis_value(&self, axis: Axis) -> f32 {
        self.values[axis.index()]
    }

    pub fn set_axis_value(&mut self, axis: Axis, value: f32) {
        self.values[axis.index()] = value;
    }

    pub fn with_axis_value(mut self, axis: Axis, value: f32) -> Self {
        self.set_axis_value(axis, value);
        self
    }
}

type SampleCoords = SmallVec<[PointerCoords; 4]>;

#[derive(Clone, Debug, PartialEq)]
struct MotionSample {
    event_time: i64,
    coords: SampleCoords,
}

/// A motion event with its batched history.
#[derive(Clone, Debug, PartialEq)]
pub struct MotionEvent {
    action: MotionAction,
    pointer_ids: SmallVec<[PointerId; 4]>,
    samples: SmallVec<[MotionSample; 2]>,
}

impl MotionEvent {
    /// Starts building an event whose current sample is at `event_time`.
    pub fn builder(action: MotionAction, event_time: i64) -> MotionEventBuilder {
        MotionEventBuilder::new(action, event_time)
    }

    /// Translates a single-pointer event from a windowing layer.
    pub fn from_pointer_kind(
        kind: PointerEventKind,
        id: PointerId,
        event_time: i64,
        x: f32,
        y: f32,
    ) -> Result<Self> {
        MotionEventBuilder::new(kind.into(), event_time)
            .pointer(id, PointerCoords::new(x, y))
            .build()
    }

    pub fn action(&self) -> MotionAction {
        self.action
    }

    pub fn action_index(&self) -> usize {
        self.action.action_index()
    }

    pub fn pointer_count(&self) -> usize {
        self.pointer_ids.len()
    }

    /// Id of the pointer at `index`.
    pub fn pointer_id(&self, index: usize) -> PointerId {
        self.pointer_ids[index]
    }

    /// All pointer ids of the event as a set.
    pub fn pointer_id_bits(&self) -> PointerIdBits {
        self.pointer_ids.iter().copied().collect()
    }

    /// Time of the current sample, in nanoseconds.
    pub fn event_time(&self) -> i64 {
        self.current().event_time
    }

    /// Value of `axis` for the pointer at `index` in the current sample.
    pub fn axis_value(&self, axis: Axis, index: usize) -> f32 {
        self.current().coords[index].axis_value(axis)
    }

    /// Number of batched samples preceding the current one.
    pub fn history_size(&self) -> usize {
        self.samples.len() - 1
    }

    /// Number of samples including the current one.
    pub fn sample_count(&self) -> usize {
        self.samples.len()
    }

    /// Time of sample `sample`; `history_size()` names the current sample.
    pub fn sample_event_time(&self, sample: usize) -> i64 {
        self.samples[sample].event_time
    }

    /// Value of `axis` for the pointer at `index` in sample `sample`.
    pub fn sample_axis_value(&self, axis: Axis, index: usize, sample: usize) -> f32 {
        self.samples[sample].coords[index].axis_value(axis)
    }

    fn current(&self) -> &MotionSample {
        &self.samples[self.samples.len() - 1]
    }
}

/// Validating builder for [`MotionEvent`].
#[derive(Clone, Debug)]
pub struct MotionEventBuilder {
    action: MotionAction,
    event_time: i64,
    pointer_ids: SmallVec<[PointerId; 4]>,
    coords: SampleCoords,
    history: SmallVec<[MotionSample; 2]>,
}

impl MotionEventBuilder {
    pub fn new(action: MotionAction, event_time: i64) -> Self {
        Self {
            action,
            event_time,
            pointer_ids: SmallVec::new(),
            coords: SmallVec::new(),
            history: SmallVec::new(),
        }
    }

    /// Adds a pointer with its current-sample coordinates.
    pub fn pointer(mut self, id: PointerId, coords: PointerCoords) -> Self {
        self.pointer_ids.push(id);
        self.coords.push(coords);
        self
    }

    /// Appends a historical sample. Coordinates are given in pointer order.
    pub fn historical_sample(
        mut self,
        event_time: i64,
        coords: impl IntoIterator<Item = PointerCoords>,
    ) -> Self {
        self.history.push(MotionSample {
            event_time,
            coords: coords.into_iter().collect(),
        });
        self
    }

    pub fn build(self) -> Result<MotionEvent> {
        let count = self.pointer_ids.len();
        if count == 0 {
            return Err(MotionEventError::NoPointers);
        }

        let mut seen = PointerIdBits::empty();
        for &id in &self.pointer_ids {
            if id > MAX_POINTER_ID {
                return Err(MotionEventError::PointerIdOutOfRange(id));
            }
            if seen.contains(id) {
                return Err(MotionEventError::DuplicatePointerId(id));
            }
            seen.insert(id);
        }

        let index = self.action.action_index();
        if index >= count {
            return Err(MotionEventError::ActionIndexOutOfRange { index, count });
        }

        let mut samples = self.history;
        samples.push(MotionSample {
            event_time: self.event_time,
            coords: self.coords,
        });

        let mut previous: Option<i64> = None;
        for sample in &samples {
            if sample.coords.len() != count {
                return Err(MotionEventError::PointerCountMismatch {
                    event_time: sample.event_time,
                    expected: count,
                    actual: sample.coords.len(),
                });
            }
            if let Some(previous) = previous {
                if sample.event_time < previous {
                    return Err(MotionEventError::OutOfOrder {
                        previous,
                        next: sample.event_time,
                    });
                }
            }
            previous = Some(sample.event_time);
        }

        Ok(MotionEvent {
            action: self.action,
            pointer_ids: self.pointer_ids,
            samples,
        })
    }
}

#[cfg(test)]
#[path = "tests/motion_event_tests.rs"]
mod tests;
