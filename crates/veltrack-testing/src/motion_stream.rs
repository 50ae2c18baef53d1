//! Builders for realistic motion event sequences.
//!
//! A gesture is described per pointer as a list of timed positions. The
//! stream turns it into the events an input device would deliver: `Down`
//! for the first pointer, `PointerDown` for each additional pointer, a
//! `Move` per sample, then `PointerUp`s and a final `Up` at the last sample
//! time.

use veltrack_input::{MotionAction, MotionEvent, PointerCoords, NANOS_PER_MS};

/// One timed planar position.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct PlanarSample {
    /// Event time in nanoseconds.
    pub time: i64,
    pub x: f32,
    pub y: f32,
}

impl PlanarSample {
    pub fn new(time: i64, x: f32, y: f32) -> Self {
        Self { time, x, y }
    }

    /// Sample at `time_ms` milliseconds.
    pub fn at_ms(time_ms: i64, x: f32, y: f32) -> Self {
        Self::new(time_ms * NANOS_PER_MS, x, y)
    }

    fn coords(&self) -> PointerCoords {
        PointerCoords::new(self.x, self.y)
    }
}

/// An ordered list of motion events.
#[derive(Clone, Debug, Default)]
pub struct MotionStream {
    events: Vec<MotionEvent>,
}

impl MotionStream {
    /// Single-pointer touch gesture using pointer id 0.
    pub fn touch(samples: &[PlanarSample]) -> Self {
        Self::multi_touch(&[samples.to_vec()])
    }

    /// Multi-pointer touch gesture; pointer `k` gets id `k`.
    ///
    /// # Panics
    ///
    /// Panics when pointers have different sample counts or timestamps.
    pub fn multi_touch(pointers: &[Vec<PlanarSample>]) -> Self {
        assert!(!pointers.is_empty(), "at least one pointer is required");
        let samples = pointers[0].len();
        assert!(samples > 0, "at least one sample is required");
        for pointer in pointers {
            assert_eq!(pointer.len(), samples, "pointers must have equal sample counts");
            for (sample, reference) in pointer.iter().zip(&pointers[0]) {
                assert_eq!(sample.time, reference.time, "pointers must share timestamps");
            }
        }

        let mut events = Vec::new();
        let first_time = pointers[0][0].time;
        events.push(Self::event(MotionAction::Down, first_time, &pointers[..1], 0));
        for k in 1..pointers.len() {
            events.push(Self::event(
                MotionAction::PointerDown { action_index: k },
                first_time,
                &pointers[..=k],
                0,
            ));
        }

        for i in 1..samples {
            events.push(Self::event(
                MotionAction::Move,
                pointers[0][i].time,
                pointers,
                i,
            ));
        }

        let last = samples - 1;
        let last_time = pointers[0][last].time;
        for k in (1..pointers.len()).rev() {
            events.push(Self::event(
                MotionAction::PointerUp { action_index: k },
                last_time,
                &pointers[..=k],
                last,
            ));
        }
        events.push(Self::event(MotionAction::Up, last_time, &pointers[..1], last));

        Self { events }
    }

    /// Scroll gesture: one `Scroll` event per `(time, delta)` pair.
    pub fn scroll(deltas: &[(i64, f32)]) -> Self {
        let events = deltas
            .iter()
            .map(|&(time, delta)| {
                MotionEvent::builder(MotionAction::Scroll, time)
                    .pointer(0, PointerCoords::scroll(delta))
                    .build()
                    .expect("scroll events are valid")
            })
            .collect();
        Self { events }
    }

    /// Appends another stream.
    pub fn then(mut self, other: MotionStream) -> Self {
        self.events.extend(other.events);
        self
    }

    pub fn events(&self) -> &[MotionEvent] {
        &self.events
    }

    pub fn into_events(self) -> Vec<MotionEvent> {
        self.events
    }

    fn event(
        action: MotionAction,
        time: i64,
        pointers: &[Vec<PlanarSample>],
        sample: usize,
    ) -> MotionEvent {
        pointers
            .iter()
            .enumerate()
            .fold(MotionEvent::builder(action, time), |builder, (id, samples)| {
                builder.pointer(id as u32, samples[sample].coords())
            })
            .build()
            .expect("generated events are valid")
    }
}

impl IntoIterator for MotionStream {
    type Item = MotionEvent;
    type IntoIter = std::vec::IntoIter<MotionEvent>;

    fn into_iter(self) -> Self::IntoIter {
        self.events.into_iter()
    }
}
