//! Monotonic event timestamps.

// WASM-compatible time - web-time is what winit uses internally
use web_time::Instant;

/// Stamps events with nanoseconds elapsed since a fixed origin.
///
/// Windowing layers that deliver pointer events without a timestamp can
/// stamp them here before handing them to a velocity tracker.
#[derive(Clone, Copy, Debug)]
pub struct EventClock {
    origin: Instant,
}

impl EventClock {
    /// Creates a clock whose origin is now.
    pub fn new() -> Self {
        Self::starting_at(Instant::now())
    }

    pub fn starting_at(origin: Instant) -> Self {
        Self { origin }
    }

    pub fn origin(&self) -> Instant {
        self.origin
    }

    /// Nanoseconds elapsed since the origin.
    pub fn now_nanos(&self) -> i64 {
        self.nanos_at(Instant::now())
    }

    /// Nanoseconds from the origin to `instant`; 0 for instants before it.
    pub fn nanos_at(&self, instant: Instant) -> i64 {
        let elapsed = instant.saturating_duration_since(self.origin);
        i64::try_from(elapsed.as_nanos()).unwrap_or(i64::MAX)
    }
}

impl Default for EventClock {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
#[path = "tests/clock_tests.rs"]
mod tests;
