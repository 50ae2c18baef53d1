//! Input vocabulary for velocity tracking: pointer ids, axes and motion events.

pub mod axis;
pub mod clock;
pub mod error;
pub mod motion_event;
pub mod pointer;

pub use axis::Axis;
pub use clock::EventClock;
pub use error::{MotionEventError, Result};
pub use motion_event::{
    MotionAction, MotionEvent, MotionEventBuilder, PointerCoords, PointerEventKind,
};
pub use pointer::{PointerId, PointerIdBits, PointerIdIter, MAX_POINTERS, MAX_POINTER_ID};

/// Nanoseconds per millisecond.
pub const NANOS_PER_MS: i64 = 1_000_000;

/// Nanoseconds per second.
pub const NANOS_PER_SECOND: i64 = 1_000_000_000;

pub mod prelude {
    pub use crate::axis::Axis;
    pub use crate::motion_event::{MotionAction, MotionEvent, MotionEventBuilder, PointerCoords};
    pub use crate::pointer::{PointerId, PointerIdBits};
}
