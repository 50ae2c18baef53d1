//! Motion event construction errors.

use crate::pointer::PointerId;
use thiserror::Error;

/// Result type for motion event construction.
pub type Result<T> = std::result::Result<T, MotionEventError>;

/// Reasons a [`MotionEventBuilder`](crate::MotionEventBuilder) rejects its input.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum MotionEventError {
    /// The event carries no pointers.
    #[error("Motion event has no pointers")]
    NoPointers,

    /// A pointer id appears twice.
    #[error("Duplicate pointer id: {0}")]
    DuplicatePointerId(PointerId),

    /// A pointer id exceeds the supported range.
    #[error("Pointer id out of range: {0} (max: {max})", max = crate::MAX_POINTER_ID)]
    PointerIdOutOfRange(PointerId),

    /// A historical sample has a different pointer count than the event.
    #[error("Sample at {event_time}ns has {actual} pointers, expected {expected}")]
    PointerCountMismatch {
        event_time: i64,
        expected: usize,
        actual: usize,
    },

    /// Historical samples are not in chronological order.
    #[error("Sample at {next}ns precedes sample at {previous}ns")]
    OutOfOrder { previous: i64, next: i64 },

    /// The action index does not name a pointer of the event.
    #[error("Action index {index} out of range for {count} pointers")]
    ActionIndexOutOfRange { index: usize, count: usize },
}
