//! Pointer velocity estimation.
//!
//! A [`VelocityTracker`] ingests time-ordered pointer samples per axis and
//! estimates the instantaneous velocity of every active pointer. Each axis
//! gets its own [`Strategy`], one of:
//!
//! - least-squares polynomial regression with optional sample weighting,
//! - the impulse (kinetic energy) estimator,
//! - an IIR-filter integrating differentiator,
//! - the legacy duration-weighted average.
//!
//! Everything runs synchronously on the caller's thread with bounded work
//! per call. Numerical degeneracies never fail: estimates degrade to a
//! lower degree instead.

mod computed;
pub mod config;
mod error;
mod estimator;
mod history;
pub mod strategy;
mod tracker;

pub use computed::ComputedVelocity;
pub use config::{TraceConfig, VelocityTrackerConfig, VelocityTrackerStrategy};
pub use error::{ConfigError, Result};
pub use estimator::{Estimator, MAX_DEGREE};
pub use history::HISTORY_SIZE;
pub use strategy::{Strategy, VelocityStrategy, Weighting};
pub use tracker::{VelocityTracker, ASSUME_POINTER_STOPPED_TIME};

pub use veltrack_input::{
    Axis, MotionAction, MotionEvent, PointerCoords, PointerId, PointerIdBits, MAX_POINTERS,
    MAX_POINTER_ID,
};

pub mod prelude {
    pub use crate::config::{TraceConfig, VelocityTrackerConfig, VelocityTrackerStrategy};
    pub use crate::estimator::Estimator;
    pub use crate::tracker::VelocityTracker;
    pub use veltrack_input::prelude::*;
}
