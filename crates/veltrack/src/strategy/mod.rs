//! Velocity estimation strategies.
//!
//! Every strategy consumes the same movement stream and answers the same
//! question: what polynomial best describes a pointer near its newest
//! sample. [`Strategy`] is the closed set the tracker dispatches over.

mod impulse;
mod integrating;
mod least_squares;
mod legacy;

pub use impulse::{ImpulseStrategy, IMPULSE_HORIZON};
pub use integrating::IntegratingStrategy;
pub use least_squares::{LeastSquaresStrategy, Weighting, LEAST_SQUARES_HORIZON};
pub use legacy::{LegacyStrategy, LEGACY_HORIZON, LEGACY_MIN_DURATION};

use veltrack_input::{PointerId, PointerIdBits};

use crate::config::{TraceConfig, VelocityTrackerStrategy};
use crate::estimator::Estimator;

/// Capabilities shared by all strategies.
pub trait VelocityStrategy {
    /// Records the positions of `id_bits` at `event_time`.
    ///
    /// `positions` holds one value per id, in increasing id order.
    fn add_movement(&mut self, event_time: i64, id_bits: PointerIdBits, positions: &[f32]);

    /// Forgets `id_bits` for future estimates.
    fn clear_pointers(&mut self, id_bits: PointerIdBits);

    /// Current estimate for `id`, or `None` if nothing is known about it.
    fn estimator(&self, id: PointerId) -> Option<Estimator>;
}

#[derive(Clone, Debug)]
pub enum Strategy {
    LeastSquares(LeastSquaresStrategy),
    Impulse(ImpulseStrategy),
    Integrating(IntegratingStrategy),
    Legacy(LegacyStrategy),
}

impl Strategy {
    /// Instantiates `kind`.
    ///
    /// `delta_values` marks a differential axis, whose samples are deltas
    /// rather than absolute positions. Only the impulse strategy honors it.
    ///
    /// # Panics
    ///
    /// Panics for [`VelocityTrackerStrategy::Default`], which has to be
    /// resolved to a concrete strategy first.
    pub fn new(kind: VelocityTrackerStrategy, delta_values: bool, trace: TraceConfig) -> Self {
        use VelocityTrackerStrategy as Kind;

        match kind {
            Kind::Impulse => Self::Impulse(ImpulseStrategy::new(delta_values).with_trace(trace)),
            Kind::Lsq1 => Self::least_squares(1, Weighting::None, trace),
            Kind::Lsq2 => Self::least_squares(2, Weighting::None, trace),
            Kind::Lsq3 => Self::least_squares(3, Weighting::None, trace),
            Kind::Wlsq2Delta => Self::least_squares(2, Weighting::Delta, trace),
            Kind::Wlsq2Central => Self::least_squares(2, Weighting::Central, trace),
            Kind::Wlsq2Recent => Self::least_squares(2, Weighting::Recent, trace),
            Kind::Int1 => Self::Integrating(IntegratingStrategy::new(1)),
            Kind::Int2 => Self::Integrating(IntegratingStrategy::new(2)),
            Kind::Legacy => Self::Legacy(LegacyStrategy::new()),
            Kind::Default => panic!("Cannot instantiate the {kind} velocity tracker strategy"),
        }
    }

    fn least_squares(degree: usize, weighting: Weighting, trace: TraceConfig) -> Self {
        Self::LeastSquares(LeastSquaresStrategy::new(degree, weighting).with_trace(trace))
    }
}

impl VelocityStrategy for Strategy {
    fn add_movement(&mut self, event_time: i64, id_bits: PointerIdBits, positions: &[f32]) {
        match self {
            Self::LeastSquares(strategy) => strategy.add_movement(event_time, id_bits, positions),
            Self::Impulse(strategy) => strategy.add_movement(event_time, id_bits, positions),
            Self::Integrating(strategy) => strategy.add_movement(event_time, id_bits, positions),
            Self::Legacy(strategy) => strategy.add_movement(event_time, id_bits, positions),
        }
    }

    fn clear_pointers(&mut self, id_bits: PointerIdBits) {
        match self {
            Self::LeastSquares(strategy) => strategy.clear_pointers(id_bits),
            Self::Impulse(strategy) => strategy.clear_pointers(id_bits),
            Self::Integrating(strategy) => strategy.clear_pointers(id_bits),
            Self::Legacy(strategy) => strategy.clear_pointers(id_bits),
        }
    }

    fn estimator(&self, id: PointerId) -> Option<Estimator> {
        match self {
            Self::LeastSquares(strategy) => strategy.estimator(id),
            Self::Impulse(strategy) => strategy.estimator(id),
            Self::Integrating(strategy) => strategy.estimator(id),
            Self::Legacy(strategy) => strategy.estimator(id),
        }
    }
}

#[cfg(test)]
#[path = "tests/dispatch_tests.rs"]
mod tests;
