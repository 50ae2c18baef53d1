//! Testing utilities for veltrack.

pub mod assertions;
pub mod motion_stream;

pub use assertions::{assert_approx_eq, assert_near_by_fraction};
pub use motion_stream::{MotionStream, PlanarSample};

pub mod prelude {
    pub use crate::assertions::*;
    pub use crate::motion_stream::*;
}
