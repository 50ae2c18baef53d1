//! Motion axes.

use std::fmt;

/// An independent scalar channel of pointer motion.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Axis {
    /// Horizontal position.
    X,
    /// Vertical position.
    Y,
    /// Scroll wheel or rotary encoder; reported as per-event deltas.
    Scroll,
}

impl Axis {
    /// Number of axes.
    pub const COUNT: usize = 3;

    /// Every axis, in declaration order.
    pub const ALL: [Axis; Axis::COUNT] = [Axis::X, Axis::Y, Axis::Scroll];

    /// Axes describing a location on a 2D plane.
    pub const PLANAR: [Axis; 2] = [Axis::X, Axis::Y];

    /// Whether this axis reports location on the 2D plane.
    pub const fn is_planar(self) -> bool {
        matches!(self, Axis::X | Axis::Y)
    }

    /// Whether values on this axis are deltas since the previous event rather
    /// than absolute positions.
    pub const fn is_differential(self) -> bool {
        matches!(self, Axis::Scroll)
    }

    /// Dense index of the axis, `0..Axis::COUNT`.
    pub const fn index(self) -> usize {
        match self {
            Axis::X => 0,
            Axis::Y => 1,
            Axis::Scroll => 2,
        }
    }

    pub const fn name(self) -> &'static str {
        match self {
            Axis::X => "x",
            Axis::Y => "y",
            Axis::Scroll => "scroll",
        }
    }
}

impl fmt::Display for Axis {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}
