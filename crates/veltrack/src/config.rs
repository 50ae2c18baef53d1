//! Strategy selection and tracing switches.
//!
//! Strategies can be picked in code, by numeric id, by name, or through the
//! `VELTRACK_STRATEGY` environment variable. Unrecognized environment values
//! fall back to the per-axis defaults with a warning.

use std::fmt;
use std::str::FromStr;

use veltrack_input::Axis;

use crate::error::{ConfigError, Result};

/// Environment variable consulted by [`VelocityTrackerStrategy::from_env`].
pub const STRATEGY_ENV_VAR: &str = "VELTRACK_STRATEGY";

/// Per-axis default strategy table. Axes missing here are unsupported.
pub const DEFAULT_STRATEGIES: [(Axis, VelocityTrackerStrategy); 3] = [
    (Axis::X, VelocityTrackerStrategy::Lsq2),
    (Axis::Y, VelocityTrackerStrategy::Lsq2),
    (Axis::Scroll, VelocityTrackerStrategy::Impulse),
];

/// Velocity estimation strategy.
///
/// Numeric ids are stable: `Default` is -1, the rest count up from
/// `Impulse = 0`.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum VelocityTrackerStrategy {
    /// Use the per-axis default.
    #[default]
    Default,
    /// Kinetic-energy impulse estimator.
    Impulse,
    /// Unweighted linear least squares.
    Lsq1,
    /// Unweighted quadratic least squares.
    Lsq2,
    /// Unweighted cubic least squares.
    Lsq3,
    /// Quadratic least squares weighted by the spacing to the next sample.
    Wlsq2Delta,
    /// Quadratic least squares emphasizing the middle of the window.
    Wlsq2Central,
    /// Quadratic least squares emphasizing recent samples.
    Wlsq2Recent,
    /// First-order integrating filter.
    Int1,
    /// Second-order integrating filter.
    Int2,
    /// Duration-weighted average of velocities relative to the oldest sample.
    Legacy,
}

impl VelocityTrackerStrategy {
    /// Every strategy except [`VelocityTrackerStrategy::Default`].
    pub const CONCRETE: [Self; 10] = [
        Self::Impulse,
        Self::Lsq1,
        Self::Lsq2,
        Self::Lsq3,
        Self::Wlsq2Delta,
        Self::Wlsq2Central,
        Self::Wlsq2Recent,
        Self::Int1,
        Self::Int2,
        Self::Legacy,
    ];

    pub const fn id(self) -> i32 {
        match self {
            Self::Default => -1,
            Self::Impulse => 0,
            Self::Lsq1 => 1,
            Self::Lsq2 => 2,
            Self::Lsq3 => 3,
            Self::Wlsq2Delta => 4,
            Self::Wlsq2Central => 5,
            Self::Wlsq2Recent => 6,
            Self::Int1 => 7,
            Self::Int2 => 8,
            Self::Legacy => 9,
        }
    }

    pub const fn name(self) -> &'static str {
        match self {
            Self::Default => "default",
            Self::Impulse => "impulse",
            Self::Lsq1 => "lsq1",
            Self::Lsq2 => "lsq2",
            Self::Lsq3 => "lsq3",
            Self::Wlsq2Delta => "wlsq2-delta",
            Self::Wlsq2Central => "wlsq2-central",
            Self::Wlsq2Recent => "wlsq2-recent",
            Self::Int1 => "int1",
            Self::Int2 => "int2",
            Self::Legacy => "legacy",
        }
    }

    /// Reads the strategy from `VELTRACK_STRATEGY`.
    ///
    /// Returns `Default` when the variable is unset or unparseable.
    pub fn from_env() -> Self {
        match std::env::var(STRATEGY_ENV_VAR) {
            Ok(value) => value.parse().unwrap_or_else(|err| {
                log::warn!("{err}; using per-axis default strategies");
                Self::Default
            }),
            Err(_) => Self::Default,
        }
    }

    /// Default strategy for `axis`, or `None` if the axis is unsupported.
    pub fn default_for_axis(axis: Axis) -> Option<Self> {
        DEFAULT_STRATEGIES
            .iter()
            .find(|(candidate, _)| *candidate == axis)
            .map(|(_, strategy)| *strategy)
    }
}

impl TryFrom<i32> for VelocityTrackerStrategy {
    type Error = ConfigError;

    fn try_from(id: i32) -> Result<Self> {
        if id == Self::Default.id() {
            return Ok(Self::Default);
        }
        Self::CONCRETE
            .into_iter()
            .find(|strategy| strategy.id() == id)
            .ok_or(ConfigError::UnknownStrategyId(id))
    }
}

impl FromStr for VelocityTrackerStrategy {
    type Err = ConfigError;

    /// Parses a case-insensitive name; `_` is accepted in place of `-`.
    fn from_str(value: &str) -> Result<Self> {
        let normalized = value.trim().to_ascii_lowercase().replace('_', "-");
        std::iter::once(Self::Default)
            .chain(Self::CONCRETE)
            .find(|strategy| strategy.name() == normalized)
            .ok_or_else(|| ConfigError::UnknownStrategyName(value.to_string()))
    }
}

impl fmt::Display for VelocityTrackerStrategy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Diagnostic logging switches. All off by default.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct TraceConfig {
    /// Log every estimate after each movement.
    pub velocity: bool,
    /// Log strategy internals such as fit degree and confidence.
    pub strategy: bool,
    /// Cross-check impulse estimates against a quadratic least-squares fit.
    pub impulse: bool,
}

impl TraceConfig {
    pub const DISABLED: Self = Self {
        velocity: false,
        strategy: false,
        impulse: false,
    };

    pub const fn all() -> Self {
        Self {
            velocity: true,
            strategy: true,
            impulse: true,
        }
    }
}

/// Tracker construction options.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct VelocityTrackerConfig {
    /// Strategy override for every axis. `Default` uses the per-axis table.
    pub strategy: VelocityTrackerStrategy,
    pub trace: TraceConfig,
}

impl VelocityTrackerConfig {
    pub fn new() -> Self {
        Self::default()
    }

    /// Configuration with the strategy taken from the environment.
    pub fn from_env() -> Self {
        Self::default().with_strategy(VelocityTrackerStrategy::from_env())
    }

    pub fn with_strategy(mut self, strategy: VelocityTrackerStrategy) -> Self {
        self.strategy = strategy;
        self
    }

    pub fn with_trace(mut self, trace: TraceConfig) -> Self {
        self.trace = trace;
        self
    }
}

#[cfg(test)]
#[path = "tests/config_tests.rs"]
mod tests;
