//! Configuration errors.

use thiserror::Error;

/// Result type for configuration parsing.
pub type Result<T> = std::result::Result<T, ConfigError>;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ConfigError {
    /// The strategy name is not recognized.
    #[error("Unknown velocity tracker strategy: {0:?}")]
    UnknownStrategyName(String),

    /// The numeric strategy id is not recognized.
    #[error("Unknown velocity tracker strategy id: {0}")]
    UnknownStrategyId(i32),
}
