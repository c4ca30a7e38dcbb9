//! Error types for building a simulation

use thiserror::Error;

/// Rejected simulation settings
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigError {
    /// The enemy fire draw is `100 / complexity`, which must stay at least 1
    #[error("complexity must be between 1 and 100, got {0}")]
    InvalidComplexity(u32),

    /// The field cannot hold the opening formation above the player row
    #[error("field {width}x{height} is too small (minimum {min_width}x{min_height})")]
    FieldTooSmall {
        width: u32,
        height: u32,
        min_width: u32,
        min_height: u32,
    },
}

/// Result type for simulation setup
pub type Result<T> = std::result::Result<T, ConfigError>;
