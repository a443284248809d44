//! Stage error types.

use thiserror::Error;

/// Errors from submitting text to the [`LabelStore`](crate::LabelStore).
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum StoreError {
    /// The text was empty after trimming whitespace.
    #[error("label text is empty")]
    EmptyText,

    /// The trimmed text exceeds the configured length limit.
    #[error("label text is {len} characters, limit is {max}")]
    TextTooLong {
        /// Length of the trimmed text, in characters.
        len: usize,
        /// Configured maximum.
        max: usize,
    },
}

/// Errors from validating a [`TheaterConfig`](crate::TheaterConfig).
#[derive(Debug, Clone, PartialEq, Error)]
pub enum StageConfigError {
    /// The motion configuration is invalid.
    #[error(transparent)]
    Motion(#[from] marquee_motion::ConfigError),

    /// The live set must hold between one and
    /// [`MAX_CAPACITY`](crate::MAX_CAPACITY) labels.
    #[error("capacity must be between 1 and {max}, got {capacity}")]
    CapacityOutOfRange {
        /// Configured capacity.
        capacity: usize,
        /// Largest accepted capacity.
        max: usize,
    },

    /// The integrator interval must be positive.
    #[error("tick interval must be at least 1ms")]
    ZeroTickInterval,

    /// At least one tick must be allowed per frame.
    #[error("max catch-up ticks must be at least 1")]
    ZeroCatchUp,

    /// Labels must be allowed at least one character.
    #[error("max text length must be at least 1")]
    ZeroTextLength,
}
