//! Stage configuration.

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use marquee_motion::MotionConfig;

use crate::error::StageConfigError;

/// Most labels that may animate at once.
pub const MAX_CAPACITY: usize = 5;

/// Scheduling and store limits.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct StageConfig {
    /// Maximum number of labels alive at once; the oldest is evicted beyond it.
    pub capacity: usize,
    /// Integrator period in milliseconds.
    pub tick_interval_ms: u64,
    /// Upper bound on ticks replayed in one frame after a stall.
    pub max_catch_up_ticks: u32,
    /// New animations start up to this many milliseconds in the future, so
    /// labels submitted together do not oscillate in phase.
    pub start_jitter_ms: u64,
    /// Maximum label length in characters, after trimming.
    pub max_text_len: usize,
}

impl Default for StageConfig {
    fn default() -> Self {
        Self {
            capacity: MAX_CAPACITY,
            tick_interval_ms: 50,
            max_catch_up_ticks: 10,
            start_jitter_ms: 1000,
            max_text_len: 50,
        }
    }
}

impl StageConfig {
    /// Integrator period in seconds.
    pub fn tick_seconds(&self) -> f32 {
        self.tick_interval_ms as f32 / 1000.0
    }

    /// Builder: set the capacity.
    pub fn with_capacity(mut self, capacity: usize) -> Self {
        self.capacity = capacity;
        self
    }

    /// Builder: set the catch-up limit.
    pub fn with_max_catch_up_ticks(mut self, ticks: u32) -> Self {
        self.max_catch_up_ticks = ticks;
        self
    }

    /// Builder: set the start jitter.
    pub fn with_start_jitter_ms(mut self, jitter: u64) -> Self {
        self.start_jitter_ms = jitter;
        self
    }

    /// Builder: set the integrator period.
    pub fn with_tick_interval_ms(mut self, interval: u64) -> Self {
        self.tick_interval_ms = interval;
        self
    }

    /// Checks the limits.
    pub fn validate(&self) -> Result<(), StageConfigError> {
        if !(1..=MAX_CAPACITY).contains(&self.capacity) {
            return Err(StageConfigError::CapacityOutOfRange {
                capacity: self.capacity,
                max: MAX_CAPACITY,
            });
        }
        if self.tick_interval_ms == 0 {
            return Err(StageConfigError::ZeroTickInterval);
        }
        if self.max_catch_up_ticks == 0 {
            return Err(StageConfigError::ZeroCatchUp);
        }
        if self.max_text_len == 0 {
            return Err(StageConfigError::ZeroTextLength);
        }
        Ok(())
    }
}

/// Full configuration for a [`Theater`](crate::Theater).
#[derive(Debug, Clone, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct TheaterConfig {
    /// Generation, integration and sampling.
    pub motion: MotionConfig,
    /// Scheduling and store limits.
    pub stage: StageConfig,
}

impl TheaterConfig {
    /// Validates both halves.
    pub fn validate(&self) -> Result<(), StageConfigError> {
        self.motion.validate()?;
        self.stage.validate()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use marquee_motion::FieldBounds;

    #[test]
    fn test_defaults() {
        let config = TheaterConfig::default();
        assert_eq!(config.validate(), Ok(()));
        assert_eq!(config.stage.capacity, 5);
        assert!((config.stage.tick_seconds() - 0.05).abs() < 1e-6);
    }

    #[test]
    fn test_zero_limits_rejected() {
        assert_eq!(
            StageConfig::default().with_capacity(0).validate(),
            Err(StageConfigError::CapacityOutOfRange {
                capacity: 0,
                max: MAX_CAPACITY
            })
        );
        assert_eq!(
            StageConfig::default().with_tick_interval_ms(0).validate(),
            Err(StageConfigError::ZeroTickInterval)
        );
        assert_eq!(
            StageConfig::default().with_max_catch_up_ticks(0).validate(),
            Err(StageConfigError::ZeroCatchUp)
        );
    }

    #[test]
    fn test_capacity_above_limit_rejected() {
        assert_eq!(StageConfig::default().with_capacity(1).validate(), Ok(()));
        assert_eq!(
            StageConfig::default().with_capacity(MAX_CAPACITY).validate(),
            Ok(())
        );
        for capacity in [MAX_CAPACITY + 1, 50, usize::MAX] {
            assert_eq!(
                StageConfig::default().with_capacity(capacity).validate(),
                Err(StageConfigError::CapacityOutOfRange {
                    capacity,
                    max: MAX_CAPACITY
                })
            );
        }
    }

    #[test]
    fn test_motion_errors_propagate() {
        let config = TheaterConfig {
            motion: MotionConfig::default().with_render_bounds(FieldBounds::square(30.0, 70.0)),
            ..Default::default()
        };
        assert!(matches!(
            config.validate(),
            Err(StageConfigError::Motion(_))
        ));
    }
}
